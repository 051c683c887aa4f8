//! Aircraft feed client.
//!
//! Fetches the live aircraft list from a readsb/tar1090-style JSON endpoint
//! (`{ "aircraft": [...] }`) and normalizes records for the engine.

use serde::Deserialize;

use skywatch_core::types::{AircraftRecord, Result, SkywatchError};

#[derive(Deserialize)]
struct FeedResponse {
    #[serde(default)]
    aircraft: Vec<AircraftRecord>,
}

/// HTTP client for the aircraft feed endpoint.
pub struct FeedClient {
    url: String,
    client: reqwest::Client,
}

impl FeedClient {
    pub fn new(url: &str) -> Self {
        FeedClient {
            url: url.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetch one poll batch. Records come back case-normalized.
    pub async fn fetch(&self) -> Result<Vec<AircraftRecord>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SkywatchError::Feed(e.to_string()))?;
        let body: FeedResponse = response
            .json()
            .await
            .map_err(|e| SkywatchError::Feed(e.to_string()))?;

        let mut records = body.aircraft;
        for record in &mut records {
            record.normalize();
        }
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feed_response() {
        let json = r#"{
            "now": 1700000000.0,
            "aircraft": [
                {"hex": "a1b2c3", "flight": "ual123 ", "squawk": "7700",
                 "alt_baro": 8000, "alt_geom": 8100, "lat": 35.4, "lon": -82.5,
                 "gs": 420.5, "track": 270.0},
                {"hex": "def456"}
            ]
        }"#;
        let body: FeedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.aircraft.len(), 2);
        assert_eq!(body.aircraft[0].squawk, "7700");
        assert_eq!(body.aircraft[1].flight, "");
    }

    #[test]
    fn test_parse_feed_response_no_aircraft_key() {
        let body: FeedResponse = serde_json::from_str(r#"{"now": 1.0}"#).unwrap();
        assert!(body.aircraft.is_empty());
    }
}

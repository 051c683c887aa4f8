//! Shared types, error enum, and the aircraft record for skywatch-core.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// All errors produced by skywatch.
#[derive(Debug, Error)]
pub enum SkywatchError {
    #[error("config error: {0}")]
    Config(String),
    #[error("watchlist error: {0}")]
    Watchlist(String),
    #[error("feed error: {0}")]
    Feed(String),
    #[error("notify error: {0}")]
    Notify(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SkywatchError>;

// ---------------------------------------------------------------------------
// Sentinels
// ---------------------------------------------------------------------------

/// Altitude field value meaning "not yet reported".
pub const ALT_UNKNOWN: i32 = 999_999;

/// Coordinate field value meaning "position unknown".
pub const COORD_UNKNOWN: f64 = -1.0;

fn alt_unknown() -> i32 {
    ALT_UNKNOWN
}

fn coord_unknown() -> f64 {
    COORD_UNKNOWN
}

/// Altitude fields sometimes carry the string `"ground"` instead of a number;
/// anything non-numeric collapses to the sentinel.
fn de_altitude<'de, D>(d: D) -> std::result::Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Other(serde::de::IgnoredAny),
    }
    Ok(match Raw::deserialize(d)? {
        Raw::Int(v) => v as i32,
        Raw::Float(v) => v as i32,
        Raw::Other(_) => ALT_UNKNOWN,
    })
}

// ---------------------------------------------------------------------------
// Aircraft record
// ---------------------------------------------------------------------------

/// One aircraft state record from a feed poll. Ephemeral — not retained
/// after the cycle that produced it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AircraftRecord {
    /// 24-bit transponder address as hex, uppercased by `normalize`.
    pub hex: String,
    /// Callsign, trimmed and uppercased by `normalize`. May be empty.
    #[serde(default)]
    pub flight: String,
    /// 4-digit transponder code. May be empty.
    #[serde(default)]
    pub squawk: String,
    #[serde(default = "alt_unknown", deserialize_with = "de_altitude")]
    pub alt_baro: i32,
    #[serde(default = "alt_unknown", deserialize_with = "de_altitude")]
    pub alt_geom: i32,
    #[serde(default = "coord_unknown")]
    pub lat: f64,
    #[serde(default = "coord_unknown")]
    pub lon: f64,
    /// Ground speed in knots. Informational pass-through.
    #[serde(default)]
    pub gs: Option<f64>,
    /// Track in degrees. Informational pass-through.
    #[serde(default)]
    pub track: Option<f64>,
}

impl AircraftRecord {
    /// Case-normalize identity fields: hex uppercased, flight trimmed and
    /// uppercased. Call once after deserializing a feed record.
    pub fn normalize(&mut self) {
        self.hex = self.hex.trim().to_ascii_uppercase();
        self.flight = self.flight.trim().to_ascii_uppercase();
    }

    pub fn has_position(&self) -> bool {
        self.lat != COORD_UNKNOWN && self.lon != COORD_UNKNOWN
    }
}

/// The two alerting rules, each with its own cooldown ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Squawk,
    Watchlist,
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertKind::Squawk => write!(f, "squawk"),
            AlertKind::Watchlist => write!(f, "watchlist"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Altitude and geofence gating for watchlist alerts.

use crate::types::{ALT_UNKNOWN, COORD_UNKNOWN};

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MI: f64 = 3958.8;

/// Great-circle distance in statute miles.
pub fn haversine_mi(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    EARTH_RADIUS_MI * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Ceiling check against both altitude sources.
#[derive(Debug, Clone, Copy)]
pub struct AltitudeFilter {
    pub enabled: bool,
    pub ceiling_ft: i32,
}

impl AltitudeFilter {
    /// True if the aircraft qualifies under the ceiling.
    ///
    /// A record whose altitude has not been reported yet (both sources at
    /// the sentinel) fails — not yet eligible, not an error. Either source
    /// being within the ceiling is sufficient, which tolerates a missing or
    /// zeroed value in the other.
    pub fn passes(&self, alt_baro: i32, alt_geom: i32) -> bool {
        if !self.enabled {
            return true;
        }
        if alt_baro == ALT_UNKNOWN && alt_geom == ALT_UNKNOWN {
            return false;
        }
        alt_baro <= self.ceiling_ft || alt_geom <= self.ceiling_ft
    }
}

/// Circular region around a home coordinate.
#[derive(Debug, Clone, Copy)]
pub struct GeofenceFilter {
    pub enabled: bool,
    pub home_lat: f64,
    pub home_lon: f64,
    pub radius_mi: f64,
}

impl GeofenceFilter {
    /// True if the aircraft is within the alert radius of home.
    /// Unknown position (sentinel coordinate) fails. Boundary inclusive.
    pub fn passes(&self, lat: f64, lon: f64) -> bool {
        if !self.enabled {
            return true;
        }
        if lat == COORD_UNKNOWN || lon == COORD_UNKNOWN {
            return false;
        }
        haversine_mi(lat, lon, self.home_lat, self.home_lon) <= self.radius_mi
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

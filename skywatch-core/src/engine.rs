//! Alert evaluation engine.
//!
//! Pure logic — no I/O, no clocks. The caller supplies a batch of aircraft
//! records per poll cycle plus the current time; the engine produces
//! `AlertEvent` outputs for the caller to deliver. Evaluation mutates only
//! the cooldown ledgers.

use crate::cooldown::CooldownTracker;
use crate::filters::{AltitudeFilter, GeofenceFilter};
use crate::squawk;
use crate::types::{AircraftRecord, AlertKind};
use crate::watchlist::{WatchlistEntry, WatchlistIndex};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Immutable engine configuration, constructed once at startup.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub altitude_filter: bool,
    pub ceiling_ft: i32,
    pub distance_filter: bool,
    pub radius_mi: f64,
    pub home_lat: f64,
    pub home_lon: f64,
    pub cooldown_secs: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            altitude_filter: false,
            ceiling_ft: 10_000,
            distance_filter: false,
            radius_mi: 50.0,
            home_lat: 0.0,
            home_lon: 0.0,
            cooldown_secs: crate::cooldown::DEFAULT_COOLDOWN_SECS,
        }
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// The rule that triggered an alert.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertRule {
    Squawk {
        code: String,
        meaning: &'static str,
    },
    Watchlist {
        entry: WatchlistEntry,
    },
}

/// One alert to deliver. Produced transiently per cycle, not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    pub record: AircraftRecord,
    pub rule: AlertRule,
    pub timestamp: f64,
}

impl AlertEvent {
    pub fn kind(&self) -> AlertKind {
        match self.rule {
            AlertRule::Squawk { .. } => AlertKind::Squawk,
            AlertRule::Watchlist { .. } => AlertKind::Watchlist,
        }
    }
}

// ---------------------------------------------------------------------------
// Decision observability
// ---------------------------------------------------------------------------

/// Why a record did or did not produce an alert. Reported to the injected
/// sink; keeps the engine free of output formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Matched { kind: AlertKind, hex: String },
    FilterRejected { hex: String, key: String },
    CooldownSuppressed { kind: AlertKind, hex: String },
}

/// Receives engine decisions. Implemented by `Vec<Decision>` for tests and
/// by `NullSink` for callers that don't care.
pub trait DecisionSink {
    fn decision(&mut self, decision: Decision);
}

/// Discards all decisions.
pub struct NullSink;

impl DecisionSink for NullSink {
    fn decision(&mut self, _decision: Decision) {}
}

impl DecisionSink for Vec<Decision> {
    fn decision(&mut self, decision: Decision) {
        self.push(decision);
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Evaluates aircraft records against the squawk catalog and the watchlist,
/// gated by altitude/geofence filters and per-kind cooldowns.
pub struct AlertEngine {
    altitude: AltitudeFilter,
    geofence: GeofenceFilter,
    watchlist: WatchlistIndex,
    cooldowns: CooldownTracker,
}

impl AlertEngine {
    pub fn new(config: &EngineConfig, watchlist: WatchlistIndex) -> Self {
        AlertEngine {
            altitude: AltitudeFilter {
                enabled: config.altitude_filter,
                ceiling_ft: config.ceiling_ft,
            },
            geofence: GeofenceFilter {
                enabled: config.distance_filter,
                home_lat: config.home_lat,
                home_lon: config.home_lon,
                radius_mi: config.radius_mi,
            },
            watchlist,
            cooldowns: CooldownTracker::new(config.cooldown_secs),
        }
    }

    /// Evaluate one poll batch. Records are checked in feed order and
    /// emitted alerts keep that order.
    pub fn evaluate(&mut self, records: &[AircraftRecord], now: f64) -> Vec<AlertEvent> {
        self.evaluate_with(records, now, &mut NullSink)
    }

    /// Evaluate one poll batch, reporting decisions to `sink`.
    pub fn evaluate_with(
        &mut self,
        records: &[AircraftRecord],
        now: f64,
        sink: &mut dyn DecisionSink,
    ) -> Vec<AlertEvent> {
        let mut events = Vec::new();
        for record in records {
            self.check_squawk(record, now, sink, &mut events);
            self.check_watchlist(record, now, sink, &mut events);
        }
        events
    }

    /// Squawk alerts fire on catalog hit + cooldown; no altitude or
    /// geofence gating.
    fn check_squawk(
        &mut self,
        record: &AircraftRecord,
        now: f64,
        sink: &mut dyn DecisionSink,
        events: &mut Vec<AlertEvent>,
    ) {
        let meaning = match squawk::lookup(&record.squawk) {
            Some(m) => m,
            None => return,
        };
        if !self.cooldowns.should_fire(AlertKind::Squawk, &record.hex, now) {
            sink.decision(Decision::CooldownSuppressed {
                kind: AlertKind::Squawk,
                hex: record.hex.clone(),
            });
            return;
        }
        sink.decision(Decision::Matched {
            kind: AlertKind::Squawk,
            hex: record.hex.clone(),
        });
        events.push(AlertEvent {
            record: record.clone(),
            rule: AlertRule::Squawk {
                code: record.squawk.clone(),
                meaning,
            },
            timestamp: now,
        });
        self.cooldowns.record(AlertKind::Squawk, &record.hex, now);
    }

    /// Watchlist alerts fire on first index match, gated by altitude AND
    /// geofence, then cooldown. Exact and wildcard matches are gated
    /// identically.
    fn check_watchlist(
        &mut self,
        record: &AircraftRecord,
        now: f64,
        sink: &mut dyn DecisionSink,
        events: &mut Vec<AlertEvent>,
    ) {
        let entry = match self.watchlist.find(&record.hex, &record.flight) {
            Some(e) => e.clone(),
            None => return,
        };
        if !self.altitude.passes(record.alt_baro, record.alt_geom)
            || !self.geofence.passes(record.lat, record.lon)
        {
            sink.decision(Decision::FilterRejected {
                hex: record.hex.clone(),
                key: entry.key.clone(),
            });
            return;
        }
        if !self
            .cooldowns
            .should_fire(AlertKind::Watchlist, &record.hex, now)
        {
            sink.decision(Decision::CooldownSuppressed {
                kind: AlertKind::Watchlist,
                hex: record.hex.clone(),
            });
            return;
        }
        sink.decision(Decision::Matched {
            kind: AlertKind::Watchlist,
            hex: record.hex.clone(),
        });
        events.push(AlertEvent {
            record: record.clone(),
            rule: AlertRule::Watchlist { entry },
            timestamp: now,
        });
        self.cooldowns.record(AlertKind::Watchlist, &record.hex, now);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ALT_UNKNOWN, COORD_UNKNOWN};

    fn make_record(hex: &str, flight: &str, squawk: &str) -> AircraftRecord {
        AircraftRecord {
            hex: hex.to_string(),
            flight: flight.to_string(),
            squawk: squawk.to_string(),
            alt_baro: 8000,
            alt_geom: 8000,
            lat: 0.0,
            lon: 0.0,
            gs: Some(420.0),
            track: Some(270.0),
        }
    }

    fn filtered_config() -> EngineConfig {
        EngineConfig {
            altitude_filter: true,
            ceiling_ft: 10_000,
            distance_filter: true,
            radius_mi: 50.0,
            home_lat: 0.0,
            home_lon: 0.0,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_squawk_alert_fires_once_per_window() {
        let mut engine = AlertEngine::new(&filtered_config(), WatchlistIndex::new());
        let rec = make_record("A1B2C3", "", "7700");

        let events = engine.evaluate(&[rec.clone()], 0.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), AlertKind::Squawk);

        // Re-evaluation 10 minutes later: suppressed.
        assert!(engine.evaluate(&[rec.clone()], 600.0).is_empty());

        // 61 minutes later: fires again.
        let events = engine.evaluate(&[rec], 3660.0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_squawk_alert_ignores_filters() {
        let mut engine = AlertEngine::new(&filtered_config(), WatchlistIndex::new());
        let mut rec = make_record("A1B2C3", "", "7700");
        rec.alt_baro = ALT_UNKNOWN;
        rec.alt_geom = ALT_UNKNOWN;
        rec.lat = COORD_UNKNOWN;
        rec.lon = COORD_UNKNOWN;

        let events = engine.evaluate(&[rec], 0.0);
        assert_eq!(events.len(), 1, "squawk alerts are not altitude/geo gated");
    }

    #[test]
    fn test_watchlist_alert_by_flight_is_hex_agnostic() {
        let index = WatchlistIndex::parse("N123AB: Test Aircraft\n");
        let mut engine = AlertEngine::new(&filtered_config(), index);

        let a = make_record("AAA111", "N123AB", "");
        let b = make_record("BBB222", "N123AB", "");
        let events = engine.evaluate(&[a, b], 0.0);

        // Different hex, same flight: both fire (cooldown is hex-keyed).
        assert_eq!(events.len(), 2);
        for e in &events {
            match &e.rule {
                AlertRule::Watchlist { entry } => assert_eq!(entry.label, "Test Aircraft"),
                other => panic!("unexpected rule: {other:?}"),
            }
        }
    }

    #[test]
    fn test_watchlist_altitude_gate() {
        let index = WatchlistIndex::parse("ABC123: Test\n");
        let mut engine = AlertEngine::new(&filtered_config(), index);

        let mut rec = make_record("ABC123", "", "");
        rec.alt_baro = 20_000;
        rec.alt_geom = 20_000;

        let mut decisions: Vec<Decision> = Vec::new();
        let events = engine.evaluate_with(&[rec], 0.0, &mut decisions);
        assert!(events.is_empty());
        assert!(matches!(
            decisions.as_slice(),
            [Decision::FilterRejected { .. }]
        ));
    }

    #[test]
    fn test_watchlist_geofence_gate() {
        let index = WatchlistIndex::parse("ABC123: Test\n");
        let mut engine = AlertEngine::new(&filtered_config(), index);

        let mut rec = make_record("ABC123", "", "");
        rec.lat = 40.0; // ~2760 mi from home (0,0)
        rec.lon = 0.0;

        assert!(engine.evaluate(&[rec], 0.0).is_empty());
    }

    #[test]
    fn test_wildcard_match_gated_like_exact() {
        let index = WatchlistIndex::parse("MIL*: Military\n");
        let mut engine = AlertEngine::new(&filtered_config(), index);

        let mut rec = make_record("ABCDEF", "MIL123", "");
        rec.alt_baro = 20_000;
        rec.alt_geom = 20_000;
        assert!(engine.evaluate(&[rec.clone()], 0.0).is_empty());

        rec.alt_geom = 5_000;
        assert_eq!(engine.evaluate(&[rec], 1.0).len(), 1);
    }

    #[test]
    fn test_both_kinds_fire_same_cycle() {
        let index = WatchlistIndex::parse("ABC123: Watched\n");
        let mut engine = AlertEngine::new(&filtered_config(), index);

        let rec = make_record("ABC123", "", "7700");
        let events = engine.evaluate(&[rec.clone()], 0.0);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind(), AlertKind::Squawk);
        assert_eq!(events[1].kind(), AlertKind::Watchlist);

        // Each kind suppressed independently on the next cycle.
        assert!(engine.evaluate(&[rec], 60.0).is_empty());
    }

    #[test]
    fn test_events_in_feed_order() {
        let index = WatchlistIndex::parse("AAA111: First\nBBB222: Second\n");
        let mut engine = AlertEngine::new(&filtered_config(), index);

        let records = vec![
            make_record("BBB222", "", ""),
            make_record("AAA111", "", ""),
        ];
        let events = engine.evaluate(&records, 0.0);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].record.hex, "BBB222");
        assert_eq!(events[1].record.hex, "AAA111");
    }

    #[test]
    fn test_cooldown_suppression_reported() {
        let mut engine = AlertEngine::new(&EngineConfig::default(), WatchlistIndex::new());
        let rec = make_record("A1B2C3", "", "7500");

        engine.evaluate(&[rec.clone()], 0.0);
        let mut decisions: Vec<Decision> = Vec::new();
        engine.evaluate_with(&[rec], 10.0, &mut decisions);
        assert_eq!(
            decisions,
            vec![Decision::CooldownSuppressed {
                kind: AlertKind::Squawk,
                hex: "A1B2C3".to_string(),
            }]
        );
    }

    #[test]
    fn test_filters_disabled_by_default() {
        let index = WatchlistIndex::parse("ABC123: Test\n");
        let mut engine = AlertEngine::new(&EngineConfig::default(), index);

        let mut rec = make_record("ABC123", "", "");
        rec.alt_baro = ALT_UNKNOWN;
        rec.alt_geom = ALT_UNKNOWN;
        rec.lat = COORD_UNKNOWN;
        rec.lon = COORD_UNKNOWN;

        assert_eq!(engine.evaluate(&[rec], 0.0).len(), 1);
    }

    #[test]
    fn test_no_match_no_events() {
        let index = WatchlistIndex::parse("ABC123: Test\n");
        let mut engine = AlertEngine::new(&EngineConfig::default(), index);

        let rec = make_record("DEF456", "UAL1", "1200");
        assert!(engine.evaluate(&[rec], 0.0).is_empty());
    }
}

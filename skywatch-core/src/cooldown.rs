//! Per-aircraft alert cooldown ledgers.
//!
//! One ledger per alert kind, keyed by hex address only — an aircraft
//! broadcasting a changing callsign is still deduplicated by its fixed
//! transponder address. A squawk alert and a watchlist alert for the same
//! aircraft never suppress each other.

use std::collections::HashMap;

use crate::types::AlertKind;

/// Reference cooldown window in seconds.
pub const DEFAULT_COOLDOWN_SECS: f64 = 3600.0;

/// Tracks the last-fired timestamp per (alert kind, hex).
///
/// Ledgers grow for the process lifetime; the aircraft population turning
/// through a feed is bounded and the process is restarted periodically.
#[derive(Debug, Clone)]
pub struct CooldownTracker {
    window_secs: f64,
    squawk: HashMap<String, f64>,
    watchlist: HashMap<String, f64>,
}

impl CooldownTracker {
    pub fn new(window_secs: f64) -> Self {
        CooldownTracker {
            window_secs,
            squawk: HashMap::new(),
            watchlist: HashMap::new(),
        }
    }

    fn ledger(&self, kind: AlertKind) -> &HashMap<String, f64> {
        match kind {
            AlertKind::Squawk => &self.squawk,
            AlertKind::Watchlist => &self.watchlist,
        }
    }

    /// True if no alert of this kind has fired for `hex`, or the window has
    /// elapsed since the last one (boundary inclusive).
    pub fn should_fire(&self, kind: AlertKind, hex: &str, now: f64) -> bool {
        match self.ledger(kind).get(hex) {
            Some(last) => now - last >= self.window_secs,
            None => true,
        }
    }

    /// Record a fired alert. Call exactly once per emission, never before
    /// the fire decision is finalized.
    pub fn record(&mut self, kind: AlertKind, hex: &str, now: f64) {
        let ledger = match kind {
            AlertKind::Squawk => &mut self.squawk,
            AlertKind::Watchlist => &mut self.watchlist,
        };
        ledger.insert(hex.to_string(), now);
    }
}

impl Default for CooldownTracker {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN_SECS)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

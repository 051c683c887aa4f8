//! skywatch-core: Pure alert-evaluation library for live ADS-B feeds.
//!
//! No async, no I/O — just the matching, filtering, and deduplication logic
//! that decides whether a notification fires for an observed aircraft. The
//! `skywatch-daemon` binary supplies feed records and delivers the output.

pub mod cooldown;
pub mod engine;
pub mod filters;
pub mod format;
pub mod squawk;
pub mod types;
pub mod watchlist;

// Re-export commonly used types at crate root
pub use cooldown::{CooldownTracker, DEFAULT_COOLDOWN_SECS};
pub use engine::{AlertEngine, AlertEvent, AlertRule, Decision, DecisionSink, EngineConfig};
pub use filters::{haversine_mi, AltitudeFilter, GeofenceFilter};
pub use format::Enrichment;
pub use types::*;
pub use watchlist::{WatchlistEntry, WatchlistIndex};

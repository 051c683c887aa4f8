//! Watchlist index — ordered match keys against aircraft identity.
//!
//! Keys are either an exact hex address, an exact callsign, or a callsign
//! pattern ending in `*`. Insertion order is match precedence: the first
//! entry whose condition holds wins.

/// One watchlist entry: a match key and its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistEntry {
    pub key: String,
    pub label: String,
}

/// Ordered watchlist, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct WatchlistIndex {
    entries: Vec<WatchlistEntry>,
}

impl WatchlistIndex {
    pub fn new() -> Self {
        WatchlistIndex {
            entries: Vec::new(),
        }
    }

    /// Append an entry. Keys are uppercased at load time to match the
    /// case-normalized hex and flight fields.
    pub fn push(&mut self, key: &str, label: &str) {
        self.entries.push(WatchlistEntry {
            key: key.trim().to_ascii_uppercase(),
            label: label.trim().to_string(),
        });
    }

    /// Parse the `KEY: LABEL` line format. Lines without a `:` separator
    /// are skipped.
    pub fn parse(text: &str) -> Self {
        let mut index = WatchlistIndex::new();
        for line in text.lines() {
            if let Some((key, label)) = line.split_once(':') {
                if key.trim().is_empty() {
                    continue;
                }
                index.push(key, label);
            }
        }
        index
    }

    /// First entry matching this aircraft, or `None`.
    ///
    /// Wildcard keys (trailing `*`) match against the flight only; exact
    /// keys match either the hex address or the flight. An empty flight can
    /// still match a bare `*` pattern — accepted feed behavior.
    pub fn find(&self, hex: &str, flight: &str) -> Option<&WatchlistEntry> {
        self.entries.iter().find(|entry| {
            if let Some(prefix) = entry.key.strip_suffix('*') {
                flight.starts_with(prefix)
            } else {
                entry.key == hex || entry.key == flight
            }
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Squawk catalog — transponder codes worth alerting on.

/// Known alert-worthy squawk codes and their meanings.
///
/// Add or remove entries as needed; codes are matched as exact strings.
pub const SQUAWK_TABLE: &[(&str, &str)] = &[
    ("7500", "Aircraft Hijacking"),
    ("7600", "Radio Failure"),
    ("7700", "Emergency"),
    ("5000", "NORAD"),
    ("5400", "NORAD"),
    ("6100", "NORAD"),
    ("6400", "NORAD"),
    ("7777", "Military intercept"),
    ("0000", "Discrete VFR operations"),
    ("1277", "Search & Rescue"),
];

/// Look up the meaning of a squawk code. Returns `None` for codes that
/// are not alert-worthy.
pub fn lookup(code: &str) -> Option<&'static str> {
    SQUAWK_TABLE
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, meaning)| *meaning)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

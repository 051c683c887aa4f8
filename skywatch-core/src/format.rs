//! Notification text rendering.
//!
//! One formatter for both alert kinds, over an optional enrichment value.
//! Missing enrichment selects the shorter template, never an error.

use crate::engine::{AlertEvent, AlertRule};
use crate::types::ALT_UNKNOWN;

/// Optional per-aircraft reference metadata, looked up by hex externally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrichment {
    pub operator: Option<String>,
    pub aircraft_type: Option<String>,
    pub image_link: Option<String>,
}

fn fmt_alt(alt: i32) -> String {
    if alt == ALT_UNKNOWN {
        "N/A".to_string()
    } else {
        alt.to_string()
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".into())
}

fn fmt_str(s: &str) -> &str {
    if s.is_empty() {
        "N/A"
    } else {
        s
    }
}

/// Render an alert as multi-line notification text.
pub fn render(event: &AlertEvent, enrichment: Option<&Enrichment>) -> String {
    let rec = &event.record;
    let mut lines = Vec::new();

    match &event.rule {
        AlertRule::Squawk { code, meaning } => {
            lines.push("Squawk Alert!".to_string());
            lines.push(format!("Hex: {}", rec.hex));
            lines.push(format!("Squawk: {code} ({meaning})"));
            lines.push(format!("Flight: {}", fmt_str(&rec.flight)));
            lines.push(format!("Altitude: {} ft", fmt_alt(rec.alt_geom)));
        }
        AlertRule::Watchlist { entry } => {
            lines.push("Watchlist Alert!".to_string());
            lines.push(format!("Hex: {}", rec.hex));
            lines.push(format!("Label: {}", entry.label));
            lines.push(format!("Flight: {}", fmt_str(&rec.flight)));
            lines.push(format!("Altitude (GEOM): {} ft", fmt_alt(rec.alt_geom)));
            lines.push(format!("Altitude (Baro): {} ft", fmt_alt(rec.alt_baro)));
        }
    }

    lines.push(format!("Ground Speed: {} knots", fmt_opt(rec.gs)));
    lines.push(format!("Track: {}", fmt_opt(rec.track)));

    if let Some(ctx) = enrichment {
        lines.push(format!(
            "Operator: {}",
            ctx.operator.as_deref().unwrap_or("N/A")
        ));
        lines.push(format!(
            "Type: {}",
            ctx.aircraft_type.as_deref().unwrap_or("N/A")
        ));
        lines.push(format!(
            "Image: {}",
            ctx.image_link.as_deref().unwrap_or("N/A")
        ));
    }

    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Enrichment table loader.
//!
//! Reads the plane-alert-db image CSVs (`$ICAO`, `$Operator`, `$Type`,
//! `#ImageLink` columns) into a hex-keyed map. Missing files or columns
//! degrade to absent enrichment, never an error for the alert path.

use std::collections::HashMap;
use std::path::Path;

use tracing::warn;

use skywatch_core::format::Enrichment;

/// Load and merge enrichment CSVs. Later files win on duplicate hex keys.
pub fn load_enrichment(paths: &[impl AsRef<Path>]) -> HashMap<String, Enrichment> {
    let mut table = HashMap::new();
    for path in paths {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => parse_csv(&text, &mut table),
            Err(e) => warn!("skipping enrichment file {}: {e}", path.display()),
        }
    }
    table
}

/// Parse one CSV file into the table. The header row names the columns;
/// rows without a `$ICAO` value are skipped.
fn parse_csv(text: &str, table: &mut HashMap<String, Enrichment>) {
    let mut lines = text.lines();
    let header = match lines.next() {
        Some(h) => split_csv_line(h),
        None => return,
    };
    let col = |name: &str| header.iter().position(|h| h == name);

    let icao_col = match col("$ICAO") {
        Some(i) => i,
        None => return,
    };
    let operator_col = col("$Operator");
    let type_col = col("$Type");
    let image_col = col("#ImageLink");

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(line);
        let hex = match fields.get(icao_col) {
            Some(v) if !v.is_empty() => v.trim().to_ascii_uppercase(),
            _ => continue,
        };
        let get = |idx: Option<usize>| {
            idx.and_then(|i| fields.get(i))
                .filter(|v| !v.is_empty())
                .cloned()
        };
        table.insert(
            hex,
            Enrichment {
                operator: get(operator_col),
                aircraft_type: get(type_col),
                image_link: get(image_col),
            },
        );
    }
}

/// Split a CSV line honoring double-quoted fields (with `""` escapes).
pub(crate) fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

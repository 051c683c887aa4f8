//! Reference-data refresh: download plane-alert-db source CSVs and rebuild
//! the watchlist file. One-shot operations invoked as subcommands.

use std::io::Write;
use std::path::Path;

use tracing::info;

use skywatch_core::types::{Result, SkywatchError};

use crate::enrich::split_csv_line;

/// Upstream source for watchlist and image CSVs.
pub const PLANE_ALERT_DB_URL: &str =
    "https://raw.githubusercontent.com/sdr-enthusiasts/plane-alert-db/main/";

/// Download the list CSVs, rotate the existing watchlist to `.old`, and
/// regenerate it from the downloaded rows.
pub async fn update_lists(
    base_url: &str,
    files: &[String],
    watchlist_path: &Path,
    assume_yes: bool,
) -> Result<()> {
    if !assume_yes && !confirm("Rename and download the list files?") {
        info!("update-lists cancelled");
        return Ok(());
    }

    rotate_old(watchlist_path)?;
    let client = reqwest::Client::new();
    for file in files {
        download(&client, base_url, file).await?;
    }

    let count = build_watchlist(files, watchlist_path)?;
    info!(
        "wrote {count} watchlist entries to {}",
        watchlist_path.display()
    );
    Ok(())
}

/// Download fresh copies of the image CSVs, rotating existing files to `.old`.
pub async fn update_images(base_url: &str, files: &[String], assume_yes: bool) -> Result<()> {
    if !assume_yes && !confirm("Rename and download the image files?") {
        info!("update-images cancelled");
        return Ok(());
    }

    let client = reqwest::Client::new();
    for file in files {
        rotate_old(Path::new(file))?;
        download(&client, base_url, file).await?;
    }
    Ok(())
}

fn confirm(prompt: &str) -> bool {
    print!("{prompt} (y/n): ");
    let _ = std::io::stdout().flush();
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    answer.trim().eq_ignore_ascii_case("y")
}

/// Rename an existing file to `<name>.old`, replacing any previous `.old`.
fn rotate_old(path: &Path) -> Result<()> {
    if path.exists() {
        let mut old = path.as_os_str().to_owned();
        old.push(".old");
        std::fs::rename(path, &old)?;
    }
    Ok(())
}

async fn download(client: &reqwest::Client, base_url: &str, file: &str) -> Result<()> {
    let url = format!("{base_url}{file}");
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| SkywatchError::Feed(e.to_string()))?;
    if !response.status().is_success() {
        return Err(SkywatchError::Feed(format!(
            "download of {url} returned status {}",
            response.status()
        )));
    }
    let body = response
        .bytes()
        .await
        .map_err(|e| SkywatchError::Feed(e.to_string()))?;
    std::fs::write(file, &body)?;
    info!("downloaded {file}");
    Ok(())
}

/// Regenerate the watchlist from downloaded CSVs: one `ICAO: description`
/// line per row, description combining operator, type, and tags.
fn build_watchlist(files: &[String], out_path: &Path) -> Result<usize> {
    let mut out = std::fs::File::create(out_path)?;
    let mut count = 0usize;

    for file in files {
        let text = std::fs::read_to_string(file)?;
        count += append_rows(&text, &mut out)?;
    }
    Ok(count)
}

fn append_rows(text: &str, out: &mut impl Write) -> Result<usize> {
    let mut lines = text.lines();
    let header = match lines.next() {
        Some(h) => split_csv_line(h),
        None => return Ok(0),
    };
    let col = |name: &str| header.iter().position(|h| h == name);
    let icao_col = match col("$ICAO") {
        Some(i) => i,
        None => {
            return Err(SkywatchError::Watchlist(
                "list CSV missing $ICAO column".to_string(),
            ))
        }
    };
    let operator_col = col("$Operator");
    let type_col = col("$Type");
    let tag_cols = [col("$Tag 1"), col("$#Tag 2"), col("$#Tag 3")];

    let mut count = 0usize;
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(line);
        let field = |idx: Option<usize>| -> &str {
            idx.and_then(|i| fields.get(i))
                .map(|v| v.trim())
                .filter(|v| !v.is_empty() && *v != "None")
                .unwrap_or("")
        };

        let icao = match fields.get(icao_col).map(|v| v.trim()) {
            Some(v) if !v.is_empty() => v,
            _ => continue,
        };

        let operator = field(operator_col);
        let aircraft_type = field(type_col);
        let tags: Vec<&str> = tag_cols
            .iter()
            .map(|c| field(*c))
            .filter(|t| !t.is_empty())
            .collect();

        let description = if operator.is_empty() && aircraft_type.is_empty() {
            "Unknown or Private ICAO".to_string()
        } else if tags.is_empty() {
            format!("{operator} {aircraft_type}").trim().to_string()
        } else {
            format!(
                "{} Tags: {}",
                format!("{operator} {aircraft_type}").trim(),
                tags.join(", ")
            )
        };

        writeln!(out, "{icao}: {description}")?;
        count += 1;
    }
    Ok(count)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_to_string(text: &str) -> (String, usize) {
        let mut buf = Vec::new();
        let count = append_rows(text, &mut buf).unwrap();
        (String::from_utf8(buf).unwrap(), count)
    }

    #[test]
    fn test_append_rows_operator_and_type() {
        let text = "$ICAO,$Operator,$Type,$Tag 1,$#Tag 2,$#Tag 3\n\
                    A1B2C3,United Airlines,Boeing 737,,,\n";
        let (out, count) = rows_to_string(text);
        assert_eq!(count, 1);
        assert_eq!(out, "A1B2C3: United Airlines Boeing 737\n");
    }

    #[test]
    fn test_append_rows_with_tags() {
        let text = "$ICAO,$Operator,$Type,$Tag 1,$#Tag 2,$#Tag 3\n\
                    A1B2C3,USAF,C-17,Military,Cargo,\n";
        let (out, _) = rows_to_string(text);
        assert_eq!(out, "A1B2C3: USAF C-17 Tags: Military, Cargo\n");
    }

    #[test]
    fn test_append_rows_unknown_icao() {
        let text = "$ICAO,$Operator,$Type,$Tag 1,$#Tag 2,$#Tag 3\n\
                    A1B2C3,,,,,\n";
        let (out, _) = rows_to_string(text);
        assert_eq!(out, "A1B2C3: Unknown or Private ICAO\n");
    }

    #[test]
    fn test_append_rows_missing_icao_column_errors() {
        let mut buf = Vec::new();
        assert!(append_rows("$Operator,$Type\nUnited,737\n", &mut buf).is_err());
    }

    #[test]
    fn test_rotate_old() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watchlist.txt");
        std::fs::write(&path, "old content").unwrap();

        rotate_old(&path).unwrap();
        assert!(!path.exists());
        let old = dir.path().join("watchlist.txt.old");
        assert_eq!(std::fs::read_to_string(old).unwrap(), "old content");
    }

    #[test]
    fn test_rotate_old_missing_file_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        assert!(rotate_old(&dir.path().join("absent.txt")).is_ok());
    }

    #[test]
    fn test_build_watchlist_output_parses_as_index() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("list.csv");
        std::fs::write(
            &csv,
            "$ICAO,$Operator,$Type,$Tag 1,$#Tag 2,$#Tag 3\n\
             ABC123,Test Op,Test Type,,,\n",
        )
        .unwrap();
        let out = dir.path().join("watchlist.txt");

        let count = build_watchlist(&[csv.to_str().unwrap().to_string()], &out).unwrap();
        assert_eq!(count, 1);

        let index =
            skywatch_core::WatchlistIndex::parse(&std::fs::read_to_string(&out).unwrap());
        assert_eq!(index.find("ABC123", "").unwrap().label, "Test Op Test Type");
    }
}

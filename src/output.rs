//! Rendering and persistence for a join [`Summary`].
//!
//! The text report is the primary output. JSON and CSV append are available
//! for feeding the numbers into other tools.

use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt;
use std::fs::{self, OpenOptions};
use tracing::debug;

use crate::stats::Summary;

/// Renders `value` in plain decimal notation with at least one fractional
/// digit: `4.0`, `0.00001`, `10000000000000000.0`.
fn decimal(value: f64) -> String {
    let s = value.to_string();
    if value.is_finite() && !s.contains('.') {
        format!("{s}.0")
    } else {
        s
    }
}

/// Writes the plain-text report to `out`.
pub fn write_text<W: fmt::Write>(out: &mut W, summary: &Summary) -> fmt::Result {
    writeln!(out, "Valid Points per Type:")?;
    for (kind, count) in summary.type_counts() {
        writeln!(out, "{kind}: {count}")?;
    }

    writeln!(out, "\nAverage Rating per Type:")?;
    for (kind, average) in summary.type_averages() {
        writeln!(out, "{kind}: {}", decimal(average))?;
    }

    if let Some(top) = &summary.most_reviewed {
        writeln!(
            out,
            "\nLocation with Highest Reviews: {} ({} reviews) | Latitude: {} | Longitude: {}",
            top.metadata.id,
            top.metadata.reviews,
            decimal(top.location.latitude),
            decimal(top.location.longitude)
        )?;
    }

    writeln!(
        out,
        "\nInvalid Locations (Present only in locations.json, missing in metadata.json):"
    )?;
    if summary.invalid_locations.is_empty() {
        writeln!(out, "No invalid locations found.")?;
    }
    for loc in &summary.invalid_locations {
        writeln!(
            out,
            "Invalid Location ID: {} | Latitude: {} | Longitude: {}",
            loc.id,
            decimal(loc.latitude),
            decimal(loc.longitude)
        )?;
    }

    Ok(())
}

/// Builds the plain-text report as a `String`.
pub fn render_text(summary: &Summary) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_text(&mut out, summary)?;
    Ok(out)
}

/// Logs the summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &Summary) {
    debug!("{:#?}", summary);
}

/// Prints the summary to stdout as pretty-printed JSON.
pub fn print_json(summary: &Summary) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// One CSV row: the aggregate for a single type at the time of the run.
#[derive(Debug, Serialize)]
struct TypeRecord<'a> {
    timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    kind: &'a str,
    count: usize,
    rating_sum: f64,
    average_rating: f64,
}

/// Appends one row per type to a CSV file.
///
/// Writes headers when the file is missing or empty. All rows of one call
/// share a timestamp.
pub fn append_record(path: &str, summary: &Summary) -> anyhow::Result<()> {
    let has_content = fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);
    debug!(path, has_content, rows = summary.type_stats.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!has_content)
        .from_writer(file);

    let timestamp = Utc::now();
    for (kind, stats) in &summary.type_stats {
        writer.serialize(TypeRecord {
            timestamp,
            kind,
            count: stats.count,
            rating_sum: stats.rating_sum,
            average_rating: stats.average_rating,
        })?;
    }
    writer.flush()?;

    Ok(())
}

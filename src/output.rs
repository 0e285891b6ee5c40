//! Output formatting and persistence for comparison results.
//!
//! Supports pretty-printing, JSON serialization, a fixed-width summary table,
//! a text histogram and CSV append.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::{ComparisonTable, Histogram};

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One CSV line per comparison row.
#[derive(Debug, Serialize)]
struct ComparisonRecord<'a> {
    corridor: &'a str,
    label: &'a str,
    frequency: usize,
    mean: f64,
    mean_diff_pct: f64,
    missing_values: u64,
    color: &'a str,
}

/// Appends the rows of a [`ComparisonTable`] to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, table: &ComparisonTable) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for row in &table.rows {
        writer.serialize(ComparisonRecord {
            corridor: &table.corridor,
            label: &row.label,
            frequency: row.frequency,
            mean: row.mean,
            mean_diff_pct: row.mean_deviation * 100.0,
            missing_values: row.missing_values,
            color: row.color.hex(),
        })?;
    }
    writer.flush()?;

    Ok(())
}

/// Renders the summary table: Frequency, Mean, Mean Diff (%) and Missing Values.
pub fn render_table(table: &ComparisonTable) -> String {
    let width = table
        .rows
        .iter()
        .map(|r| r.label.chars().count())
        .chain(std::iter::once(table.corridor.chars().count()))
        .max()
        .unwrap_or(0)
        .max(10);

    let mut out = String::new();
    let _ = writeln!(out, "{}", table.title());
    let _ = writeln!(
        out,
        "{:<width$} {:>12} {:>10} {:>10} {:>15}",
        table.corridor,
        "Frequency",
        "Mean",
        "Mean Diff",
        "Missing Values"
    );
    for row in &table.rows {
        let _ = writeln!(
            out,
            "{:<width$} {:>12} {:>10} {:>10} {:>15}",
            row.label,
            thousands(row.frequency as u64),
            format!("{:.1}", row.mean),
            format!("{:.1}%", row.mean_deviation * 100.0),
            thousands(row.missing_values),
        );
    }
    out
}

/// Renders every bin of the histogram as `bin | count | bar`.
pub fn render_histogram(histogram: &Histogram) -> String {
    let mut out = String::new();
    for (bin, count) in histogram.dense() {
        let _ = writeln!(out, "{:>4} | {:>6} | {}", bin, count, "#".repeat(count.min(60)));
    }
    if histogram.out_of_range > 0 {
        let _ = writeln!(out, "out of range: {}", histogram.out_of_range);
    }
    out
}

/// Formats an integer with `,` thousands separators.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

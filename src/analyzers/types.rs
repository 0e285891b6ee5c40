//! Data types used by the aggregation pipeline.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::analyzers::color::DeviationColor;
use crate::store::Observation;

/// Lower bound of the first difference bin.
pub const HISTOGRAM_MIN: i32 = -20;
/// Exclusive upper bound of the last difference bin.
pub const HISTOGRAM_MAX: i32 = 21;

/// A traffic metric carried by every observation, with its paired missing-count column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    Speed,
    Occupancy,
    Volume,
}

impl Metric {
    /// Fixed concatenation order of the comparison table.
    pub const ALL: [Metric; 3] = [Metric::Speed, Metric::Occupancy, Metric::Volume];

    pub fn value(&self, row: &Observation) -> Option<f64> {
        match self {
            Metric::Speed => row.avg_speed,
            Metric::Occupancy => row.avg_occupancy,
            Metric::Volume => row.avg_volume,
        }
    }

    pub fn missing(&self, row: &Observation) -> u32 {
        match self {
            Metric::Speed => row.missing_speed,
            Metric::Occupancy => row.missing_occ,
            Metric::Volume => row.missing_vol,
        }
    }

    /// Name of the metric column in the record store.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Speed => "avg_speed",
            Metric::Occupancy => "avg_occupancy",
            Metric::Volume => "avg_volume",
        }
    }

    /// Name of the paired missing-count column.
    pub fn missing_column(&self) -> &'static str {
        match self {
            Metric::Speed => "missing_speed",
            Metric::Occupancy => "missing_occ",
            Metric::Volume => "missing_vol",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Speed => "Speed",
            Metric::Occupancy => "Occupancy",
            Metric::Volume => "Volume",
        }
    }

    /// Bar-chart position: Volume at the bottom, Speed at the top.
    pub fn display_rank(&self) -> u8 {
        match self {
            Metric::Volume => 0,
            Metric::Occupancy => 1,
            Metric::Speed => 2,
        }
    }

    pub fn parse(value: &str) -> Option<Metric> {
        match value.to_ascii_lowercase().as_str() {
            "speed" => Some(Metric::Speed),
            "occupancy" | "occ" => Some(Metric::Occupancy),
            "volume" | "vol" => Some(Metric::Volume),
            _ => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Grouped statistics for one metric. `None` means "no value", never zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub frequency: usize,
    pub mean: Option<f64>,
    pub mean_deviation: Option<f64>,
    pub missing_values: u64,
}

impl SummaryRow {
    /// Row for a metric whose filtered group is empty.
    pub fn empty(label: &str) -> Self {
        Self {
            label: label.to_string(),
            frequency: 0,
            mean: None,
            mean_deviation: None,
            missing_values: 0,
        }
    }
}

/// A summary row after the presentation boundary: missing values shown as 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub label: String,
    pub frequency: usize,
    pub mean: f64,
    pub mean_deviation: f64,
    pub missing_values: u64,
    pub order: u8,
    pub color: DeviationColor,
}

/// Speed, Occupancy and Volume rows for one corridor, in that order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub corridor: String,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn title(&self) -> String {
        format!("{} Summary", self.corridor)
    }

    /// Rows sorted by display rank, as the mean-difference bar chart draws them.
    pub fn chart_rows(&self) -> Vec<&ComparisonRow> {
        let mut rows: Vec<&ComparisonRow> = self.rows.iter().collect();
        rows.sort_by_key(|r| r.order);
        rows
    }
}

/// Device counts per one-unit difference bin, keyed by the bin's lower bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Histogram {
    pub bins: BTreeMap<i32, usize>,
    /// Devices whose difference fell outside `[HISTOGRAM_MIN, HISTOGRAM_MAX)`.
    pub out_of_range: usize,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn count(&self, bin: i32) -> usize {
        self.bins.get(&bin).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.bins.values().sum()
    }

    /// Every bin from `HISTOGRAM_MIN` to `HISTOGRAM_MAX - 1`, zero-filled.
    pub fn dense(&self) -> Vec<(i32, usize)> {
        (HISTOGRAM_MIN..HISTOGRAM_MAX)
            .map(|bin| (bin, self.count(bin)))
            .collect()
    }
}

/// Everything the presentation layer needs after one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub table: ComparisonTable,
    pub distribution: Histogram,
    pub selected_rows: usize,
}

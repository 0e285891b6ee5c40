//! Record Store: the normalized per-sensor, per-hour-bucket observation table.
//!
//! The store is loaded once from a CSV produced by the upstream normalizer and
//! is never mutated afterwards. Every analyzer borrows rows from it.

use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ExplorerError, Result};

/// Columns the normalized table must carry, in canonical order.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "device_id",
    "corridor",
    "date",
    "day_of_week",
    "hour_bucket",
    "avg_speed",
    "avg_occupancy",
    "avg_volume",
    "missing_speed",
    "missing_occ",
    "missing_vol",
];

/// Sentinel corridor for rows without an assigned corridor.
pub const UNSET_CORRIDOR: &str = "N/A";

pub const MIN_HOUR_BUCKET: u8 = 1;
pub const MAX_HOUR_BUCKET: u8 = 8;

/// Weekday of an observation. Weekends are excluded upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Monday" => Ok(DayOfWeek::Monday),
            "Tuesday" => Ok(DayOfWeek::Tuesday),
            "Wednesday" => Ok(DayOfWeek::Wednesday),
            "Thursday" => Ok(DayOfWeek::Thursday),
            "Friday" => Ok(DayOfWeek::Friday),
            other => Err(ExplorerError::parse(
                "day_of_week",
                other,
                "expected a weekday name (Monday - Friday)",
            )),
        }
    }
}

/// One measurement for one device, one date and one hour bucket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Observation {
    pub device_id: String,
    pub corridor: String,
    pub date: NaiveDate,
    pub day_of_week: DayOfWeek,
    pub hour_bucket: u8,

    pub avg_speed: Option<f64>,
    pub avg_occupancy: Option<f64>,
    pub avg_volume: Option<f64>,

    pub missing_speed: u32,
    pub missing_occ: u32,
    pub missing_vol: u32,
}

/// Immutable, in-memory table of [`Observation`] rows.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    rows: Vec<Observation>,
}

impl RecordStore {
    /// Builds a store from already-deserialized rows, checking the row invariants.
    pub fn new(rows: Vec<Observation>) -> Result<Self> {
        for (idx, row) in rows.iter().enumerate() {
            validate_row(idx, row)?;
        }
        Ok(Self { rows })
    }

    /// Loads the normalized CSV at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Schema`] if required columns are absent or a row
    /// breaks the observation invariants.
    #[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let store = Self::from_reader(file)?;
        info!(rows = store.len(), "Record store loaded");
        Ok(store)
    }

    /// Loads the normalized table from any CSV source with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);

        let headers = rdr.headers()?.clone();
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .collect();
        if !missing.is_empty() {
            return Err(ExplorerError::Schema(format!(
                "missing required columns: {}",
                missing.join(", ")
            )));
        }
        debug!(columns = headers.len(), "Header check passed");

        let mut rows = Vec::new();
        for (idx, result) in rdr.deserialize().enumerate() {
            let record: Observation = result.map_err(|e| row_error(idx, e))?;
            rows.push(record);
        }

        Self::new(rows)
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows of one corridor, unfiltered by date or time.
    pub fn corridor_rows(&self, corridor: &str) -> Vec<&Observation> {
        self.rows.iter().filter(|r| r.corridor == corridor).collect()
    }

    /// Distinct corridors, in order of first appearance.
    pub fn corridors(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|r| r.corridor.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Distinct days of week present in the data, in order of first appearance.
    pub fn days_of_week(&self) -> Vec<DayOfWeek> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|r| r.day_of_week)
            .filter(|d| seen.insert(*d))
            .collect()
    }

    /// Day selector options: `All` followed by the days present.
    pub fn day_options(&self) -> Vec<String> {
        std::iter::once(crate::criteria::ALL_DAYS.to_string())
            .chain(self.days_of_week().iter().map(|d| d.to_string()))
            .collect()
    }
}

/// Read failures stay [`ExplorerError::Csv`]; a row that does not fit the
/// observation schema is [`ExplorerError::Schema`].
fn row_error(idx: usize, err: csv::Error) -> ExplorerError {
    match err.kind() {
        csv::ErrorKind::Io(_) => ExplorerError::Csv(err),
        _ => ExplorerError::Schema(format!("row {}: {}", idx, err)),
    }
}

fn validate_row(idx: usize, row: &Observation) -> Result<()> {
    if !(MIN_HOUR_BUCKET..=MAX_HOUR_BUCKET).contains(&row.hour_bucket) {
        return Err(ExplorerError::Schema(format!(
            "row {}: hour_bucket {} outside [{}, {}]",
            idx, row.hour_bucket, MIN_HOUR_BUCKET, MAX_HOUR_BUCKET
        )));
    }
    if row.corridor.is_empty() || row.corridor == "0" {
        return Err(ExplorerError::Schema(format!(
            "row {}: corridor '{}' is not normalized (expected '{}')",
            idx, row.corridor, UNSET_CORRIDOR
        )));
    }
    Ok(())
}

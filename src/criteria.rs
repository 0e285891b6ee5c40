//! Filter criteria for a single dashboard submission.
//!
//! A UI hands over a [`SelectionRequest`] of plain strings; [`SelectionRequest::parse`]
//! turns it into a typed [`FilterCriteria`] or rejects the whole submission.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, Result};
use crate::store::{DayOfWeek, MAX_HOUR_BUCKET, MIN_HOUR_BUCKET};

/// Selector value meaning "every day present in the store".
pub const ALL_DAYS: &str = "All";

/// Date format accepted from the UI.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Display descriptions for hour buckets 1..=8.
pub const HOUR_BUCKET_LABELS: [&str; 8] = [
    "8pm-6am", "6am-7am", "7am-8am", "9am-10am", "10am-2pm", "2pm-4pm", "4pm-6pm", "6pm-8pm",
];

/// Returns the time-of-day description for an hour bucket, if it is in range.
pub fn hour_bucket_label(bucket: u8) -> Option<&'static str> {
    if (MIN_HOUR_BUCKET..=MAX_HOUR_BUCKET).contains(&bucket) {
        Some(HOUR_BUCKET_LABELS[(bucket - MIN_HOUR_BUCKET) as usize])
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DaySelector {
    Specific(DayOfWeek),
    AllDays,
}

impl DaySelector {
    pub fn parse(value: &str) -> Result<Self> {
        if value == ALL_DAYS {
            Ok(DaySelector::AllDays)
        } else {
            Ok(DaySelector::Specific(value.parse()?))
        }
    }
}

impl fmt::Display for DaySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaySelector::Specific(day) => write!(f, "{}", day),
            DaySelector::AllDays => f.write_str(ALL_DAYS),
        }
    }
}

/// Inclusive hour-bucket bounds. An inverted range matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange {
    pub lower: u8,
    pub upper: u8,
}

impl HourRange {
    pub fn new(lower: u8, upper: u8) -> Self {
        Self { lower, upper }
    }

    /// Every bucket, 1 through 8.
    pub fn full() -> Self {
        Self::new(MIN_HOUR_BUCKET, MAX_HOUR_BUCKET)
    }

    pub fn contains(&self, bucket: u8) -> bool {
        self.lower <= bucket && bucket <= self.upper
    }

    /// Parses `"lo-hi"` (or a single bucket `"n"`).
    pub fn parse(value: &str) -> Result<Self> {
        let bound = |s: &str| {
            s.trim()
                .parse::<u8>()
                .map_err(|e| ExplorerError::parse("hour_bucket_range", value, e))
        };
        match value.split_once('-') {
            Some((lo, hi)) => Ok(Self::new(bound(lo)?, bound(hi)?)),
            None => {
                let b = bound(value)?;
                Ok(Self::new(b, b))
            }
        }
    }
}

impl fmt::Display for HourRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lower, self.upper)
    }
}

/// Typed query object for the selection filter. Both date bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub corridor: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: DaySelector,
    pub hours: HourRange,
}

/// Raw criteria as supplied by a UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub corridor: String,
    pub start_date: String,
    pub end_date: String,
    pub day_of_week: String,
    pub hour_bucket_range: (u8, u8),
}

impl SelectionRequest {
    /// # Errors
    ///
    /// Returns [`ExplorerError::Parse`] for a malformed date or an unknown day name.
    pub fn parse(&self) -> Result<FilterCriteria> {
        Ok(FilterCriteria {
            corridor: self.corridor.clone(),
            start_date: parse_date("start_date", &self.start_date)?,
            end_date: parse_date("end_date", &self.end_date)?,
            days: DaySelector::parse(&self.day_of_week)?,
            hours: HourRange::new(self.hour_bucket_range.0, self.hour_bucket_range.1),
        })
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| ExplorerError::parse(field, value, e))
}

//! Error taxonomy for the selection and aggregation engine.
//!
//! Missing metric values, zero-mean divisions and empty selections are not
//! errors; they flow through the analyzers as `None` or empty collections.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    /// A filter value supplied by the caller could not be parsed.
    #[error("Failed to parse {field} '{value}': {reason}")]
    Parse {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// The record store does not match the expected observation schema.
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ExplorerError {
    pub(crate) fn parse(field: &'static str, value: &str, reason: impl ToString) -> Self {
        ExplorerError::Parse {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;

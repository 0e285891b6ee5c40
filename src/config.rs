//! Runtime configuration for the `rtdap_explorer` binary.
//!
//! Values come from environment variables (with optional `.env` support
//! loaded by the caller). CLI flags override the defaults loaded here.
use std::env;

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rtdap_explorer::criteria::{HourRange, parse_date};

/// Read an optional string environment variable with a default value.
macro_rules! env_or {
    ($var_name:expr, $default:expr) => {
        env::var($var_name).unwrap_or_else(|_| $default.to_string())
    };
}

/// Parse an optional date environment variable with a default value.
macro_rules! parse_env_date {
    ($var_name:expr, $default:expr) => {
        parse_date("date", &env_or!($var_name, $default))
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
    };
}

/// Strongly typed application configuration, immutable after loading.
#[derive(Debug, Clone)]
pub struct Config {
    /// Normalized sensor table (CSV).
    pub data_path: String,

    /// Corridor shown when none is requested.
    pub default_corridor: String,

    pub default_start: NaiveDate,
    pub default_end: NaiveDate,
    pub default_hours: HourRange,

    /// Rolling JSON log file.
    pub log_file_path: String,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `RTDAP_DATA_PATH` – normalized sensor CSV (default: `data/vds_table.csv`)
/// - `RTDAP_DEFAULT_CORRIDOR` – default corridor (default: `Dan Ryan Express Lane`)
/// - `RTDAP_DEFAULT_START` / `RTDAP_DEFAULT_END` – default date range
///   (default: `2015-12-31` / `2017-12-31`)
/// - `RTDAP_DEFAULT_HOURS` – default hour-bucket range `lo-hi` (default: `1-2`)
/// - `LOG_FILE_PATH` – JSON log file (default: `logs/rtdap_explorer.log`)
///
/// Returns an error if any variable is set to an invalid value.
pub fn load_from_env() -> Result<Config> {
    let hours = env_or!("RTDAP_DEFAULT_HOURS", "1-2");
    let default_hours = HourRange::parse(&hours)
        .map_err(|e| anyhow!("Invalid RTDAP_DEFAULT_HOURS: {}", e))?;

    Ok(Config {
        data_path: env_or!("RTDAP_DATA_PATH", "data/vds_table.csv"),
        default_corridor: env_or!("RTDAP_DEFAULT_CORRIDOR", "Dan Ryan Express Lane"),
        default_start: parse_env_date!("RTDAP_DEFAULT_START", "2015-12-31"),
        default_end: parse_env_date!("RTDAP_DEFAULT_END", "2017-12-31"),
        default_hours,
        log_file_path: env_or!("LOG_FILE_PATH", "logs/rtdap_explorer.log"),
    })
}

impl Config {
    /// Log the loaded configuration.
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  RTDAP_DATA_PATH        : {}", self.data_path);
        tracing::info!("  RTDAP_DEFAULT_CORRIDOR : {}", self.default_corridor);
        tracing::info!("  RTDAP_DEFAULT_START    : {}", self.default_start);
        tracing::info!("  RTDAP_DEFAULT_END      : {}", self.default_end);
        tracing::info!("  RTDAP_DEFAULT_HOURS    : {}", self.default_hours);
        tracing::info!("  LOG_FILE_PATH          : {}", self.log_file_path);
    }
}

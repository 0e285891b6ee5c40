//! CLI entry point for the RTDAP corridor explorer.
//!
//! Loads the normalized sensor table, runs one selection per invocation and
//! renders the comparison table, the difference distribution or the
//! selectable filter options.

mod config;

use std::ffi::OsStr;
use std::path::Path;

use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand};
use rtdap_explorer::analyzers::analyzer::{analyze, distribution};
use rtdap_explorer::analyzers::types::Metric;
use rtdap_explorer::criteria::{DATE_FORMAT, HourRange, SelectionRequest, hour_bucket_label};
use rtdap_explorer::output::{append_record, print_json, print_pretty, render_histogram, render_table};
use rtdap_explorer::store::RecordStore;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "rtdap_explorer")]
#[command(about = "Explore corridor traffic sensor data against its baseline", long_about = None)]
struct Cli {
    /// Normalized sensor CSV (overrides RTDAP_DATA_PATH)
    #[arg(short, long, global = true)]
    data: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FilterArgs {
    /// Corridor name (defaults to RTDAP_DEFAULT_CORRIDOR)
    #[arg(short, long)]
    corridor: Option<String>,

    /// Start date, YYYY-MM-DD (inclusive)
    #[arg(long)]
    start: Option<String>,

    /// End date, YYYY-MM-DD (inclusive)
    #[arg(long)]
    end: Option<String>,

    /// Day of week, or "All" for every day present in the data
    #[arg(long, default_value = "All")]
    day: String,

    /// Hour-bucket range "lo-hi", buckets 1 to 8
    #[arg(long)]
    hours: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize speed, occupancy and volume for a selection against the corridor baseline
    Summarize {
        #[command(flatten)]
        filter: FilterArgs,

        /// Also print the comparison as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Optional CSV file to append the comparison rows to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show the per-device difference distribution for a metric
    Distribution {
        #[command(flatten)]
        filter: FilterArgs,

        /// Metric to compare: speed, occupancy or volume
        #[arg(short, long, default_value = "speed")]
        metric: String,
    },
    /// List selectable corridors, days of week and hour buckets
    Options,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cfg = config::load_from_env()?;

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&cfg.log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&cfg.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("rtdap_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    cfg.log_config();

    let cli = Cli::parse();
    let data_path = cli.data.clone().unwrap_or_else(|| cfg.data_path.clone());
    let store = RecordStore::load(&data_path)?;

    match cli.command {
        Commands::Summarize {
            filter,
            json,
            output,
        } => {
            let criteria = request(&cfg, filter)?.parse()?;
            let comparison = analyze(&store, &criteria);

            print_pretty(&comparison);
            info!("\n{}", render_table(&comparison.table));

            if json {
                print_json(&comparison)?;
            }
            if let Some(path) = output {
                append_record(&path, &comparison.table)?;
                info!(path = %path, "Comparison rows appended");
            }
        }
        Commands::Distribution { filter, metric } => {
            let metric = Metric::parse(&metric)
                .ok_or_else(|| anyhow!("Unknown metric '{}' (speed, occupancy, volume)", metric))?;
            let criteria = request(&cfg, filter)?.parse()?;
            let histogram = distribution(&store, &criteria, metric);

            info!(
                metric = %metric,
                devices = histogram.total(),
                "{} Difference Distribution\n{}",
                metric,
                render_histogram(&histogram)
            );
        }
        Commands::Options => {
            for corridor in store.corridors() {
                info!(corridor, "Corridor");
            }
            for day in store.day_options() {
                info!(day = %day, "Day of week");
            }
            for bucket in HourRange::full().lower..=HourRange::full().upper {
                info!(
                    bucket,
                    time_of_day = hour_bucket_label(bucket).unwrap_or("?"),
                    "Hour bucket"
                );
            }
        }
    }

    Ok(())
}

/// Builds the raw selection request from CLI flags, falling back to configured defaults.
fn request(cfg: &Config, filter: FilterArgs) -> Result<SelectionRequest> {
    let hours = match filter.hours {
        Some(h) => HourRange::parse(&h)?,
        None => cfg.default_hours,
    };

    Ok(SelectionRequest {
        corridor: filter
            .corridor
            .unwrap_or_else(|| cfg.default_corridor.clone()),
        start_date: filter
            .start
            .unwrap_or_else(|| cfg.default_start.format(DATE_FORMAT).to_string()),
        end_date: filter
            .end
            .unwrap_or_else(|| cfg.default_end.format(DATE_FORMAT).to_string()),
        day_of_week: filter.day,
        hour_bucket_range: (hours.lower, hours.upper),
    })
}

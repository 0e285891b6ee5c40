use tracing::{debug, info, warn};

use crate::analyzers::aggregate::summarize_corridor;
use crate::analyzers::baseline::baseline;
use crate::analyzers::comparison::build_table;
use crate::analyzers::distribution::difference_distribution;
use crate::analyzers::filter::select;
use crate::analyzers::types::{Comparison, Histogram, Metric, SummaryRow};
use crate::criteria::{FilterCriteria, SelectionRequest};
use crate::error::Result;
use crate::store::{Observation, RecordStore};

/// Baseline and summary per metric for an already-filtered selection of
/// `corridor`, in [`Metric::ALL`] order.
///
/// Values stay `Option` here; nothing is zero-filled.
pub fn summarize_rows(
    store: &RecordStore,
    corridor: &str,
    selected: &[&Observation],
) -> Vec<(Metric, Vec<SummaryRow>)> {
    Metric::ALL
        .iter()
        .map(|&metric| {
            let base = baseline(store, corridor, metric);
            if base.is_none() {
                warn!(corridor, column = metric.column(), "No baseline available");
            }
            debug!(
                column = metric.column(),
                missing_column = metric.missing_column(),
                baseline = ?base,
                "Summarizing metric"
            );
            (metric, summarize_corridor(selected, base, metric))
        })
        .collect()
}

/// Filters the store for `criteria` and summarizes the selection.
pub fn summarize_selection(
    store: &RecordStore,
    criteria: &FilterCriteria,
) -> Vec<(Metric, Vec<SummaryRow>)> {
    let selected = select(store, criteria);
    summarize_rows(store, &criteria.corridor, &selected)
}

/// Distribution of per-device `metric` differences between the whole of
/// `corridor` and an already-filtered selection.
pub fn distribution_rows(
    store: &RecordStore,
    corridor: &str,
    selected: &[&Observation],
    metric: Metric,
) -> Histogram {
    let full = store.corridor_rows(corridor);
    difference_distribution(&full, selected, metric)
}

/// Filters the store for `criteria` and builds the difference distribution.
pub fn distribution(store: &RecordStore, criteria: &FilterCriteria, metric: Metric) -> Histogram {
    let selected = select(store, criteria);
    distribution_rows(store, &criteria.corridor, &selected, metric)
}

/// Runs one full submission: baseline, filter, aggregate, build.
///
/// The store is filtered exactly once. Pure with respect to the store; callers
/// own any session state and simply call this again on each submission.
#[tracing::instrument(skip(store), fields(corridor = %criteria.corridor, days = %criteria.days, hours = %criteria.hours))]
pub fn analyze(store: &RecordStore, criteria: &FilterCriteria) -> Comparison {
    let selected = select(store, criteria);
    let summaries = summarize_rows(store, &criteria.corridor, &selected);
    let table = build_table(&criteria.corridor, &summaries);
    let distribution = distribution_rows(store, &criteria.corridor, &selected, Metric::Speed);

    info!(
        selected_rows = selected.len(),
        distribution_devices = distribution.total(),
        "Comparison computed"
    );

    Comparison {
        table,
        distribution,
        selected_rows: selected.len(),
    }
}

/// Parses a raw UI request and runs [`analyze`]. A parse failure rejects the
/// submission before any computation.
pub fn submit(store: &RecordStore, request: &SelectionRequest) -> Result<Comparison> {
    let criteria = request.parse()?;
    Ok(analyze(store, &criteria))
}

use std::collections::BTreeMap;

use crate::analyzers::types::{Metric, SummaryRow};
use crate::analyzers::utility::mean;
use crate::store::Observation;

/// Groups `rows` by `group_key` and summarizes `metric` for each group.
///
/// Each group gets its frequency, null-skipping mean, deviation from `baseline`
/// and the summed missing-reading count. The group key is replaced by `label`
/// in the output so summaries of different metrics can be stacked. Groups come
/// out in key order; an empty input produces no rows.
pub fn summarize<K, F>(
    rows: &[&Observation],
    group_key: F,
    baseline: Option<f64>,
    metric: Metric,
    label: &str,
) -> Vec<SummaryRow>
where
    K: Ord,
    F: Fn(&Observation) -> K,
{
    let mut groups: BTreeMap<K, Vec<&Observation>> = BTreeMap::new();
    for &row in rows {
        groups.entry(group_key(row)).or_default().push(row);
    }

    groups
        .into_values()
        .map(|group| {
            let group_mean = mean(group.iter().map(|r| metric.value(r)));

            SummaryRow {
                label: label.to_string(),
                frequency: group.len(),
                mean: group_mean,
                mean_deviation: mean_deviation(baseline, group_mean),
                missing_values: group.iter().map(|r| metric.missing(r) as u64).sum(),
            }
        })
        .collect()
}

/// Summarizes a single-corridor selection, labelled with the metric name.
pub fn summarize_corridor(
    rows: &[&Observation],
    baseline: Option<f64>,
    metric: Metric,
) -> Vec<SummaryRow> {
    summarize(
        rows,
        |r| r.corridor.clone(),
        baseline,
        metric,
        metric.label(),
    )
}

/// `(baseline - mean) / mean`; `None` when either side is missing or the mean is zero.
pub fn mean_deviation(baseline: Option<f64>, group_mean: Option<f64>) -> Option<f64> {
    match (baseline, group_mean) {
        (Some(b), Some(m)) if m != 0.0 => Some((b - m) / m),
        _ => None,
    }
}

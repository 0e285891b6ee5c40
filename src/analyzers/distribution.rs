use std::collections::BTreeMap;

use tracing::debug;

use crate::analyzers::types::{HISTOGRAM_MAX, HISTOGRAM_MIN, Histogram, Metric};
use crate::analyzers::utility::mean;
use crate::store::Observation;

/// Per-device mean of `metric`. Devices whose values are all missing map to `None`.
pub fn device_means(rows: &[&Observation], metric: Metric) -> BTreeMap<String, Option<f64>> {
    let mut series: BTreeMap<&str, Vec<Option<f64>>> = BTreeMap::new();
    for &row in rows {
        series
            .entry(row.device_id.as_str())
            .or_default()
            .push(metric.value(row));
    }

    series
        .into_iter()
        .map(|(device, values)| (device.to_string(), mean(values)))
        .collect()
}

/// Per-device `full_mean - filtered_mean` for devices with both means above zero.
///
/// Every device of `full` is kept and looked up in `filtered`; a device absent
/// from `filtered`, or with no value on either side, counts as 0 there and is
/// then dropped by the positivity rule.
pub fn device_differences(
    full: &[&Observation],
    filtered: &[&Observation],
    metric: Metric,
) -> BTreeMap<String, f64> {
    let full_means = device_means(full, metric);
    let filtered_means = device_means(filtered, metric);

    full_means
        .into_iter()
        .filter_map(|(device, full_mean)| {
            let full_mean = full_mean.unwrap_or(0.0);
            let filtered_mean = filtered_means
                .get(&device)
                .copied()
                .flatten()
                .unwrap_or(0.0);

            if full_mean > 0.0 && filtered_mean > 0.0 {
                Some((device, full_mean - filtered_mean))
            } else {
                None
            }
        })
        .collect()
}

/// Bin index for a difference: bins are `[k, k + 1)` for `k` in `[-20, 20]`.
pub fn bin_for(difference: f64) -> Option<i32> {
    let bin = difference.floor();
    if bin >= HISTOGRAM_MIN as f64 && bin < HISTOGRAM_MAX as f64 {
        Some(bin as i32)
    } else {
        None
    }
}

/// Histogram of per-device differences between the corridor-wide and filtered means.
pub fn difference_distribution(
    full: &[&Observation],
    filtered: &[&Observation],
    metric: Metric,
) -> Histogram {
    let differences = device_differences(full, filtered, metric);

    let mut histogram = Histogram::default();
    for difference in differences.values() {
        match bin_for(*difference) {
            Some(bin) => *histogram.bins.entry(bin).or_default() += 1,
            None => histogram.out_of_range += 1,
        }
    }

    debug!(
        metric = %metric,
        devices = differences.len(),
        binned = histogram.total(),
        out_of_range = histogram.out_of_range,
        "Difference distribution built"
    );

    histogram
}

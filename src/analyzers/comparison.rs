use crate::analyzers::color::classify;
use crate::analyzers::types::{ComparisonRow, ComparisonTable, Metric, SummaryRow};

/// Presentation form of a summary row: missing numbers become 0 and the row
/// gets its chart rank and deviation color.
pub fn display_row(metric: Metric, row: &SummaryRow) -> ComparisonRow {
    let mean_deviation = row.mean_deviation.unwrap_or(0.0);

    ComparisonRow {
        label: row.label.clone(),
        frequency: row.frequency,
        mean: row.mean.unwrap_or(0.0),
        mean_deviation,
        missing_values: row.missing_values,
        order: metric.display_rank(),
        color: classify(mean_deviation),
    }
}

/// Stacks the Speed, Occupancy and Volume summaries of one corridor into the
/// comparison table.
///
/// `summaries` pairs each metric with its aggregator output. The table always
/// holds exactly one row per metric in [`Metric::ALL`] order; a metric with no
/// summary (empty selection) shows as a zero-frequency row. When a metric has
/// more than one group only the first is kept, since the table is per corridor.
pub fn build_table(corridor: &str, summaries: &[(Metric, Vec<SummaryRow>)]) -> ComparisonTable {
    let rows = Metric::ALL
        .iter()
        .map(|metric| {
            let summary = summaries
                .iter()
                .find(|(m, _)| m == metric)
                .and_then(|(_, rows)| rows.first())
                .cloned()
                .unwrap_or_else(|| SummaryRow::empty(metric.label()));
            display_row(*metric, &summary)
        })
        .collect();

    ComparisonTable {
        corridor: corridor.to_string(),
        rows,
    }
}

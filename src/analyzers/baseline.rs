use crate::analyzers::types::Metric;
use crate::analyzers::utility::mean;
use crate::store::RecordStore;

/// Corridor-wide mean of `metric`, ignoring date and time.
///
/// Returns `None` when the corridor has no rows or every value is missing.
pub fn baseline(store: &RecordStore, corridor: &str, metric: Metric) -> Option<f64> {
    mean(
        store
            .rows()
            .iter()
            .filter(|r| r.corridor == corridor)
            .map(|r| metric.value(r)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::{observation, store};

    #[test]
    fn test_baseline_scopes_to_corridor() {
        let store = store(vec![
            observation("d1", "X", Some(60.0), 1),
            observation("d2", "X", Some(40.0), 1),
            observation("d3", "Y", Some(10.0), 1),
        ]);

        assert_eq!(baseline(&store, "X", Metric::Speed), Some(50.0));
        assert_eq!(baseline(&store, "Y", Metric::Speed), Some(10.0));
    }

    #[test]
    fn test_baseline_unknown_corridor_is_none() {
        let store = store(vec![observation("d1", "X", Some(60.0), 1)]);
        assert_eq!(baseline(&store, "Z", Metric::Speed), None);
    }

    #[test]
    fn test_baseline_all_missing_is_none() {
        let store = store(vec![
            observation("d1", "X", None, 1),
            observation("d2", "X", None, 2),
        ]);
        assert_eq!(baseline(&store, "X", Metric::Speed), None);
    }

    #[test]
    fn test_baseline_uses_metric_column() {
        let mut row = observation("d1", "X", Some(60.0), 1);
        row.avg_volume = Some(1200.0);
        let store = store(vec![row]);

        assert_eq!(baseline(&store, "X", Metric::Volume), Some(1200.0));
        assert_eq!(baseline(&store, "X", Metric::Occupancy), None);
    }
}

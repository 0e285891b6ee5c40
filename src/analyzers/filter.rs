use std::collections::HashSet;

use tracing::debug;

use crate::criteria::{DaySelector, FilterCriteria};
use crate::store::{DayOfWeek, Observation, RecordStore};

/// Rows matching corridor, inclusive date range, day of week and hour-bucket range.
///
/// `DaySelector::AllDays` resolves to the days actually present in the store.
/// An inverted date or hour range yields an empty selection.
pub fn select<'a>(store: &'a RecordStore, criteria: &FilterCriteria) -> Vec<&'a Observation> {
    let days: HashSet<DayOfWeek> = match criteria.days {
        DaySelector::AllDays => store.days_of_week().into_iter().collect(),
        DaySelector::Specific(day) => HashSet::from([day]),
    };

    let selected: Vec<&Observation> = store
        .rows()
        .iter()
        .filter(|r| {
            r.corridor == criteria.corridor
                && criteria.start_date <= r.date
                && r.date <= criteria.end_date
                && days.contains(&r.day_of_week)
                && criteria.hours.contains(r.hour_bucket)
        })
        .collect();

    debug!(
        corridor = %criteria.corridor,
        days = days.len(),
        selected = selected.len(),
        "Selection filter applied"
    );

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::{date, observation, on, store};
    use crate::criteria::HourRange;

    #[test]
    fn test_select_by_hour_range() {
        let store = store(vec![
            observation("d1", "X", Some(60.0), 1),
            observation("d2", "X", Some(40.0), 1),
            observation("d3", "X", Some(50.0), 2),
        ]);

        let rows = select(&store, &criteria("X", HourRange::new(1, 1)));
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.hour_bucket == 1));
    }

    #[test]
    fn test_select_date_bounds_are_inclusive() {
        let store = store(vec![
            on(observation("d1", "X", Some(1.0), 1), date(2016, 1, 4), DayOfWeek::Monday),
            on(observation("d2", "X", Some(1.0), 1), date(2016, 1, 5), DayOfWeek::Tuesday),
            on(observation("d3", "X", Some(1.0), 1), date(2016, 1, 6), DayOfWeek::Wednesday),
        ]);

        let mut c = criteria("X", HourRange::full());
        c.start_date = date(2016, 1, 4);
        c.end_date = date(2016, 1, 5);

        let ids: Vec<&str> = select(&store, &c).iter().map(|r| r.device_id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d2"]);
    }

    #[test]
    fn test_select_inverted_dates_is_empty() {
        let store = store(vec![observation("d1", "X", Some(1.0), 1)]);

        let mut c = criteria("X", HourRange::full());
        c.start_date = date(2017, 1, 1);
        c.end_date = date(2015, 1, 1);

        assert!(select(&store, &c).is_empty());
    }

    #[test]
    fn test_select_specific_day() {
        let store = store(vec![
            on(observation("d1", "X", Some(1.0), 1), date(2016, 1, 4), DayOfWeek::Monday),
            on(observation("d2", "X", Some(1.0), 1), date(2016, 1, 6), DayOfWeek::Wednesday),
        ]);

        let mut c = criteria("X", HourRange::full());
        c.days = DaySelector::Specific(DayOfWeek::Wednesday);

        let rows = select(&store, &c);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].device_id, "d2");
    }

    #[test]
    fn test_all_days_resolves_to_days_present() {
        let store = store(vec![
            on(observation("d1", "X", Some(1.0), 1), date(2016, 1, 4), DayOfWeek::Monday),
            on(observation("d2", "X", Some(1.0), 1), date(2016, 1, 6), DayOfWeek::Wednesday),
        ]);

        let mut days = store.days_of_week();
        days.sort();
        assert_eq!(days, vec![DayOfWeek::Monday, DayOfWeek::Wednesday]);

        let mut c = criteria("X", HourRange::full());
        c.days = DaySelector::AllDays;
        assert_eq!(select(&store, &c).len(), 2);
    }

    #[test]
    fn test_widest_criteria_matches_corridor_rows() {
        let store = store(vec![
            on(observation("d1", "X", Some(1.0), 1), date(2015, 1, 5), DayOfWeek::Monday),
            on(observation("d2", "X", None, 8), date(2018, 12, 28), DayOfWeek::Friday),
            on(observation("d3", "Y", Some(1.0), 4), date(2016, 6, 1), DayOfWeek::Wednesday),
            on(observation("d4", "X", Some(3.0), 5), date(2016, 6, 2), DayOfWeek::Thursday),
        ]);

        let c = FilterCriteria {
            corridor: "X".to_string(),
            start_date: chrono::NaiveDate::MIN,
            end_date: chrono::NaiveDate::MAX,
            days: DaySelector::AllDays,
            hours: HourRange::full(),
        };

        assert_eq!(select(&store, &c), store.corridor_rows("X"));
    }

    #[test]
    fn test_select_no_match_is_empty() {
        let store = store(vec![observation("d1", "X", Some(1.0), 1)]);
        assert!(select(&store, &criteria("Nowhere", HourRange::full())).is_empty());
    }

    fn criteria(corridor: &str, hours: HourRange) -> FilterCriteria {
        FilterCriteria {
            corridor: corridor.to_string(),
            start_date: date(2015, 1, 1),
            end_date: date(2018, 12, 31),
            days: DaySelector::AllDays,
            hours,
        }
    }
}

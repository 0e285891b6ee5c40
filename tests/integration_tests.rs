use rtdap_explorer::analyzers::analyzer::{analyze, submit, summarize_selection};
use rtdap_explorer::analyzers::baseline::baseline;
use rtdap_explorer::analyzers::color::DeviationColor;
use rtdap_explorer::analyzers::filter::select;
use rtdap_explorer::analyzers::types::Metric;
use rtdap_explorer::criteria::{DaySelector, FilterCriteria, HourRange, SelectionRequest};
use rtdap_explorer::store::{DayOfWeek, RecordStore};

const CORRIDOR: &str = "Dan Ryan Express Lane";

#[test]
fn test_full_pipeline() {
    let store = load_fixture();
    let comparison = submit(&store, &request(CORRIDOR, "All", (1, 1))).expect("submission failed");

    assert_eq!(comparison.selected_rows, 3);
    assert_eq!(comparison.table.title(), "Dan Ryan Express Lane Summary");

    let labels: Vec<&str> = comparison.table.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["Speed", "Occupancy", "Volume"]);

    let speed = &comparison.table.rows[0];
    assert_eq!(speed.frequency, 3);
    assert_close(speed.mean, 50.0);
    assert_close(speed.mean_deviation, -0.1);
    assert_eq!(speed.missing_values, 3);
    assert_eq!(speed.color, DeviationColor::Alert);

    let occupancy = &comparison.table.rows[1];
    assert_close(occupancy.mean, 4.5);
    assert_close(occupancy.mean_deviation, (5.75 - 4.5) / 4.5);
    assert_eq!(occupancy.missing_values, 2);
    assert_eq!(occupancy.color, DeviationColor::Positive);

    let volume = &comparison.table.rows[2];
    assert_close(volume.mean, 900.0);
    assert_eq!(volume.color, DeviationColor::Positive);

    // d1: 55 vs 60, d2: 35 vs 40, d3 has no speed and is dropped
    assert_eq!(comparison.distribution.total(), 2);
    assert_eq!(comparison.distribution.count(-5), 2);
}

#[test]
fn test_baselines_ignore_date_and_time() {
    let store = load_fixture();

    assert_eq!(baseline(&store, CORRIDOR, Metric::Speed), Some(45.0));
    assert_eq!(baseline(&store, CORRIDOR, Metric::Volume), Some(950.0));
    assert_eq!(baseline(&store, "Nowhere", Metric::Speed), None);
}

#[test]
fn test_frequency_matches_linear_scan() {
    let store = load_fixture();

    let hour_ranges = [(1, 1), (1, 2), (2, 3), (1, 8), (4, 8), (3, 1)];
    let days = ["All", "Monday", "Wednesday", "Friday"];
    for corridor in store.corridors() {
        for day in days {
            for hours in hour_ranges {
                let criteria = request(corridor, day, hours).parse().unwrap();

                let expected = store
                    .rows()
                    .iter()
                    .filter(|r| {
                        r.corridor == corridor
                            && r.date >= criteria.start_date
                            && r.date <= criteria.end_date
                            && (day == "All" || r.day_of_week.as_str() == day)
                            && r.hour_bucket >= hours.0
                            && r.hour_bucket <= hours.1
                    })
                    .count();

                let summaries = summarize_selection(&store, &criteria);
                let frequency = summaries[0].1.first().map(|s| s.frequency).unwrap_or(0);
                assert_eq!(frequency, expected, "{corridor} {day} {hours:?}");
                assert_eq!(analyze(&store, &criteria).table.rows[0].frequency, expected);
            }
        }
    }
}

#[test]
fn test_all_days_uses_days_in_store() {
    let store = load_fixture();

    assert_eq!(store.days_of_week(), vec![DayOfWeek::Monday, DayOfWeek::Wednesday]);
    assert_eq!(store.day_options(), vec!["All", "Monday", "Wednesday"]);

    let all = request(CORRIDOR, "All", (1, 8)).parse().unwrap();
    assert_eq!(select(&store, &all).len(), 5);

    let friday = request(CORRIDOR, "Friday", (1, 8)).parse().unwrap();
    assert!(select(&store, &friday).is_empty());
}

#[test]
fn test_widest_selection_equals_corridor_rows() {
    let store = load_fixture();

    for corridor in store.corridors() {
        let criteria = FilterCriteria {
            corridor: corridor.to_string(),
            start_date: chrono::NaiveDate::MIN,
            end_date: chrono::NaiveDate::MAX,
            days: DaySelector::AllDays,
            hours: HourRange::full(),
        };
        assert_eq!(select(&store, &criteria), store.corridor_rows(corridor));
    }
}

#[test]
fn test_inverted_date_range_is_empty_not_error() {
    let store = load_fixture();
    let mut req = request(CORRIDOR, "All", (1, 8));
    req.start_date = "2018-01-01".to_string();
    req.end_date = "2015-01-01".to_string();

    let comparison = submit(&store, &req).unwrap();

    assert_eq!(comparison.selected_rows, 0);
    assert_eq!(comparison.table.rows.len(), 3);
    assert!(comparison.table.rows.iter().all(|r| r.frequency == 0 && r.mean == 0.0));
}

#[test]
fn test_missing_column_fails_at_load() {
    let csv = "device_id,corridor,date,day_of_week,hour_bucket,avg_speed\n";
    assert!(matches!(
        RecordStore::from_reader(csv.as_bytes()),
        Err(rtdap_explorer::ExplorerError::Schema(_))
    ));
}

fn load_fixture() -> RecordStore {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample_vds.csv");
    RecordStore::load(path).expect("Failed to load fixture")
}

fn request(corridor: &str, day: &str, hours: (u8, u8)) -> SelectionRequest {
    SelectionRequest {
        corridor: corridor.to_string(),
        start_date: "2015-12-31".to_string(),
        end_date: "2017-12-31".to_string(),
        day_of_week: day.to_string(),
        hour_bucket_range: hours,
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

//! Fixture builders shared by the analyzer tests.

use chrono::NaiveDate;

use crate::store::{DayOfWeek, Observation, RecordStore};

pub fn observation(device: &str, corridor: &str, speed: Option<f64>, hour: u8) -> Observation {
    Observation {
        device_id: device.to_string(),
        corridor: corridor.to_string(),
        date: date(2016, 3, 1),
        day_of_week: DayOfWeek::Tuesday,
        hour_bucket: hour,
        avg_speed: speed,
        avg_occupancy: None,
        avg_volume: None,
        missing_speed: 0,
        missing_occ: 0,
        missing_vol: 0,
    }
}

pub fn on(mut row: Observation, date: NaiveDate, day: DayOfWeek) -> Observation {
    row.date = date;
    row.day_of_week = day;
    row
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn store(rows: Vec<Observation>) -> RecordStore {
    RecordStore::new(rows).unwrap()
}

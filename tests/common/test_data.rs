//! Test data generation utilities.
//!
//! This module builds a small SQLite climate database with the same layout as
//! the Hawaii reference dataset and a known, deterministic set of readings.

use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection};
use std::path::Path;

type Result<T> = std::result::Result<T, rusqlite::Error>;

/// Stations written to the fixture, with how often each one reports (every n days)
pub const STATIONS: &[(&str, &str, f64, f64, f64, i64)] = &[
    ("USC00519281", "WAIHEE 837.5, HI US", 21.45167, -157.84889, 32.9, 1),
    ("USC00519397", "WAIKIKI 717.2, HI US", 21.2716, -157.8168, 3.0, 2),
    ("USC00513117", "KANEOHE 838.1, HI US", 21.4234, -157.8015, 14.6, 3),
];

/// Most active station in the fixture
pub const MOST_ACTIVE_STATION: &str = "USC00519281";

/// One generated observation
#[derive(Debug, Clone)]
pub struct Row {
    pub station: &'static str,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: Option<f64>,
}

/// Dates covered by the fixture: a few weeks at the start of the dataset and
/// the last thirteen months up to 2017-08-23
fn fixture_dates() -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let ranges = [
        (ymd(2010, 1, 1), ymd(2010, 1, 31)),
        (ymd(2016, 8, 1), ymd(2017, 8, 23)),
    ];
    for (start, end) in ranges {
        let mut day = start;
        while day <= end {
            dates.push(day);
            day += Duration::days(1);
        }
    }
    dates
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// Every row the fixture database contains, in insertion order
pub fn rows() -> Vec<Row> {
    let mut rows = Vec::new();
    for (i, date) in fixture_dates().into_iter().enumerate() {
        let i = i as i64;
        for (s, (station, _, _, _, _, every)) in STATIONS.iter().enumerate() {
            if i % every != 0 {
                continue;
            }
            let seed = i + s as i64 * 7;
            // Every 11th reading has no precipitation, every 17th no temperature
            let prcp = (seed % 11 != 0).then(|| (seed % 40) as f64 / 100.0);
            let tobs = (seed % 17 != 0).then(|| 60.0 + (seed % 25) as f64);
            rows.push(Row {
                station: *station,
                date: date.format("%Y-%m-%d").to_string(),
                prcp,
                tobs,
            });
        }
    }
    rows
}

/// Creates the fixture database at `path`.
pub fn create_test_climate_db(path: &Path) -> Result<()> {
    let mut conn = Connection::open(path)?;

    conn.execute_batch(
        "CREATE TABLE measurement (
            id INTEGER PRIMARY KEY,
            station TEXT,
            date TEXT,
            prcp FLOAT,
            tobs FLOAT
        );
        CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT,
            name TEXT,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT
        );",
    )?;

    let tx = conn.transaction()?;
    for (station, name, lat, lon, elevation, _) in STATIONS {
        tx.execute(
            "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![station, name, lat, lon, elevation],
        )?;
    }
    for row in rows() {
        tx.execute(
            "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
            params![row.station, row.date, row.prcp, row.tobs],
        )?;
    }
    tx.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_spans_reference_bounds() {
        let rows = rows();
        assert_eq!(rows.first().unwrap().date, "2010-01-01");
        assert_eq!(rows.last().unwrap().date, "2017-08-23");
    }

    #[test]
    fn test_most_active_station_reports_daily() {
        let rows = rows();
        let count = |id: &str| rows.iter().filter(|r| r.station == id).count();
        assert!(count(MOST_ACTIVE_STATION) > count("USC00519397"));
        assert!(count("USC00519397") > count("USC00513117"));
    }
}

//! SQLite data access.
//!
//! `Store` is created once at startup and only remembers where the database
//! lives. Each request calls [`Store::open_session`] to get a short-lived
//! read-only connection, runs its queries on the returned [`Session`], and
//! drops it. Nothing in this module writes to the database or knows about HTTP.
//!
//! Dates are compared as strings. That is only correct because every stored
//! date is fixed-width `YYYY-MM-DD`.

use rusqlite::{params, Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{KonaError, Result};
use crate::models::{
    DatasetSummary, Observation, PrecipitationReading, Station, StationActivity,
    TemperatureObservation, TemperatureStats, MEASUREMENT_COLUMNS, MEASUREMENT_TABLE,
    STATION_COLUMNS, STATION_TABLE,
};

/// Handle on a read-only climate database file
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Create a store for an existing database file
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(KonaError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", path.display()),
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a new read-only connection
    pub fn open_session(&self) -> Result<Session> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        debug!(path = %self.path.display(), "Opened read-only session");
        Ok(Session { conn })
    }
}

/// A single read-only connection and the queries the API needs
pub struct Session {
    conn: Connection,
}

impl Session {
    /// Wrap an already open connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// All `(date, prcp)` pairs after `cutoff`, oldest first
    pub fn precipitation_since(&self, cutoff: &str) -> Result<Vec<PrecipitationReading>> {
        let mut stmt = self
            .conn
            .prepare("SELECT date, prcp FROM measurement WHERE date > ?1 ORDER BY date")?;
        let rows = stmt
            .query_map(params![cutoff], |row| {
                Ok(PrecipitationReading(row.get(0)?, row.get(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Stations ordered by number of observations, most active first.
    ///
    /// Equal counts are ordered by station id.
    pub fn station_activity_ranking(&self) -> Result<Vec<StationActivity>> {
        let mut stmt = self.conn.prepare(
            "SELECT station, COUNT(station) FROM measurement \
             GROUP BY station \
             ORDER BY COUNT(station) DESC, station ASC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StationActivity {
                    station_id: row.get(0)?,
                    observations: row.get::<_, i64>(1)? as u64,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// All `(date, tobs)` pairs for one station after `cutoff`, in store order
    pub fn temperatures_for_station_since(
        &self,
        station_id: &str,
        cutoff: &str,
    ) -> Result<Vec<TemperatureObservation>> {
        let mut stmt = self
            .conn
            .prepare("SELECT date, tobs FROM measurement WHERE date > ?1 AND station = ?2")?;
        let rows = stmt
            .query_map(params![cutoff, station_id], |row| {
                Ok(TemperatureObservation {
                    date: row.get(0)?,
                    temperature: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// MIN/AVG/MAX temperature over `date >= start`
    pub fn temperature_stats_from(&self, start: &str) -> Result<Vec<TemperatureStats>> {
        self.temperature_stats(
            "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement WHERE date >= ?1",
            params![start],
        )
    }

    /// MIN/AVG/MAX temperature over `start <= date <= end`
    pub fn temperature_stats_range(&self, start: &str, end: &str) -> Result<Vec<TemperatureStats>> {
        self.temperature_stats(
            "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement \
             WHERE date >= ?1 AND date <= ?2",
            params![start, end],
        )
    }

    fn temperature_stats(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<TemperatureStats>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, |row| {
                Ok(TemperatureStats {
                    min: row.get(0)?,
                    avg: row.get(1)?,
                    max: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Earliest observation date, `None` if there are no observations
    pub fn earliest_date(&self) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row("SELECT MIN(date) FROM measurement", [], |row| row.get(0))?)
    }

    /// Latest observation date, `None` if there are no observations
    pub fn latest_date(&self) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row("SELECT MAX(date) FROM measurement", [], |row| row.get(0))?)
    }

    /// All station metadata rows, ordered by station id
    pub fn stations(&self) -> Result<Vec<Station>> {
        let mut stmt = self.conn.prepare(
            "SELECT station, name, latitude, longitude, elevation FROM station ORDER BY station",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Station {
                    station_id: row.get(0)?,
                    name: row.get(1)?,
                    latitude: row.get(2)?,
                    longitude: row.get(3)?,
                    elevation: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// The first `limit` observations by date
    pub fn sample_observations(&self, limit: usize) -> Result<Vec<Observation>> {
        let mut stmt = self.conn.prepare(
            "SELECT station, date, prcp, tobs FROM measurement ORDER BY date, station LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok(Observation {
                    station_id: row.get(0)?,
                    date: row.get(1)?,
                    precipitation: row.get(2)?,
                    temperature: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Row counts and date span of the dataset
    pub fn dataset_summary(&self) -> Result<DatasetSummary> {
        let observation_count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM measurement", [], |row| row.get(0))?;
        let station_count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM station", [], |row| row.get(0))?;

        Ok(DatasetSummary {
            observation_count: observation_count as u64,
            station_count: station_count as u64,
            earliest_date: self.earliest_date()?,
            latest_date: self.latest_date()?,
        })
    }

    /// Check that both tables exist with the columns the queries rely on
    pub fn verify_schema(&self) -> Result<()> {
        self.verify_table(MEASUREMENT_TABLE, MEASUREMENT_COLUMNS)?;
        self.verify_table(STATION_TABLE, STATION_COLUMNS)
    }

    fn verify_table(&self, table: &str, expected: &[&str]) -> Result<()> {
        let columns: Vec<String> = self
            .conn
            .prepare(&format!("PRAGMA table_info({})", table))?
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        if columns.is_empty() {
            return Err(KonaError::Schema {
                message: format!("Table not found: {}", table),
            });
        }

        let missing: Vec<&str> = expected
            .iter()
            .copied()
            .filter(|name| !columns.iter().any(|c| c.eq_ignore_ascii_case(name)))
            .collect();

        if !missing.is_empty() {
            return Err(KonaError::Schema {
                message: format!("Table {} is missing columns: {}", table, missing.join(", ")),
            });
        }

        Ok(())
    }
}

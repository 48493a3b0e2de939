//! Row and response types for the climate dataset.
//!
//! The two tables are declared here statically; nothing is discovered from
//! the database at runtime apart from the startup schema check.

use serde::{Deserialize, Serialize};

/// Name and columns of the observation table
pub const MEASUREMENT_TABLE: &str = "measurement";
pub const MEASUREMENT_COLUMNS: &[&str] = &["station", "date", "prcp", "tobs"];

/// Name and columns of the station metadata table
pub const STATION_TABLE: &str = "station";
pub const STATION_COLUMNS: &[&str] = &["station", "name", "latitude", "longitude", "elevation"];

/// One station/date reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub station_id: String,
    /// ISO date, `YYYY-MM-DD`
    pub date: String,
    pub precipitation: Option<f64>,
    pub temperature: Option<f64>,
}

/// Station metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub station_id: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// A `(date, precipitation)` pair, serialized as a two-element JSON array
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecipitationReading(pub String, pub Option<f64>);

/// A station together with its number of observations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationActivity {
    pub station_id: String,
    pub observations: u64,
}

/// A dated temperature reading for a single station
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureObservation {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Temperature")]
    pub temperature: Option<f64>,
}

/// One MIN/AVG/MAX aggregate row. All three are `None` when nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureStats {
    #[serde(rename = "Min. Temperature")]
    pub min: Option<f64>,
    #[serde(rename = "Avg. Temperature")]
    pub avg: Option<f64>,
    #[serde(rename = "Max. Temperature")]
    pub max: Option<f64>,
}

/// Size and date span of the loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub observation_count: u64,
    pub station_count: u64,
    pub earliest_date: Option<String>,
    pub latest_date: Option<String>,
}

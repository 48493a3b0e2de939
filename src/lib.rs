//! # kona
//!
//! A small, read-only JSON API over a station climate dataset.
//!
//! The dataset is a SQLite file with two tables: `measurement` (daily
//! precipitation and temperature readings per station) and `station`
//! (station metadata). The server never writes to it.
//!
//! ## Architecture
//!
//! - **Data Layer** ([`store`]): opens short-lived read-only sessions and runs
//!   the range, filter and aggregate queries.
//! - **API Layer** ([`handlers`]): maps the fixed routes onto those queries and
//!   shapes the results into JSON.
//! - **State** ([`state`]): configuration and the store handle, built once at
//!   startup and shared with every handler.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{KonaError, Result};
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_dataset_stats, log_error,
    log_request_error,
};
pub use models::{
    DatasetSummary, Observation, PrecipitationReading, Station, StationActivity,
    TemperatureObservation, TemperatureStats,
};
pub use state::AppState;
pub use store::{Session, Store};

//! Heartbeat endpoint handler.
//!
//! Returns server status information, including uptime and a summary of the
//! dataset being served.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

use super::error_response;
use crate::config::DATE_FORMAT;
use crate::logging::generate_request_id;
use crate::models::DatasetSummary;
use crate::state::AppState;

/// Server ID generated on first use
static SERVER_ID: once_cell::sync::Lazy<String> =
    once_cell::sync::Lazy::new(|| Uuid::new_v4().to_string());

/// Server start time
static START_TIME: once_cell::sync::Lazy<SystemTime> = once_cell::sync::Lazy::new(SystemTime::now);

/// Heartbeat response structure
#[derive(Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Dataset information
    pub dataset: DatasetInfo,
    /// Server status
    pub status: String,
}

/// Dataset information structure
#[derive(Serialize)]
pub struct DatasetInfo {
    /// Database file path
    pub file_path: String,
    /// Rows in the observation table
    pub observation_count: u64,
    /// Rows in the station table
    pub station_count: u64,
    /// Observed date span
    pub earliest_date: Option<String>,
    pub latest_date: Option<String>,
    /// Interval accepted by the stats routes
    pub accepted_range: (String, String),
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();

    let summary = match state.query(|session| session.dataset_summary()).await {
        Ok(summary) => summary,
        Err(error) => return error_response(error, "/heartbeat", &request_id, None),
    };

    let now = SystemTime::now();
    let timestamp = chrono::DateTime::<chrono::Utc>::from(now)
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let uptime = now
        .duration_since(*START_TIME)
        .unwrap_or(Duration::from_secs(0));

    let response = HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: uptime.as_secs(),
        dataset: dataset_info(&state, summary),
        status: "healthy".to_string(),
    };

    Json(response).into_response()
}

fn dataset_info(state: &AppState, summary: DatasetSummary) -> DatasetInfo {
    DatasetInfo {
        file_path: state.store.path().display().to_string(),
        observation_count: summary.observation_count,
        station_count: summary.station_count,
        earliest_date: summary.earliest_date,
        latest_date: summary.latest_date,
        accepted_range: (
            state.bounds.first.format(DATE_FORMAT).to_string(),
            state.bounds.last.format(DATE_FORMAT).to_string(),
        ),
    }
}

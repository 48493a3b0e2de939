//! Temperature statistics endpoint handlers.
//!
//! `/api/v1.0/{start_date}` and `/api/v1.0/{start_date}/{end_date}` return a
//! single MIN/AVG/MAX aggregate row over the selected dates. Unparseable or
//! out-of-bound dates are reported as 404 "not found" rather than 400.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error_response;
use crate::config::DATE_FORMAT;
use crate::error::{KonaError, Result};
use crate::logging::generate_request_id;
use crate::models::TemperatureStats;
use crate::state::AppState;

const START_ENDPOINT: &str = "/api/v1.0/{start_date}";
const RANGE_ENDPOINT: &str = "/api/v1.0/{start_date}/{end_date}";

/// Handle GET /api/v1.0/{start_date} requests
pub async fn start_stats_handler(
    State(state): State<Arc<AppState>>,
    Path(start_date): Path<String>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = START_ENDPOINT,
        request_id = %request_id,
        start_date = %start_date,
        "Processing start date stats request"
    );

    match stats_from(&state, &start_date).await {
        Ok(rows) => {
            let duration = start_time.elapsed();
            info!(
                endpoint = START_ENDPOINT,
                request_id = %request_id,
                duration_us = duration.as_micros() as u64,
                "Start date stats request successful"
            );
            Json(rows).into_response()
        }
        Err(error) => error_response(
            error,
            START_ENDPOINT,
            &request_id,
            Some(&format!("start_date={}", start_date)),
        ),
    }
}

/// Handle GET /api/v1.0/{start_date}/{end_date} requests
pub async fn start_end_stats_handler(
    State(state): State<Arc<AppState>>,
    Path((start_date, end_date)): Path<(String, String)>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = RANGE_ENDPOINT,
        request_id = %request_id,
        start_date = %start_date,
        end_date = %end_date,
        "Processing date range stats request"
    );

    match stats_between(&state, &start_date, &end_date).await {
        Ok(rows) => {
            let duration = start_time.elapsed();
            info!(
                endpoint = RANGE_ENDPOINT,
                request_id = %request_id,
                duration_us = duration.as_micros() as u64,
                "Date range stats request successful"
            );
            Json(rows).into_response()
        }
        Err(error) => error_response(
            error,
            RANGE_ENDPOINT,
            &request_id,
            Some(&format!("start_date={}, end_date={}", start_date, end_date)),
        ),
    }
}

/// Stats over `date >= start_date`.
///
/// The start date must parse and must not be after the dataset's final date.
/// There is no lower bound: an earlier start covers the whole dataset.
async fn stats_from(state: &AppState, start_date: &str) -> Result<Vec<TemperatureStats>> {
    let not_found = || KonaError::DateNotFound {
        message: format!("Start Date '{}' not found in database.", start_date),
    };

    let start = parse_date(start_date).ok_or_else(not_found)?;
    if start > state.bounds.last {
        return Err(not_found());
    }

    let key = start.format(DATE_FORMAT).to_string();
    let rows = state
        .query(move |session| session.temperature_stats_from(&key))
        .await?;

    // Aggregates always yield a row; an empty result means the store misbehaved
    if rows.is_empty() {
        return Err(not_found());
    }

    Ok(rows)
}

/// Stats over `start_date <= date <= end_date`, both within the dataset bounds
async fn stats_between(
    state: &AppState,
    start_date: &str,
    end_date: &str,
) -> Result<Vec<TemperatureStats>> {
    let bounds = state.bounds;
    let not_found = || KonaError::DateNotFound {
        message: format!(
            "Start Date/End Date pair error. Please try again. Note: The minimum start date is {} and the maximum end date is {}.",
            bounds.first.format(DATE_FORMAT),
            bounds.last.format(DATE_FORMAT)
        ),
    };

    let (start, end) = match (parse_date(start_date), parse_date(end_date)) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(not_found()),
    };
    if !bounds.contains(start) || !bounds.contains(end) {
        return Err(not_found());
    }

    let start_key = start.format(DATE_FORMAT).to_string();
    let end_key = end.format(DATE_FORMAT).to_string();
    let rows = state
        .query(move |session| {
            let earliest = session.earliest_date()?;
            let latest = session.latest_date()?;
            debug!(
                earliest_date = ?earliest,
                latest_date = ?latest,
                "Dataset date span"
            );
            session.temperature_stats_range(&start_key, &end_key)
        })
        .await?;

    if rows.is_empty() {
        return Err(not_found());
    }

    Ok(rows)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

//! Stations endpoint handler.
//!
//! Returns station ids as single-element arrays, most observations first.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error_response;
use crate::logging::generate_request_id;
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/stations";

/// Handle GET /api/v1.0/stations requests
pub async fn stations_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        "Processing stations request"
    );

    match state
        .query(|session| session.station_activity_ranking())
        .await
    {
        Ok(ranking) => {
            let duration = start_time.elapsed();
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                duration_us = duration.as_micros() as u64,
                stations = ranking.len(),
                "Stations request successful"
            );

            let entries: Vec<(String,)> = ranking
                .into_iter()
                .map(|activity| (activity.station_id,))
                .collect();
            Json(entries).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, None),
    }
}

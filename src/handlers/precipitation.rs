//! Precipitation endpoint handler.
//!
//! Returns every `[date, precipitation]` pair after the configured cutoff date,
//! oldest first, across all stations.

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

const ENDPOINT: &str = "/api/v1.0/precipitation";

/// Handle GET /api/v1.0/precipitation requests
pub async fn precipitation_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let cutoff = state.config.data.cutoff_date.clone();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        cutoff = %cutoff,
        "Processing precipitation request"
    );

    match state
        .query(move |session| session.precipitation_since(&cutoff))
        .await
    {
        Ok(readings) => {
            let duration = start_time.elapsed();
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                duration_us = duration.as_micros() as u64,
                rows = readings.len(),
                "Precipitation request successful"
            );
            Json(readings).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, None),
    }
}

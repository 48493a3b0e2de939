//! Temperature observation endpoint handler.
//!
//! Returns the reference station's temperature readings after the cutoff date.

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

const ENDPOINT: &str = "/api/v1.0/tobs";

/// Handle GET /api/v1.0/tobs requests
pub async fn tobs_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let station = state.config.data.reference_station.clone();
    let cutoff = state.config.data.cutoff_date.clone();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        station = %station,
        cutoff = %cutoff,
        "Processing tobs request"
    );

    match state
        .query(move |session| session.temperatures_for_station_since(&station, &cutoff))
        .await
    {
        Ok(observations) => {
            let duration = start_time.elapsed();
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                duration_us = duration.as_micros() as u64,
                rows = observations.len(),
                "Tobs request successful"
            );
            Json(observations).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, None),
    }
}

//! HTTP request handlers for the kona API.
//!
//! This module contains all the endpoint handlers for the web server and the
//! router that wires them together.

pub mod heartbeat;
pub mod index;
pub mod precipitation;
pub mod stations;
pub mod stats;
pub mod tobs;

pub use heartbeat::heartbeat_handler;
pub use index::index_handler;
pub use precipitation::precipitation_handler;
pub use stations::stations_handler;
pub use stats::{start_end_stats_handler, start_stats_handler};
pub use tobs::tobs_handler;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::error::KonaError;
use crate::logging::{create_http_trace_layer, log_request_error};
use crate::state::AppState;

/// Build the application router over shared state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/heartbeat", get(heartbeat_handler))
        .route("/api/v1.0/precipitation", get(precipitation_handler))
        .route("/api/v1.0/stations", get(stations_handler))
        .route("/api/v1.0/tobs", get(tobs_handler))
        .route("/api/v1.0/:start_date", get(start_stats_handler))
        .route("/api/v1.0/:start_date/:end_date", get(start_end_stats_handler))
        .layer(
            ServiceBuilder::new()
                .layer(create_http_trace_layer())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Log a failed request and turn the error into a JSON response.
///
/// Client errors carry only the message; server errors also carry the request id.
pub(crate) fn error_response(
    error: KonaError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    log_request_error(&error, endpoint, request_id, params);

    let status = error.status_code();
    let body = if status == StatusCode::NOT_FOUND {
        serde_json::json!({ "error": error.to_string() })
    } else {
        serde_json::json!({
            "error": error.to_string(),
            "request_id": request_id
        })
    };

    (status, Json(body)).into_response()
}

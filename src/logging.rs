//! Logging utilities for the kona server.
//!
//! This module provides structured logging functionality to make logs more
//! searchable, analyzable, and useful for production deployments.

use tracing::{error, info, warn, Level};

use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use uuid::Uuid;

use crate::config::DatasetBounds;
use crate::models::DatasetSummary;

/// Creates the tracing layer for HTTP request/response logging
pub fn create_http_trace_layer() -> TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
    DefaultMakeSpan,
    DefaultOnRequest,
    DefaultOnResponse,
> {
    let response_formatter = DefaultOnResponse::new()
        .level(Level::DEBUG)
        .latency_unit(LatencyUnit::Micros);

    TraceLayer::new_for_http()
        .make_span_with(
            DefaultMakeSpan::new()
                .level(Level::INFO)
                .include_headers(false),
        )
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(response_formatter)
}

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Log what the opened database contains, and warn when the configured
/// bounds disagree with the observed date span
pub fn log_dataset_stats(file_path: &str, summary: &DatasetSummary, bounds: &DatasetBounds) {
    info!(
        operation = "dataset_open",
        file_path = file_path,
        observations = summary.observation_count,
        stations = summary.station_count,
        earliest_date = summary.earliest_date.as_deref().unwrap_or("none"),
        latest_date = summary.latest_date.as_deref().unwrap_or("none"),
        "Dataset opened successfully"
    );

    let first = bounds.first.format(crate::config::DATE_FORMAT).to_string();
    let last = bounds.last.format(crate::config::DATE_FORMAT).to_string();

    if summary.earliest_date.as_deref() != Some(first.as_str())
        || summary.latest_date.as_deref() != Some(last.as_str())
    {
        warn!(
            configured_first = %first,
            configured_last = %last,
            earliest_date = ?summary.earliest_date,
            latest_date = ?summary.latest_date,
            "Configured dataset bounds differ from the observed date span"
        );
    }
}

/// Log an error with context
pub fn log_error(error: &crate::error::KonaError, context: &str) {
    error!(
        error = %error,
        context = context,
        "Error occurred"
    );
}

/// Log an error that occurred during request processing.
///
/// Client errors (unknown dates) are logged at warn level, everything else at error.
pub fn log_request_error(
    error: &crate::error::KonaError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) {
    let status = error.status_code();
    if status.is_client_error() {
        warn!(
            error = %error,
            endpoint = endpoint,
            request_id = request_id,
            params = params.unwrap_or("none"),
            status = status.as_u16(),
            "Request rejected"
        );
    } else {
        error!(
            error = %error,
            endpoint = endpoint,
            request_id = request_id,
            params = params.unwrap_or("none"),
            status = status.as_u16(),
            "Request processing error"
        );
    }
}

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

//! Error types for the kona application.
//!
//! This module defines the error enum shared by the data access layer, the
//! route handlers and the server bootstrap.

use axum::http::StatusCode;
use thiserror::Error;

/// The main error type for kona operations.
#[derive(Error, Debug)]
pub enum KonaError {
    /// The SQLite store could not be opened or queried
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The store does not match the expected table layout
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// A requested date could not be parsed or lies outside the dataset bounds.
    ///
    /// The message is shown verbatim to API clients.
    #[error("{message}")]
    DateNotFound { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl KonaError {
    /// HTTP status code used when this error reaches a route handler
    pub fn status_code(&self) -> StatusCode {
        match self {
            KonaError::DateNotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convenience type alias for Results with KonaError
pub type Result<T> = std::result::Result<T, KonaError>;

//! Application state management for kona.
//!
//! This module defines the shared state that is passed to all handlers: the
//! configuration, the store handle and the parsed dataset bounds. It is built
//! once at startup and never mutated afterwards.

use std::path::Path;
use std::sync::Arc;

use crate::config::{Config, DatasetBounds};
use crate::error::{KonaError, Result};
use crate::store::{Session, Store};

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Read-only database handle
    pub store: Store,
    /// Accepted date interval for the stats routes
    pub bounds: DatasetBounds,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, store: Store) -> Result<Self> {
        let bounds = config.bounds()?;
        Ok(Self {
            config,
            store,
            bounds,
        })
    }

    /// Open the database at `path` and build the state around it
    pub fn open(path: &Path, config: Config) -> Result<Self> {
        let store = Store::open(path)?;
        Self::new(config, store)
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config, store: Store) -> Result<Arc<Self>> {
        Ok(Arc::new(Self::new(config, store)?))
    }

    /// Run `f` against a fresh read-only session on a blocking thread.
    ///
    /// The session is dropped when `f` returns, before the caller builds its
    /// response.
    pub async fn query<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Session) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            let session = store.open_session()?;
            f(&session)
        })
        .await
        .map_err(|e| KonaError::Server {
            message: format!("Query task failed: {}", e),
        })?
    }

    /// Validate that the store is reachable and has the expected tables
    pub fn validate(&self) -> Result<()> {
        let session = self.store.open_session()?;
        session.verify_schema()
    }
}

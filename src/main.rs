//! kona - read-only JSON API over a station climate dataset
//!
//! This is the main entry point for the kona application.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

use kona::handlers::router;
use kona::{init_tracing, log_dataset_stats, log_error, AppState, Config, KonaError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, db_path) = Config::load()?;

    init_tracing(&config.log_level);

    info!("Starting kona v{}", env!("CARGO_PKG_VERSION"));

    config.validate().map_err(|e| {
        log_error(&e, "Invalid configuration");
        e
    })?;

    info!("Opening database: {:?}", db_path);

    let app_state = AppState::open(&db_path, config.clone()).map_err(|e| {
        log_error(&e, "Failed to open database");
        e
    })?;

    // Check the schema up front instead of failing on the first request
    app_state.validate().map_err(|e| {
        log_error(&e, "Invalid database");
        e
    })?;

    let summary = app_state.store.open_session()?.dataset_summary()?;
    log_dataset_stats(
        &db_path.display().to_string(),
        &summary,
        &app_state.bounds,
    );

    let state = Arc::new(app_state);
    let app = router(state);

    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| KonaError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| KonaError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| KonaError::Server {
            message: format!("Server error: {}", e),
        })?;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}

//! HTTP server initialization and runtime setup.
//!
//! Builds the shared state, starts the background sweeper, and runs the Axum
//! server until a shutdown signal arrives.

use crate::config::Config;
use crate::routes::app_router;
use crate::security::sweeper::run_sweeper;
use crate::security::SystemClock;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Charity directory (seeded unless `SEED_DATA=false`)
/// - Admission state (rate limiter, anomaly flagger)
/// - Background sweeper for expired admission state
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - State construction fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = AppState::from_config(&config, Arc::new(SystemClock))?;

    let charities = state.charity_service.count().await?;
    tracing::info!("Charity directory ready ({charities} entries)");

    let sweeper = tokio::spawn(run_sweeper(
        state.rate_limiter.clone(),
        state.anomaly_flagger.clone(),
        state.clock.clone(),
        config.sweep_interval(),
    ));
    tracing::info!("Sweeper started");

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    let served = axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    sweeper.abort();
    tracing::info!("Server stopped");

    served?;
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

//! HTTP server initialization and runtime setup.
//!
//! Opens the mapping store, wires the service and runs the Axum server
//! until a shutdown signal arrives.

use crate::api::middleware::rate_limit::RateLimitSettings;
use crate::application::MappingService;
use crate::config::Config;
use crate::infrastructure::store;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The configured mapping store
/// - [`MappingService`] with TTL and collision settings
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The store cannot be opened
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = store::connect(&config).await?;

    let mapping_service = MappingService::new(store, config.base_url.clone())
        .with_ttl(config.mapping_ttl())
        .with_max_attempts(config.slug_max_attempts);

    let state = AppState::new(Arc::new(mapping_service));

    let rate_limit = config.rate_limit_enabled.then_some(RateLimitSettings {
        replenish_seconds: config.rate_limit_replenish_seconds,
        burst_size: config.rate_limit_burst,
    });

    let app = app_router(state, rate_limit);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received, draining connections");
}

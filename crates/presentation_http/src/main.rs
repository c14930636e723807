//! Wayfinder HTTP Server
//!
//! Main entry point for the directions API server.

use std::time::Duration;

use anyhow::Context;
use infrastructure::{AppConfig, build_directions_service, init_logging};
use presentation_http::{AppState, cors_layer, create_router};
use tokio::{net::TcpListener, signal};
use tracing::info;

const DEFAULT_LOG_FILTER: &str = "wayfinder_server=debug,presentation_http=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_logging(config.server.log_format, DEFAULT_LOG_FILTER);

    info!("Wayfinder v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = %config.server.port,
        geocoder = %config.geocoding.base_url,
        router = %config.routing.base_url,
        max_attempts = config.resilience.max_attempts,
        "Configuration loaded"
    );

    let directions =
        build_directions_service(&config).context("Failed to initialize provider clients")?;

    let addr = config.server.bind_address();
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let cors = cors_layer(&config.server.allowed_origins);

    let app = create_router(AppState::new(directions, config)).layer(cors);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}

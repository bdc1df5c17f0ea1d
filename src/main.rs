//! portfolio-admin server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use portfolio_admin::api;
use portfolio_admin::app_state::AppState;
use portfolio_admin::config::{AdminConfig, LogFormat};
use portfolio_admin::domain::EventBus;
use portfolio_admin::persistence::StorageBackend;
use portfolio_admin::service::{PortfolioService, ServiceOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AdminConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting portfolio-admin");

    // Build persistence and service layers
    let storage = StorageBackend::from_config(&config)
        .await
        .context("opening storage backend")?;
    let event_bus = EventBus::new(config.event_bus_capacity);
    let service = PortfolioService::new(storage, ServiceOptions::from_config(&config), event_bus)
        .await
        .context("loading version history")?;

    // Build router
    let app = api::build_app(
        AppState::new(Arc::new(service)),
        config.max_image_bytes,
        config.request_timeout,
    );

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

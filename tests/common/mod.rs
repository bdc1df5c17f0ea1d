//! Shared helpers for the integration tests.

#![allow(dead_code, clippy::expect_used)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use portfolio_admin::api;
use portfolio_admin::app_state::AppState;
use portfolio_admin::domain::{EventBus, ResumeParser};
use portfolio_admin::persistence::{MemoryStorage, StorageBackend};
use portfolio_admin::service::{PortfolioService, ServiceOptions};

/// Upload cap used by test servers.
pub const MAX_UPLOAD: usize = 1024;

/// Base URL for share links in test servers.
pub const SHARE_BASE: &str = "https://portfolio.test";

pub fn options() -> ServiceOptions {
    ServiceOptions {
        snapshot_key: "portfolioVersions".to_string(),
        share_base_url: SHARE_BASE.to_string(),
        max_image_bytes: MAX_UPLOAD,
        parser: ResumeParser::with_tokio_clock(Duration::ZERO),
    }
}

pub async fn service_over(storage: StorageBackend) -> Arc<PortfolioService> {
    Arc::new(
        PortfolioService::new(storage, options(), EventBus::new(64))
            .await
            .expect("service construction failed"),
    )
}

/// Binds to port 0 and serves the full application in the background.
pub async fn start_server() -> SocketAddr {
    let service = service_over(StorageBackend::Memory(MemoryStorage::new())).await;
    let app = api::build_app(AppState::new(service), MAX_UPLOAD, Duration::from_secs(10));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server failed");
    });
    addr
}

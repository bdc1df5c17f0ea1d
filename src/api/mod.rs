//! REST API layer: route handlers, DTOs, OpenAPI document and router
//! composition.
//!
//! Resource endpoints are mounted under `/api/v1`; `/health`, `/media/{id}`
//! and `/ws` live at the root.

pub mod dto;
pub mod handlers;
pub mod openapi;

use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Builds the REST router with all endpoints, without middleware.
pub fn build_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes(max_upload_bytes))
        .merge(handlers::system::routes())
        .merge(handlers::media::public_routes())
}

/// Builds the complete application: REST, WebSocket, API docs and the
/// tracing, CORS and timeout middleware.
pub fn build_app(state: AppState, max_upload_bytes: usize, request_timeout: Duration) -> Router {
    let router = build_router(max_upload_bytes).route("/ws", get(ws_handler));
    openapi::mount(router)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}

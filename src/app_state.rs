//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::PortfolioService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Portfolio service for all business logic.
    pub portfolio_service: Arc<PortfolioService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Builds the state around `service`, sharing its event bus.
    #[must_use]
    pub fn new(service: Arc<PortfolioService>) -> Self {
        let event_bus = service.event_bus().clone();
        Self {
            portfolio_service: service,
            event_bus,
        }
    }
}

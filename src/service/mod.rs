//! Service layer: business logic orchestration.
//!
//! [`PortfolioService`] owns the live document and the version history,
//! runs resume parse jobs, stores media and share links, and emits events
//! through the [`super::domain::EventBus`].

pub mod portfolio_service;

pub use portfolio_service::{ParseJobView, PortfolioService, ServiceOptions, VersionStats};

//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The endpoint at `/ws` streams domain events to clients, filtered by the
//! topics each client subscribed to.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;

//! # portfolio-admin
//!
//! Back-end for a single-profile portfolio. Holds one live profile document
//! and exposes the admin operations around it over REST and WebSocket.
//!
//! The core is a durable, newest-first snapshot history
//! ([`domain::SnapshotStore`]) with save, list, restore, export and
//! delete-except-current, persisted through a pluggable key/value backend
//! (memory, JSON file or PostgreSQL). Around it sit section editing, a
//! simulated resume parser, profile image upload and share links.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── PortfolioService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── SnapshotStore, ResumeParser (domain/)
//!     │
//!     └── KeyValueStorage: memory | file | PostgreSQL (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;

//! REST endpoint handlers organized by resource.

pub mod media;
pub mod portfolio;
pub mod resume;
pub mod share;
pub mod system;
pub mod versions;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(portfolio::routes())
        .merge(versions::routes())
        .merge(resume::routes())
        .merge(media::routes(max_upload_bytes))
        .merge(share::routes())
}

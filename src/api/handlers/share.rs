//! Share link handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::ShareLinkListResponse;
use crate::app_state::AppState;
use crate::domain::ShareLink;

/// `POST /share`: Generate a share link.
#[utoipa::path(
    post,
    path = "/api/v1/share",
    tag = "Share",
    summary = "Create a share link",
    responses(
        (status = 201, description = "Link generated", body = ShareLink),
    )
)]
pub async fn create_share_link(State(state): State<AppState>) -> impl IntoResponse {
    let link = state.portfolio_service.create_share_link().await;
    (StatusCode::CREATED, Json(link))
}

/// `GET /share`: Links generated so far.
#[utoipa::path(
    get,
    path = "/api/v1/share",
    tag = "Share",
    summary = "List share links",
    responses(
        (status = 200, description = "Links, newest first", body = ShareLinkListResponse),
    )
)]
pub async fn list_share_links(State(state): State<AppState>) -> impl IntoResponse {
    Json(ShareLinkListResponse {
        data: state.portfolio_service.share_links().await,
    })
}

/// Share routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/share", post(create_share_link).get(list_share_links))
}

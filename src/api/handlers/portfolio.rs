//! Live document handlers: read, replace, public view, section edit.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::PortfolioData;
use crate::error::{AdminError, ErrorResponse};

/// `GET /portfolio`: The live document.
#[utoipa::path(
    get,
    path = "/api/v1/portfolio",
    tag = "Portfolio",
    summary = "Get the live portfolio",
    responses(
        (status = 200, description = "Live document", body = PortfolioData),
    )
)]
pub async fn get_portfolio(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.portfolio_service.portfolio().await)
}

/// `PUT /portfolio`: Replace the live document.
#[utoipa::path(
    put,
    path = "/api/v1/portfolio",
    tag = "Portfolio",
    summary = "Replace the live portfolio",
    description = "Replaces the whole live document. Nothing is saved to the version history until `POST /versions` is called.",
    request_body = PortfolioData,
    responses(
        (status = 200, description = "Updated document", body = PortfolioData),
        (status = 400, description = "Malformed document", body = ErrorResponse),
    )
)]
pub async fn replace_portfolio(
    State(state): State<AppState>,
    Json(data): Json<PortfolioData>,
) -> impl IntoResponse {
    Json(state.portfolio_service.replace_portfolio(data).await)
}

/// `GET /portfolio/public`: Recruiter-facing view.
#[utoipa::path(
    get,
    path = "/api/v1/portfolio/public",
    tag = "Portfolio",
    summary = "Get the public portfolio",
    description = "Live document with disabled entries dropped and hidden sections emptied.",
    responses(
        (status = 200, description = "Public document", body = PortfolioData),
    )
)]
pub async fn get_public_portfolio(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.portfolio_service.public_portfolio().await)
}

/// `PUT /portfolio/sections/{section}`: Replace one section.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] for an unknown section or a body
/// that does not fit it.
#[utoipa::path(
    put,
    path = "/api/v1/portfolio/sections/{section}",
    tag = "Portfolio",
    summary = "Update one section",
    params(
        ("section" = String, Path, description = "personalInfo, skills, experience, projects, testimonials or sections"),
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Updated document", body = PortfolioData),
        (status = 400, description = "Unknown section or malformed body", body = ErrorResponse),
    )
)]
pub async fn update_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Json(value): Json<serde_json::Value>,
) -> Result<impl IntoResponse, AdminError> {
    let updated = state
        .portfolio_service
        .update_section(&section, value)
        .await?;
    Ok(Json(updated))
}

/// Portfolio routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/portfolio", get(get_portfolio).put(replace_portfolio))
        .route("/portfolio/public", get(get_public_portfolio))
        .route("/portfolio/sections/{section}", put(update_section))
}

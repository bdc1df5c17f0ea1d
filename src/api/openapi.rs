//! OpenAPI document for the REST API.
//!
//! With the `swagger-ui` feature the document is browsable at
//! `/swagger-ui`; either way the raw JSON is served at
//! `/api-docs/openapi.json`.

use axum::Router;
use utoipa::OpenApi;

use super::dto;
use super::handlers;
use crate::app_state::AppState;
use crate::domain::portfolio;
use crate::domain::resume_parser;
use crate::error::{ErrorBody, ErrorResponse};

/// Path of the generated OpenAPI JSON.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Generated OpenAPI description of every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "portfolio-admin",
        description = "Admin API for a single-profile portfolio: live document, version history, resume parsing, media and share links."
    ),
    paths(
        handlers::system::health_handler,
        handlers::portfolio::get_portfolio,
        handlers::portfolio::replace_portfolio,
        handlers::portfolio::get_public_portfolio,
        handlers::portfolio::update_section,
        handlers::versions::list_versions,
        handlers::versions::save_version,
        handlers::versions::get_version,
        handlers::versions::delete_version,
        handlers::versions::restore_version,
        handlers::versions::export_version,
        handlers::resume::start_parse,
        handlers::resume::get_parse_job,
        handlers::resume::apply_parse,
        handlers::media::upload_profile_image,
        handlers::media::get_media,
        handlers::share::create_share_link,
        handlers::share::list_share_links,
    ),
    components(schemas(
        ErrorResponse,
        ErrorBody,
        portfolio::PortfolioData,
        portfolio::SectionVisibility,
        resume_parser::ParseState,
        resume_parser::ParsedResume,
        dto::VersionListResponse,
        dto::VersionSummaryDto,
        dto::VersionDetailResponse,
        dto::RestoreVersionResponse,
        dto::SaveVersionRequest,
        dto::ParseJobResponse,
        dto::StartParseRequest,
        dto::ImageUploadResponse,
        dto::ShareLinkListResponse,
    )),
    tags(
        (name = "System", description = "Health"),
        (name = "Portfolio", description = "Live document"),
        (name = "Versions", description = "Snapshot history"),
        (name = "Resume", description = "Simulated resume parsing"),
        (name = "Media", description = "Profile images"),
        (name = "Share", description = "Share links"),
    )
)]
pub struct ApiDoc;

/// Adds the documentation routes to `router`.
#[cfg(feature = "swagger-ui")]
pub fn mount(router: Router<AppState>) -> Router<AppState> {
    router.merge(utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url(OPENAPI_PATH, ApiDoc::openapi()))
}

/// Adds the documentation routes to `router`.
#[cfg(not(feature = "swagger-ui"))]
pub fn mount(router: Router<AppState>) -> Router<AppState> {
    use axum::Json;
    use axum::routing::get;

    router.route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
}

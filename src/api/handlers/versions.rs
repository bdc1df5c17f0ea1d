//! Version history handlers: list, save, preview, restore, export, delete.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    PaginationParams, RestoreVersionResponse, SaveVersionRequest, VersionDetailResponse,
    VersionListResponse, VersionSummaryDto,
};
use crate::app_state::AppState;
use crate::domain::SnapshotId;
use crate::error::{AdminError, ErrorResponse};

fn parse_id(raw: &str) -> Result<SnapshotId, AdminError> {
    raw.parse()
        .map_err(|e: crate::domain::snapshot::SnapshotIdParseError| {
            AdminError::InvalidRequest(e.to_string())
        })
}

/// `GET /versions`: Paginated version list with overview figures.
#[utoipa::path(
    get,
    path = "/api/v1/versions",
    tag = "Versions",
    summary = "List versions",
    description = "Returns snapshots newest first. The first entry is the current version.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated version list", body = VersionListResponse),
    )
)]
pub async fn list_versions(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> impl IntoResponse {
    let service = &state.portfolio_service;
    let summaries: Vec<VersionSummaryDto> = service
        .list_versions()
        .await
        .iter()
        .enumerate()
        .map(|(index, snapshot)| VersionSummaryDto::from_snapshot(snapshot, index == 0))
        .collect();
    let (data, pagination) = params.paginate(summaries);

    Json(VersionListResponse {
        data,
        pagination,
        stats: service.version_stats().await.into(),
    })
}

/// `POST /versions`: Save the live document as a new version.
///
/// # Errors
///
/// Returns [`AdminError::StorageFailure`] if the history cannot be
/// persisted.
#[utoipa::path(
    post,
    path = "/api/v1/versions",
    tag = "Versions",
    summary = "Save a version",
    request_body = SaveVersionRequest,
    responses(
        (status = 201, description = "Version saved", body = VersionSummaryDto),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn save_version(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AdminError> {
    let req: SaveVersionRequest = if body.iter().all(u8::is_ascii_whitespace) {
        SaveVersionRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AdminError::InvalidRequest(format!("invalid save request: {e}")))?
    };
    let snapshot = state
        .portfolio_service
        .save_version(req.description.as_deref())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(VersionSummaryDto::from_snapshot(&snapshot, true)),
    ))
}

/// `GET /versions/{id}`: Preview one version.
///
/// # Errors
///
/// Returns [`AdminError::SnapshotNotFound`] if the version does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/versions/{id}",
    tag = "Versions",
    summary = "Get a version",
    params(
        ("id" = String, Path, description = "Version id, e.g. v2.0.0"),
    ),
    responses(
        (status = 200, description = "Version with data", body = VersionDetailResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Version not found", body = ErrorResponse),
    )
)]
pub async fn get_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AdminError> {
    let id = parse_id(&id)?;
    let service = &state.portfolio_service;
    let snapshot = service.get_version(&id).await?;
    let current = service
        .list_versions()
        .await
        .first()
        .is_some_and(|head| head.id == id);

    Ok(Json(VersionDetailResponse {
        summary: VersionSummaryDto::from_snapshot(&snapshot, current),
        data: snapshot.data,
    }))
}

/// `DELETE /versions/{id}`: Delete a version other than the current one.
///
/// # Errors
///
/// Returns [`AdminError::SnapshotNotFound`] or
/// [`AdminError::InvalidOperation`].
#[utoipa::path(
    delete,
    path = "/api/v1/versions/{id}",
    tag = "Versions",
    summary = "Delete a version",
    params(
        ("id" = String, Path, description = "Version id"),
    ),
    responses(
        (status = 204, description = "Version deleted"),
        (status = 404, description = "Version not found", body = ErrorResponse),
        (status = 409, description = "Current or last version", body = ErrorResponse),
    )
)]
pub async fn delete_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AdminError> {
    let id = parse_id(&id)?;
    state.portfolio_service.delete_version(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /versions/{id}/restore`: Restore a version.
///
/// # Errors
///
/// Returns [`AdminError::SnapshotNotFound`] if the version does not exist.
#[utoipa::path(
    post,
    path = "/api/v1/versions/{id}/restore",
    tag = "Versions",
    summary = "Restore a version",
    description = "Records a new version carrying the restored data and makes it live. No history is discarded.",
    params(
        ("id" = String, Path, description = "Version id"),
    ),
    responses(
        (status = 200, description = "Version restored", body = RestoreVersionResponse),
        (status = 404, description = "Version not found", body = ErrorResponse),
    )
)]
pub async fn restore_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AdminError> {
    let id = parse_id(&id)?;
    let restored = state.portfolio_service.restore_version(&id).await?;
    Ok(Json(RestoreVersionResponse {
        restored_from: id.to_string(),
        version: VersionSummaryDto::from_snapshot(&restored.recorded, true),
        data: restored.data,
    }))
}

/// `GET /versions/{id}/export`: Download a version's data as JSON.
///
/// # Errors
///
/// Returns [`AdminError::SnapshotNotFound`] if the version does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/versions/{id}/export",
    tag = "Versions",
    summary = "Export a version",
    params(
        ("id" = String, Path, description = "Version id"),
    ),
    responses(
        (status = 200, description = "Pretty-printed JSON attachment", content_type = "application/json"),
        (status = 404, description = "Version not found", body = ErrorResponse),
    )
)]
pub async fn export_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AdminError> {
    let id = parse_id(&id)?;
    let export = state.portfolio_service.export_version(&id).await?;
    let disposition = format!("attachment; filename=\"{}\"", export.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, export.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.body,
    ))
}

/// Version routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/versions", get(list_versions).post(save_version))
        .route("/versions/{id}", get(get_version).delete(delete_version))
        .route("/versions/{id}/restore", post(restore_version))
        .route("/versions/{id}/export", get(export_version))
}

//! Profile image upload and retrieval.

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::ImageUploadResponse;
use crate::app_state::AppState;
use crate::domain::MediaId;
use crate::error::{AdminError, ErrorResponse};

/// `POST /media/profile-image`: Upload a new profile image.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] for a non-image or empty body.
#[utoipa::path(
    post,
    path = "/api/v1/media/profile-image",
    tag = "Media",
    summary = "Upload profile image",
    description = "Raw image body with an `image/*` Content-Type. The stored image becomes `personalInfo.profileImage`.",
    request_body(content = Vec<u8>, content_type = "image/*"),
    responses(
        (status = 201, description = "Image stored", body = ImageUploadResponse),
        (status = 400, description = "Not an image or empty", body = ErrorResponse),
        (status = 413, description = "Image exceeds the size limit"),
    )
)]
pub async fn upload_profile_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AdminError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let image = state
        .portfolio_service
        .upload_profile_image(content_type, body.to_vec())
        .await?;
    Ok((StatusCode::CREATED, Json(ImageUploadResponse::from(&*image))))
}

/// `GET /media/{id}`: Serve a stored image.
///
/// # Errors
///
/// Returns [`AdminError::MediaNotFound`] for an unknown id.
#[utoipa::path(
    get,
    path = "/media/{id}",
    tag = "Media",
    summary = "Fetch an image",
    params(
        ("id" = uuid::Uuid, Path, description = "Media UUID"),
    ),
    responses(
        (status = 200, description = "Image bytes", content_type = "image/*"),
        (status = 404, description = "Image not found", body = ErrorResponse),
    )
)]
pub async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, AdminError> {
    let image = state
        .portfolio_service
        .media(MediaId::from_uuid(id))
        .await?;
    Ok((
        [(header::CONTENT_TYPE, image.content_type.clone())],
        image.bytes.clone(),
    ))
}

/// Upload route under `/api/v1`, with the request body capped at
/// `max_upload_bytes`.
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new().route(
        "/media/profile-image",
        post(upload_profile_image).layer(DefaultBodyLimit::max(max_upload_bytes)),
    )
}

/// Image serving route mounted at the root level.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/media/{id}", get(get_media))
}

//! Resume parse handlers.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{ParseJobResponse, StartParseRequest};
use crate::app_state::AppState;
use crate::domain::{ParseJobId, PortfolioData};
use crate::error::{AdminError, ErrorResponse};

fn resume_text(headers: &HeaderMap, body: &Bytes) -> Result<String, AdminError> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));

    if is_json {
        let req: StartParseRequest = serde_json::from_slice(body)
            .map_err(|e| AdminError::InvalidRequest(format!("invalid parse request: {e}")))?;
        return Ok(req.text);
    }
    String::from_utf8(body.to_vec())
        .map_err(|_| AdminError::InvalidRequest("resume file is not UTF-8 text".to_string()))
}

/// `POST /resume/parse`: Start a parse job.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] for blank or undecodable input.
#[utoipa::path(
    post,
    path = "/api/v1/resume/parse",
    tag = "Resume",
    summary = "Start a resume parse",
    description = "Accepts `{\"text\": ...}` as JSON or the resume as a plain-text body. The job runs in the background; poll its state or subscribe to the `parser` topic.",
    request_body = StartParseRequest,
    responses(
        (status = 202, description = "Job started", body = ParseJobResponse),
        (status = 400, description = "Blank or unreadable resume", body = ErrorResponse),
    )
)]
pub async fn start_parse(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AdminError> {
    let text = resume_text(&headers, &body)?;
    let job = state.portfolio_service.start_parse(text).await?;
    Ok((StatusCode::ACCEPTED, Json(ParseJobResponse::from(job))))
}

/// `GET /resume/parse/{job_id}`: Job state.
///
/// # Errors
///
/// Returns [`AdminError::ParseJobNotFound`] for an unknown job.
#[utoipa::path(
    get,
    path = "/api/v1/resume/parse/{job_id}",
    tag = "Resume",
    summary = "Get a parse job",
    params(
        ("job_id" = uuid::Uuid, Path, description = "Job UUID"),
    ),
    responses(
        (status = 200, description = "Job state", body = ParseJobResponse),
        (status = 404, description = "Job not found", body = ErrorResponse),
    )
)]
pub async fn get_parse_job(
    State(state): State<AppState>,
    Path(job_id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, AdminError> {
    let job = state
        .portfolio_service
        .parse_job(ParseJobId::from_uuid(job_id))
        .await?;
    Ok(Json(ParseJobResponse::from(job)))
}

/// `POST /resume/parse/{job_id}/apply`: Merge the result into the live
/// document.
///
/// # Errors
///
/// Returns [`AdminError::ParseJobNotFound`] or
/// [`AdminError::InvalidOperation`] if the job has not succeeded.
#[utoipa::path(
    post,
    path = "/api/v1/resume/parse/{job_id}/apply",
    tag = "Resume",
    summary = "Apply a parse result",
    params(
        ("job_id" = uuid::Uuid, Path, description = "Job UUID"),
    ),
    responses(
        (status = 200, description = "Updated document", body = PortfolioData),
        (status = 404, description = "Job not found", body = ErrorResponse),
        (status = 409, description = "Job not finished", body = ErrorResponse),
    )
)]
pub async fn apply_parse(
    State(state): State<AppState>,
    Path(job_id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, AdminError> {
    let updated = state
        .portfolio_service
        .apply_parse(ParseJobId::from_uuid(job_id))
        .await?;
    Ok(Json(updated))
}

/// Resume routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/resume/parse", post(start_parse))
        .route("/resume/parse/{job_id}", get(get_parse_job))
        .route("/resume/parse/{job_id}/apply", post(apply_parse))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn plain_body_is_the_text() {
        let Ok(text) = resume_text(&HeaderMap::new(), &Bytes::from_static(b"Jane Doe")) else {
            panic!("plain text rejected");
        };
        assert_eq!(text, "Jane Doe");
    }

    #[test]
    fn json_body_reads_text_field() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let Ok(text) = resume_text(&headers, &Bytes::from_static(br#"{"text":"cv"}"#)) else {
            panic!("json rejected");
        };
        assert_eq!(text, "cv");
    }

    #[test]
    fn binary_body_is_rejected() {
        let result = resume_text(&HeaderMap::new(), &Bytes::from_static(&[0xff, 0xfe, 0x00]));
        assert!(matches!(result, Err(AdminError::InvalidRequest(_))));
    }
}

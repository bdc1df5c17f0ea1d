//! Service error types with HTTP status code mapping.
//!
//! [`AdminError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::persistence::StorageError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2002,
///     "message": "invalid operation: cannot delete the current snapshot",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`AdminError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                  |
/// |-----------|-------------------|------------------------------|
/// | 1000–1999 | Validation        | 400 Bad Request              |
/// | 2000–2999 | State / Not Found | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server / Storage  | 500 Internal Server Error    |
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// No snapshot with the given id exists in the version list.
    #[error("snapshot not found: {0}")]
    SnapshotNotFound(String),

    /// No resume parse job with the given id exists.
    #[error("parse job not found: {0}")]
    ParseJobNotFound(uuid::Uuid),

    /// No uploaded media with the given id exists.
    #[error("media not found: {0}")]
    MediaNotFound(uuid::Uuid),

    /// The operation is not allowed in the current state (e.g. deleting
    /// the current snapshot).
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The durable storage backend rejected a read or write.
    #[error("storage failure: {0}")]
    StorageFailure(#[from] StorageError),

    /// A payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AdminError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::SnapshotNotFound(_) => 2001,
            Self::InvalidOperation(_) => 2002,
            Self::ParseJobNotFound(_) => 2003,
            Self::MediaNotFound(_) => 2004,
            Self::Internal(_) => 3000,
            Self::StorageFailure(_) => 3001,
            Self::Serialization(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::SnapshotNotFound(_) | Self::ParseJobNotFound(_) | Self::MediaNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidOperation(_) => StatusCode::CONFLICT,
            Self::StorageFailure(_) | Self::Serialization(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns `true` for the not-found family of errors.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SnapshotNotFound(_) | Self::ParseJobNotFound(_) | Self::MediaNotFound(_)
        )
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

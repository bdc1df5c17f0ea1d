//! Media upload DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{MediaId, StoredImage};

/// Response body for `POST /media/profile-image` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct ImageUploadResponse {
    /// Stored image id.
    pub media_id: MediaId,
    /// Path the image is served at; also set as `personalInfo.profileImage`.
    pub url: String,
    /// Size in bytes.
    pub size: usize,
    /// Declared content type.
    pub content_type: String,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

impl From<&StoredImage> for ImageUploadResponse {
    fn from(image: &StoredImage) -> Self {
        Self {
            media_id: image.id,
            url: image.url(),
            size: image.size(),
            content_type: image.content_type.clone(),
            uploaded_at: image.uploaded_at,
        }
    }
}

//! Profile image validation and the stored image record.

use chrono::{DateTime, Utc};

use super::MediaId;

/// Why an upload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageRejection {
    /// Content type is missing or not `image/*`.
    #[error("please upload an image file (got {0})")]
    NotAnImage(String),
    /// Body is empty.
    #[error("image is empty")]
    Empty,
    /// Body exceeds the configured maximum.
    #[error("image is {size} bytes, the limit is {max} bytes")]
    TooLarge {
        /// Upload size.
        size: usize,
        /// Configured maximum.
        max: usize,
    },
}

/// Checks that `content_type` is an image type and `size` is within
/// `1..=max_bytes`.
///
/// # Errors
///
/// Returns the first [`ImageRejection`] that applies.
pub fn validate_image(content_type: &str, size: usize, max_bytes: usize) -> Result<(), ImageRejection> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if !mime.starts_with("image/") || mime.len() <= "image/".len() {
        return Err(ImageRejection::NotAnImage(content_type.to_string()));
    }
    if size == 0 {
        return Err(ImageRejection::Empty);
    }
    if size > max_bytes {
        return Err(ImageRejection::TooLarge { size, max: max_bytes });
    }
    Ok(())
}

/// An uploaded image held in memory.
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Identifier in the media table.
    pub id: MediaId,
    /// Declared content type.
    pub content_type: String,
    /// Raw bytes.
    pub bytes: Vec<u8>,
    /// Upload instant.
    pub uploaded_at: DateTime<Utc>,
}

impl StoredImage {
    /// Wraps validated bytes under a fresh id.
    #[must_use]
    pub fn new(content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            id: MediaId::new(),
            content_type: content_type.to_string(),
            bytes,
            uploaded_at: Utc::now(),
        }
    }

    /// Path the image is served at.
    #[must_use]
    pub fn url(&self) -> String {
        format!("/media/{}", self.id)
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    const MAX: usize = 10 * 1024 * 1024;

    #[test]
    fn accepts_common_image_types() {
        assert_ok!(validate_image("image/png", 1024, MAX));
        assert_ok!(validate_image("IMAGE/JPEG; charset=binary", 1024, MAX));
    }

    #[test]
    fn rejects_non_images() {
        assert_eq!(
            validate_image("application/pdf", 10, MAX),
            Err(ImageRejection::NotAnImage("application/pdf".to_string()))
        );
        assert_err!(validate_image("", 10, MAX));
        assert_err!(validate_image("image/", 10, MAX));
    }

    #[test]
    fn rejects_empty_and_oversize() {
        assert_eq!(validate_image("image/png", 0, MAX), Err(ImageRejection::Empty));
        assert_eq!(
            validate_image("image/png", MAX + 1, MAX),
            Err(ImageRejection::TooLarge { size: MAX + 1, max: MAX })
        );
        assert_ok!(validate_image("image/png", MAX, MAX));
    }

    #[test]
    fn stored_image_url_uses_id() {
        let image = StoredImage::new("image/png", vec![1, 2, 3]);
        assert_eq!(image.url(), format!("/media/{}", image.id));
        assert_eq!(image.size(), 3);
    }
}

//! Share link DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ShareLink;

/// Response body for `GET /share`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ShareLinkListResponse {
    /// Generated links, newest first.
    pub data: Vec<ShareLink>,
}

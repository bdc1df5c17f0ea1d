//! Version history DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::{PortfolioData, Snapshot};
use crate::service::VersionStats;

/// Request body for `POST /versions`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SaveVersionRequest {
    /// Optional label; a dated default is used when blank.
    #[serde(default)]
    pub description: Option<String>,
}

/// Snapshot metadata without its data.
#[derive(Debug, Serialize, ToSchema)]
pub struct VersionSummaryDto {
    /// Snapshot id, e.g. `v2.0.0`.
    pub id: String,
    /// Creation timestamp.
    pub timestamp: DateTime<Utc>,
    /// Label.
    pub description: String,
    /// Change notes.
    pub changes: Vec<String>,
    /// Whether this is the newest snapshot.
    pub current: bool,
}

impl VersionSummaryDto {
    /// Builds the summary; `current` marks the head of the list.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot<PortfolioData>, current: bool) -> Self {
        Self {
            id: snapshot.id.to_string(),
            timestamp: snapshot.timestamp,
            description: snapshot.description.clone(),
            changes: snapshot.changes.clone(),
            current,
        }
    }
}

/// Full snapshot for `GET /versions/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct VersionDetailResponse {
    /// Metadata.
    #[serde(flatten)]
    pub summary: VersionSummaryDto,
    /// Saved document.
    pub data: PortfolioData,
}

/// Overview figures.
#[derive(Debug, Serialize, ToSchema)]
pub struct VersionStatsDto {
    /// Number of stored snapshots.
    pub total_versions: usize,
    /// Timestamp of the newest snapshot.
    pub last_updated: Option<DateTime<Utc>>,
    /// Experience entries in the live document.
    pub experience_entries: usize,
    /// Technical plus AI skills in the live document.
    pub skills_listed: usize,
}

impl From<VersionStats> for VersionStatsDto {
    fn from(stats: VersionStats) -> Self {
        Self {
            total_versions: stats.total_versions,
            last_updated: stats.last_updated,
            experience_entries: stats.experience_entries,
            skills_listed: stats.skills_listed,
        }
    }
}

/// Paginated list response for `GET /versions`.
#[derive(Debug, Serialize, ToSchema)]
pub struct VersionListResponse {
    /// Snapshots on this page, newest first.
    pub data: Vec<VersionSummaryDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
    /// Overview figures.
    pub stats: VersionStatsDto,
}

/// Response body for `POST /versions/{id}/restore`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RestoreVersionResponse {
    /// Id of the snapshot whose data was restored.
    pub restored_from: String,
    /// The new head snapshot recording the restore.
    pub version: VersionSummaryDto,
    /// The document that is now live.
    pub data: PortfolioData,
}

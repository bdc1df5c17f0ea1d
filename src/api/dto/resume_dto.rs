//! Resume parse job DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ParseJobId, ParseState};
use crate::service::ParseJobView;

/// JSON request body for `POST /resume/parse`. A `text/plain` body is
/// accepted as the resume text directly.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StartParseRequest {
    /// Resume text.
    pub text: String,
}

/// State of a parse job.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParseJobResponse {
    /// Job identifier.
    pub job_id: ParseJobId,
    /// `idle`, `running`, `succeeded` or `failed`.
    pub status: String,
    /// Percent complete.
    pub progress: u8,
    /// When the job was started.
    pub created_at: DateTime<Utc>,
    /// Full state including the step message or result.
    pub state: ParseState,
}

impl From<ParseJobView> for ParseJobResponse {
    fn from(view: ParseJobView) -> Self {
        Self {
            job_id: view.id,
            status: view.state.status_str().to_string(),
            progress: view.state.progress(),
            created_at: view.created_at,
            state: view.state,
        }
    }
}

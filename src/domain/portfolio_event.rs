//! Domain events reflecting portfolio mutations.
//!
//! Every state change emits a [`PortfolioEvent`] through the
//! [`super::EventBus`]. WebSocket clients receive the events whose
//! [`EventTopic`] they subscribed to.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MediaId, ParseJobId};

/// Coarse event category used for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTopic {
    /// Live document edits.
    Portfolio,
    /// Snapshot save, restore and delete.
    Versions,
    /// Resume parse job progress.
    Parser,
    /// Profile image uploads.
    Media,
    /// Share link generation.
    Share,
}

impl EventTopic {
    /// Every topic, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Portfolio,
        Self::Versions,
        Self::Parser,
        Self::Media,
        Self::Share,
    ];

    /// Wire name of the topic.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Portfolio => "portfolio",
            Self::Versions => "versions",
            Self::Parser => "parser",
            Self::Media => "media",
            Self::Share => "share",
        }
    }
}

impl fmt::Display for EventTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventTopic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown topic: {s}"))
    }
}

/// Domain event emitted after every state mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PortfolioEvent {
    /// The live document changed.
    PortfolioUpdated {
        /// Section that changed, or `None` for a whole-document replace.
        section: Option<String>,
        /// Change timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A snapshot was saved.
    VersionSaved {
        /// New snapshot id.
        version_id: String,
        /// Snapshot description.
        description: String,
        /// Total snapshots after the save.
        total_versions: usize,
        /// Save timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A snapshot was restored, recording a new head snapshot.
    VersionRestored {
        /// Id of the new head snapshot.
        version_id: String,
        /// Id of the snapshot whose data was restored.
        restored_from: String,
        /// Restore timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A snapshot was deleted.
    VersionDeleted {
        /// Deleted snapshot id.
        version_id: String,
        /// Total snapshots after the delete.
        total_versions: usize,
        /// Delete timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A parse job advanced.
    ResumeParseProgress {
        /// Job identifier.
        job_id: ParseJobId,
        /// Percent complete.
        progress: u8,
        /// Step message.
        message: String,
        /// Progress timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A parse job reached a terminal state.
    ResumeParseFinished {
        /// Job identifier.
        job_id: ParseJobId,
        /// Whether a result is available.
        succeeded: bool,
        /// Failure reason, when it failed.
        error: Option<String>,
        /// Completion timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A new profile image was stored and linked.
    ProfileImageUpdated {
        /// Stored image id.
        media_id: MediaId,
        /// Path the image is served at.
        url: String,
        /// Image size in bytes.
        size: usize,
        /// Upload timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A share link was generated.
    ShareLinkCreated {
        /// Generated URL.
        url: String,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl PortfolioEvent {
    /// Returns the topic this event is filed under.
    #[must_use]
    pub const fn topic(&self) -> EventTopic {
        match self {
            Self::PortfolioUpdated { .. } => EventTopic::Portfolio,
            Self::VersionSaved { .. }
            | Self::VersionRestored { .. }
            | Self::VersionDeleted { .. } => EventTopic::Versions,
            Self::ResumeParseProgress { .. } | Self::ResumeParseFinished { .. } => {
                EventTopic::Parser
            }
            Self::ProfileImageUpdated { .. } => EventTopic::Media,
            Self::ShareLinkCreated { .. } => EventTopic::Share,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::PortfolioUpdated { .. } => "portfolio_updated",
            Self::VersionSaved { .. } => "version_saved",
            Self::VersionRestored { .. } => "version_restored",
            Self::VersionDeleted { .. } => "version_deleted",
            Self::ResumeParseProgress { .. } => "resume_parse_progress",
            Self::ResumeParseFinished { .. } => "resume_parse_finished",
            Self::ProfileImageUpdated { .. } => "profile_image_updated",
            Self::ShareLinkCreated { .. } => "share_link_created",
        }
    }
}

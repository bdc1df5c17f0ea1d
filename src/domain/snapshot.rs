//! Snapshot record and its sequential identifier.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sequential snapshot label rendered as `v{n}.0.0`.
///
/// Ordering follows the sequence number, so the largest id in a list is
/// always the most recently assigned one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SnapshotId(u64);

impl SnapshotId {
    /// The id given to the seed snapshot.
    pub const FIRST: Self = Self(1);

    /// Creates an id from its sequence number. Sequence numbers start at 1.
    #[must_use]
    pub const fn from_sequence(sequence: u64) -> Self {
        Self(sequence)
    }

    /// Returns the sequence number.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.0.0", self.0)
    }
}

/// Error returned when a string is not a `v{n}.0.0` label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed snapshot id: {0}")]
pub struct SnapshotIdParseError(pub String);

impl FromStr for SnapshotId {
    type Err = SnapshotIdParseError;

    /// Accepts `v3.0.0`, `v3` and `3`. The number is plain ASCII digits
    /// without sign or leading zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let major = body.strip_suffix(".0.0").unwrap_or(body);
        let canonical = !major.starts_with('0') && major.bytes().all(|b| b.is_ascii_digit());
        match major.parse::<u64>() {
            Ok(n) if canonical && n > 0 => Ok(Self(n)),
            _ => Err(SnapshotIdParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for SnapshotId {
    type Error = SnapshotIdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SnapshotId> for String {
    fn from(id: SnapshotId) -> Self {
        id.to_string()
    }
}

/// A named, timestamped copy of a payload.
///
/// The JSON shape (`id`, `timestamp`, `description`, `data`, `changes`) is
/// the persisted format of the version list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    /// Sequential label, unique within a store.
    pub id: SnapshotId,
    /// Creation instant, set once.
    pub timestamp: DateTime<Utc>,
    /// Human-supplied or generated label.
    pub description: String,
    /// Independent copy of the payload at save time.
    pub data: T,
    /// Ordered change notes; informational only.
    pub changes: Vec<String>,
}

impl<T> Snapshot<T> {
    /// Creates a snapshot stamped with the current time.
    #[must_use]
    pub fn new(id: SnapshotId, description: String, data: T, changes: Vec<String>) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            description,
            data,
            changes,
        }
    }
}

/// Serialized payload of one snapshot, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotExport {
    /// Suggested file name, e.g. `portfolio-v2.0.0.json`.
    pub file_name: String,
    /// MIME type of `body`.
    pub content_type: &'static str,
    /// Pretty-printed JSON of the snapshot data.
    pub body: String,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_semver_label() {
        assert_eq!(SnapshotId::FIRST.to_string(), "v1.0.0");
        assert_eq!(SnapshotId::from_sequence(12).to_string(), "v12.0.0");
    }

    #[test]
    fn parse_accepts_short_forms() {
        assert_eq!("v3.0.0".parse::<SnapshotId>().ok(), Some(SnapshotId(3)));
        assert_eq!("v3".parse::<SnapshotId>().ok(), Some(SnapshotId(3)));
        assert_eq!("3".parse::<SnapshotId>().ok(), Some(SnapshotId(3)));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("v0.0.0".parse::<SnapshotId>().is_err());
        assert!("v1.2.0".parse::<SnapshotId>().is_err());
        assert!("latest".parse::<SnapshotId>().is_err());
    }

    #[test]
    fn parse_rejects_sign_and_leading_zeros() {
        for input in ["+3", "v03", "v+3.0.0", "v003.0.0", "-1", "v3 .0.0"] {
            assert!(input.parse::<SnapshotId>().is_err(), "{input} accepted");
        }
    }

    #[test]
    fn ordering_follows_sequence() {
        let a = SnapshotId::from_sequence(2);
        let b = a.next();
        assert!(b > a);
        assert_eq!(b.sequence(), 3);
    }

    #[test]
    fn serializes_as_label_string() {
        let snapshot = Snapshot::new(
            SnapshotId::from_sequence(4),
            "Manual save".to_string(),
            serde_json::json!({"k": 1}),
            vec!["Manual save point created".to_string()],
        );
        let Ok(json) = serde_json::to_value(&snapshot) else {
            panic!("serialization failed");
        };
        assert_eq!(json.get("id").and_then(|v| v.as_str()), Some("v4.0.0"));
        assert_eq!(json.pointer("/data/k").and_then(|v| v.as_u64()), Some(1));
    }
}

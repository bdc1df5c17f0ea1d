//! WebSocket message types: envelope and commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    #[serde(default)]
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Creates a server message stamped now.
    #[must_use]
    pub fn new(id: impl Into<String>, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Error message with a numeric code.
    #[must_use]
    pub fn error(id: impl Into<String>, code: u16, message: &str) -> Self {
        Self::new(
            id,
            WsMessageType::Error,
            serde_json::json!({ "code": code, "message": message }),
        )
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands that a client can send over WebSocket.
///
/// Sent either bare (`{"command":"subscribe","topics":["versions"]}`) or as
/// the `payload` of a `command` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Subscribe to event topics. `"*"` subscribes to everything.
    Subscribe {
        /// Topic names.
        topics: Vec<String>,
    },
    /// Unsubscribe from event topics.
    Unsubscribe {
        /// Topic names.
        topics: Vec<String>,
    },
    /// Liveness probe.
    Ping,
    /// Current subscriptions and version overview.
    Status,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn command_parses_from_tagged_json() {
        let Ok(cmd) = serde_json::from_str::<WsCommand>(
            r#"{"command":"subscribe","topics":["versions","*"]}"#,
        ) else {
            panic!("subscribe did not parse");
        };
        assert_eq!(
            cmd,
            WsCommand::Subscribe {
                topics: vec!["versions".to_string(), "*".to_string()]
            }
        );
    }

    #[test]
    fn envelope_timestamp_is_optional() {
        let Ok(msg) = serde_json::from_str::<WsMessage>(
            r#"{"id":"1","type":"command","payload":{"command":"ping"}}"#,
        ) else {
            panic!("envelope did not parse");
        };
        assert_eq!(msg.msg_type, WsMessageType::Command);
    }
}

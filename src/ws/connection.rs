//! WebSocket connection loop.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered events.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::{EventTopic, PortfolioEvent};
use crate::service::PortfolioService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and answers them.
/// - Forwards events whose topic the client subscribed to.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<PortfolioEvent>,
    service: Arc<PortfolioService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs, &service).await;
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(event) => {
                        if !subs.matches(event.topic()) {
                            continue;
                        }
                        let Some(json) = event_message(&event) else {
                            continue;
                        };
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

fn event_message(event: &PortfolioEvent) -> Option<String> {
    let payload = serde_json::to_value(event).ok()?;
    let msg = WsMessage::new(uuid::Uuid::new_v4().to_string(), WsMessageType::Event, payload);
    serde_json::to_string(&msg).ok()
}

/// Splits topic names into known topics and a wildcard flag; unknown names
/// are returned separately.
fn parse_topics(names: &[String]) -> (Vec<EventTopic>, bool, Vec<String>) {
    let mut topics = Vec::new();
    let mut wildcard = false;
    let mut unknown = Vec::new();
    for name in names {
        if name == "*" {
            wildcard = true;
        } else if let Ok(topic) = name.parse::<EventTopic>() {
            topics.push(topic);
        } else {
            unknown.push(name.clone());
        }
    }
    (topics, wildcard, unknown)
}

/// Handles a text message from the client, returning an optional JSON response.
async fn handle_text_message(
    text: &str,
    subs: &mut SubscriptionManager,
    service: &PortfolioService,
) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(text) else {
        return serde_json::to_string(&WsMessage::error("", 400, "malformed JSON")).ok();
    };

    let id = value
        .get("id")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    let body = value.get("payload").cloned().unwrap_or(value);

    let Ok(command) = serde_json::from_value::<WsCommand>(body) else {
        return serde_json::to_string(&WsMessage::error(id, 404, "unknown command")).ok();
    };

    let payload = match command {
        WsCommand::Subscribe { topics } => {
            let (topics, wildcard, unknown) = parse_topics(&topics);
            subs.subscribe(&topics, wildcard);
            serde_json::json!({
                "subscribed": subs.topics(),
                "wildcard": subs.is_subscribed_all(),
                "unknown": unknown,
            })
        }
        WsCommand::Unsubscribe { topics } => {
            let (topics, wildcard, unknown) = parse_topics(&topics);
            subs.unsubscribe(&topics, wildcard);
            serde_json::json!({
                "subscribed": subs.topics(),
                "wildcard": subs.is_subscribed_all(),
                "unknown": unknown,
            })
        }
        WsCommand::Ping => serde_json::json!({ "pong": true }),
        WsCommand::Status => {
            let stats = service.version_stats().await;
            serde_json::json!({
                "subscribed": subs.topics(),
                "wildcard": subs.is_subscribed_all(),
                "total_versions": stats.total_versions,
                "last_updated": stats.last_updated,
            })
        }
    };

    serde_json::to_string(&WsMessage::new(id, WsMessageType::Response, payload)).ok()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::EventBus;
    use crate::persistence::{MemoryStorage, StorageBackend};
    use crate::service::ServiceOptions;

    async fn service() -> PortfolioService {
        let Ok(service) = PortfolioService::new(
            StorageBackend::Memory(MemoryStorage::new()),
            ServiceOptions::default(),
            EventBus::new(8),
        )
        .await
        else {
            panic!("service construction failed");
        };
        service
    }

    fn parse(json: Option<String>) -> serde_json::Value {
        let Some(json) = json else {
            panic!("expected a response");
        };
        let Ok(value) = serde_json::from_str(&json) else {
            panic!("response is not JSON");
        };
        value
    }

    #[tokio::test]
    async fn subscribe_reports_topics() {
        let service = service().await;
        let mut subs = SubscriptionManager::new();
        let reply = parse(
            handle_text_message(
                r#"{"id":"7","type":"command","payload":{"command":"subscribe","topics":["versions","billing"]}}"#,
                &mut subs,
                &service,
            )
            .await,
        );
        assert_eq!(reply.get("id").and_then(|v| v.as_str()), Some("7"));
        assert_eq!(reply.get("type").and_then(|v| v.as_str()), Some("response"));
        assert_eq!(
            reply.pointer("/payload/subscribed/0").and_then(|v| v.as_str()),
            Some("versions")
        );
        assert_eq!(
            reply.pointer("/payload/unknown/0").and_then(|v| v.as_str()),
            Some("billing")
        );
        assert!(subs.matches(EventTopic::Versions));
    }

    #[tokio::test]
    async fn bare_command_is_accepted() {
        let service = service().await;
        let mut subs = SubscriptionManager::new();
        let reply = parse(
            handle_text_message(r#"{"command":"subscribe","topics":["*"]}"#, &mut subs, &service)
                .await,
        );
        assert_eq!(
            reply.pointer("/payload/wildcard").and_then(|v| v.as_bool()),
            Some(true)
        );
        assert!(subs.matches(EventTopic::Share));
    }

    #[tokio::test]
    async fn malformed_and_unknown_are_errors() {
        let service = service().await;
        let mut subs = SubscriptionManager::new();
        let reply = parse(handle_text_message("not json", &mut subs, &service).await);
        assert_eq!(reply.get("type").and_then(|v| v.as_str()), Some("error"));

        let reply = parse(handle_text_message(r#"{"command":"get_state"}"#, &mut subs, &service).await);
        assert_eq!(reply.pointer("/payload/code").and_then(|v| v.as_u64()), Some(404));
    }

    #[tokio::test]
    async fn status_includes_version_count() {
        let service = service().await;
        let mut subs = SubscriptionManager::new();
        let reply = parse(handle_text_message(r#"{"command":"status"}"#, &mut subs, &service).await);
        assert_eq!(
            reply.pointer("/payload/total_versions").and_then(|v| v.as_u64()),
            Some(1)
        );
    }
}

//! Per-connection subscription manager.
//!
//! Tracks which event topics a WebSocket client is subscribed to and
//! provides server-side event filtering.

use std::collections::HashSet;

use crate::domain::EventTopic;

/// Manages the set of topic subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed topics. If `subscribe_all` is true, this set is ignored.
    topics: HashSet<EventTopic>,
    /// Whether the client subscribes to all topics (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds topics to the subscription set. `wildcard` enables everything.
    pub fn subscribe(&mut self, topics: &[EventTopic], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        self.topics.extend(topics.iter().copied());
    }

    /// Removes topics from the subscription set. `wildcard` clears the
    /// wildcard flag.
    pub fn unsubscribe(&mut self, topics: &[EventTopic], wildcard: bool) {
        if wildcard {
            self.subscribe_all = false;
        }
        for topic in topics {
            self.topics.remove(topic);
        }
    }

    /// Returns `true` if events of `topic` should be forwarded.
    #[must_use]
    pub fn matches(&self, topic: EventTopic) -> bool {
        self.subscribe_all || self.topics.contains(&topic)
    }

    /// Explicitly subscribed topics in declaration order.
    #[must_use]
    pub fn topics(&self) -> Vec<EventTopic> {
        EventTopic::ALL
            .into_iter()
            .filter(|t| self.topics.contains(t))
            .collect()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

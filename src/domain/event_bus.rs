//! In-process fan-out of [`PortfolioEvent`]s.
//!
//! The service publishes after each successful mutation; each WebSocket
//! connection holds its own receiver and filters by topic.

use tokio::sync::broadcast;

use super::PortfolioEvent;

/// Cloneable handle over a `tokio::sync::broadcast` channel.
///
/// Receivers that fall more than `capacity` events behind skip the oldest
/// ones and observe `RecvError::Lagged`.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<PortfolioEvent>,
}

impl EventBus {
    /// Creates a bus buffering up to `capacity` events (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Sends `event` to every live receiver and returns how many there were.
    /// With no receivers the event is dropped.
    pub fn publish(&self, event: PortfolioEvent) -> usize {
        tracing::trace!(event_type = event.event_type_str(), "publishing event");
        self.sender.send(event).unwrap_or(0)
    }

    /// Opens a receiver for events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PortfolioEvent> {
        self.sender.subscribe()
    }

    /// Number of open receivers, i.e. connected WebSocket clients.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn shared(url: &str) -> PortfolioEvent {
        PortfolioEvent::ShareLinkCreated {
            url: url.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn nobody_listening() {
        let bus = EventBus::new(4);
        assert_eq!(bus.publish(shared("https://p.test/share/a")), 0);
    }

    #[tokio::test]
    async fn every_receiver_gets_a_copy() {
        let bus = EventBus::new(4);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        assert_eq!(bus.publish(shared("https://p.test/share/b")), 2);

        for rx in [&mut first, &mut second] {
            let Ok(PortfolioEvent::ShareLinkCreated { url, .. }) = rx.recv().await else {
                panic!("expected share event");
            };
            assert_eq!(url, "https://p.test/share/b");
        }
    }

    #[tokio::test]
    async fn slow_receiver_lags() {
        let bus = EventBus::new(1);
        let mut rx = bus.subscribe();
        bus.publish(shared("https://p.test/share/1"));
        bus.publish(shared("https://p.test/share/2"));

        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(1))
        ));
        let Ok(PortfolioEvent::ShareLinkCreated { url, .. }) = rx.recv().await else {
            panic!("expected newest event after lag");
        };
        assert_eq!(url, "https://p.test/share/2");
    }

    #[test]
    fn dropped_receivers_are_not_counted() {
        let bus = EventBus::new(4);
        let rx = bus.subscribe();
        let _kept = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);
        drop(rx);
        assert_eq!(bus.receiver_count(), 1);
    }
}

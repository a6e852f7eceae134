//! In-process publish/subscribe, keyed by channel name.
//!
//! Matches spec.md §5/§6's "single process, in-memory by default" contract:
//! `publish` delivers to every current subscriber synchronously, and the
//! default implementation may be swapped for a real broker without the core
//! noticing, since callers only depend on the `Broadcaster` trait.

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 1024;

/// Minimal pub/sub seam the core depends on.
pub trait Broadcaster: Send + Sync {
    /// Best-effort delivery to current subscribers of `channel`. Never fails
    /// the caller's transaction; implementations swallow delivery errors.
    fn publish(&self, channel: &str, message: Value);

    /// Subscribe to `channel`, receiving every message published after this call.
    fn subscribe(&self, channel: &str) -> broadcast::Receiver<Value>;
}

/// `tokio::sync::broadcast` channel per channel name.
pub struct InMemoryBroadcaster {
    channels: DashMap<String, broadcast::Sender<Value>>,
}

impl InMemoryBroadcaster {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    fn sender(&self, channel: &str) -> broadcast::Sender<Value> {
        self.channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone()
    }
}

impl Default for InMemoryBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Broadcaster for InMemoryBroadcaster {
    fn publish(&self, channel: &str, message: Value) {
        let sender = self.sender(channel);
        // No subscribers is not an error — it just means nobody is listening yet.
        let _ = sender.send(message);
    }

    fn subscribe(&self, channel: &str) -> broadcast::Receiver<Value> {
        self.sender(channel).subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn publish_reaches_existing_subscriber() {
        let bus = InMemoryBroadcaster::new();
        let mut rx = bus.subscribe("events");
        bus.publish("events", json!({"kind": "tick.advance"}));
        let received = rx.recv().await.unwrap();
        assert_eq!(received["kind"], "tick.advance");
    }

    #[tokio::test]
    async fn publish_with_no_subscribers_does_not_panic() {
        let bus = InMemoryBroadcaster::new();
        bus.publish("events", json!({"kind": "noop"}));
    }
}

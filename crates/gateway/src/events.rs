//! Informational session events fanned out to SSE subscribers.
//!
//! Publishing never blocks and never fails: with no subscribers the event
//! is dropped, and slow subscribers skip what they missed.

use serde::Serialize;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    Created { session_id: String, title: String },
    Heartbeat { session_id: String, hb_line: String },
}

impl SessionEvent {
    /// SSE `event:` name.
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Created { .. } => "session.created",
            SessionEvent::Heartbeat { .. } => "session.heartbeat",
        }
    }
}

pub struct EventHub {
    tx: broadcast::Sender<SessionEvent>,
}

impl EventHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn publish(&self, event: SessionEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let hub = EventHub::new();
        let mut rx = hub.subscribe();
        hub.publish(SessionEvent::Heartbeat {
            session_id: "s".into(),
            hb_line: "HB#1: done".into(),
        });
        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.name(), "session.heartbeat");
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "heartbeat");
        assert_eq!(json["hb_line"], "HB#1: done");
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        EventHub::new().publish(SessionEvent::Created {
            session_id: "s".into(),
            title: "t".into(),
        });
    }
}

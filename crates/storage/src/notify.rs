use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Advisory notification that a storage key holds a new value.
///
/// Carries the logical key and the freshly serialized payload so other
/// contexts observing the same storage can react without re-reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub key: String,
    pub payload: String,
}

/// Best-effort fan-out of change events to subscribed contexts.
///
/// Delivery is advisory: there is no ordering guarantee across
/// subscribers, disconnected receivers are pruned on the next publish, and
/// a failed delivery never surfaces to the writer.
#[derive(Clone, Default)]
pub struct ChangeBus {
    subscribers: Arc<Mutex<Vec<Sender<ChangeEvent>>>>,
}

impl ChangeBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber and returns its event receiver.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<ChangeEvent> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }

    /// Publishes a change to all live subscribers.
    pub fn publish(&self, key: &str, payload: &str) {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            return;
        };
        subscribers.retain(|tx| {
            tx.send(ChangeEvent {
                key: key.to_owned(),
                payload: payload.to_owned(),
            })
            .is_ok()
        });
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_receive_published_events() {
        let bus = ChangeBus::new();
        let rx = bus.subscribe();

        bus.publish("round_history", "[]");

        let event = rx.try_recv().unwrap();
        assert_eq!(event.key, "round_history");
        assert_eq!(event.payload, "[]");
    }

    #[test]
    fn every_subscriber_sees_the_event() {
        let bus = ChangeBus::new();
        let first = bus.subscribe();
        let second = bus.subscribe();

        bus.publish("global_progress", "{\"round\":2,\"score\":60}");

        assert!(first.try_recv().is_ok());
        assert!(second.try_recv().is_ok());
    }

    #[test]
    fn dropped_subscribers_do_not_break_publishing() {
        let bus = ChangeBus::new();
        let rx = bus.subscribe();
        drop(rx);

        bus.publish("round_history", "[]");

        let live = bus.subscribe();
        bus.publish("round_history", "[1]");
        assert_eq!(live.try_recv().unwrap().payload, "[1]");
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = ChangeBus::new();
        bus.publish("round_history", "[]");
    }
}

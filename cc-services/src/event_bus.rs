//! Typed event bus for ledger change notifications.
//!
//! Uses a tokio broadcast channel so the ledger can announce changes without
//! knowing who is listening (a queue counter display, a notifier, a log
//! shipper). Emitting never blocks and never fails the operation that
//! triggered it.

use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

use cc_models::{BookingStatus, QueueStatus};

/// Changes the ledger and gallery announce after they have been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    /// A booking was accepted and stored as pending.
    BookingSubmitted {
        booking_id: String,
        service_name: String,
    },
    /// A booking's status was changed.
    BookingStatusChanged {
        booking_id: String,
        status: BookingStatus,
    },
    /// A customer joined the waitlist.
    QueueJoined {
        entry_id: String,
        position: u32,
    },
    /// A waitlist entry's status was changed.
    QueueStatusChanged {
        entry_id: String,
        status: QueueStatus,
    },
    /// A contact message was stored.
    MessageReceived {
        message_id: String,
    },
    /// An image was added to the gallery.
    GalleryImageAdded {
        image_id: String,
    },
    /// An image was removed from the gallery.
    GalleryImageRemoved {
        image_id: String,
    },
}

/// Event bus backed by a tokio broadcast channel.
///
/// Every subscriber gets every event. Slow subscribers that fall behind
/// receive a `Lagged` error and miss events.
#[derive(Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<LedgerEvent>>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Subscribe to receive ledger events.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers.
    pub fn emit(&self, event: LedgerEvent) {
        let label = event_label(&event);
        match self.sender.send(event) {
            Ok(count) => {
                debug!("event_bus: emitted {label} to {count} subscriber(s)");
            }
            Err(_) => {
                debug!("event_bus: no subscribers for {label}");
            }
        }
    }

    /// Get the current number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

fn event_label(event: &LedgerEvent) -> &'static str {
    match event {
        LedgerEvent::BookingSubmitted { .. } => "BookingSubmitted",
        LedgerEvent::BookingStatusChanged { .. } => "BookingStatusChanged",
        LedgerEvent::QueueJoined { .. } => "QueueJoined",
        LedgerEvent::QueueStatusChanged { .. } => "QueueStatusChanged",
        LedgerEvent::MessageReceived { .. } => "MessageReceived",
        LedgerEvent::GalleryImageAdded { .. } => "GalleryImageAdded",
        LedgerEvent::GalleryImageRemoved { .. } => "GalleryImageRemoved",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_emit_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.emit(LedgerEvent::QueueJoined {
            entry_id: "q-1".into(),
            position: 1,
        });

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            LedgerEvent::QueueJoined {
                entry_id: "q-1".into(),
                position: 1
            }
        );
    }

    #[tokio::test]
    async fn test_event_bus_no_subscribers() {
        let bus = EventBus::new(16);
        bus.emit(LedgerEvent::MessageReceived {
            message_id: "m-1".into(),
        });
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_event_labels() {
        assert_eq!(
            event_label(&LedgerEvent::BookingStatusChanged {
                booking_id: String::new(),
                status: BookingStatus::Confirmed,
            }),
            "BookingStatusChanged"
        );
    }
}

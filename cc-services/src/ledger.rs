//! Booking, waitlist and contact-message ledger.
//!
//! The ledger owns no records itself. Every operation reads the affected
//! collection from the durable store, applies the change and writes the whole
//! collection back, so two ledgers over the same store always agree and a
//! failed write leaves the previously persisted state as it was.

use chrono::Utc;
use tracing::{debug, info, warn};

use cc_core::config::AppConfig;
use cc_core::constants::{keys, DEFAULT_POPULAR_SERVICES_LIMIT, DEFAULT_RECENT_ACTIVITY_LIMIT};
use cc_core::error::{CcError, CcResult};
use cc_models::store::{load_collection, save_collection};
use cc_models::{
    BookingRecord, BookingRequest, BookingStatus, ContactMessage, ContactRequest, DurableStore,
    QueueEntry, QueueRequest, QueueStatus,
};

use crate::event_bus::{EventBus, LedgerEvent};
use crate::export::LedgerExport;
use crate::hours::BusinessHours;
use crate::service::{Service, ServiceState};
use crate::stats::{self, LedgerStats};

/// The booking/queue ledger over an injected durable store.
pub struct Ledger<S: DurableStore> {
    state: ServiceState,
    store: S,
    hours: BusinessHours,
    popular_services_limit: usize,
    recent_activity_limit: usize,
    event_bus: Option<EventBus>,
}

impl<S: DurableStore> Ledger<S> {
    /// Create a ledger with the given bookable window and default stats limits.
    pub fn new(store: S, hours: BusinessHours) -> Self {
        Self {
            state: ServiceState::Created,
            store,
            hours,
            popular_services_limit: DEFAULT_POPULAR_SERVICES_LIMIT,
            recent_activity_limit: DEFAULT_RECENT_ACTIVITY_LIMIT,
            event_bus: None,
        }
    }

    /// Create a ledger using the `[business]` and `[stats]` config sections.
    pub fn from_config(store: S, config: &AppConfig) -> CcResult<Self> {
        let hours = BusinessHours::from_config(&config.business)?;
        Ok(Self::new(store, hours)
            .with_stats_limits(config.stats.popular_services_limit, config.stats.recent_activity_limit))
    }

    /// Broadcast a `LedgerEvent` after each successful mutation.
    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn with_stats_limits(mut self, popular_services: usize, recent_activity: usize) -> Self {
        self.popular_services_limit = popular_services;
        self.recent_activity_limit = recent_activity;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn hours(&self) -> BusinessHours {
        self.hours
    }

    /// Record a booking request as a new pending booking.
    ///
    /// Fails with a validation error if the preferred time is outside
    /// business hours or a required field is blank. Nothing is persisted on
    /// failure.
    pub fn submit_booking(&self, request: BookingRequest) -> CcResult<BookingRecord> {
        self.hours.check(request.preferred_time)?;
        let record = BookingRecord::new(request)?;

        let mut bookings = self.list_bookings()?;
        bookings.push(record.clone());
        save_collection(&self.store, keys::BOOKINGS, &bookings)?;

        info!(
            booking_id = %record.id,
            service = %record.service_name,
            date = %record.preferred_date,
            "booking submitted"
        );
        // No delivery channel exists; the confirmation is only logged.
        info!(
            booking_id = %record.id,
            phone = %record.customer_phone,
            "booking confirmation sent: {}",
            record.confirmation_summary()
        );

        self.emit(LedgerEvent::BookingSubmitted {
            booking_id: record.id.clone(),
            service_name: record.service_name.clone(),
        });
        Ok(record)
    }

    /// Add a customer to the waitlist.
    pub fn join_queue(&self, request: QueueRequest) -> CcResult<QueueEntry> {
        let mut queue = self.list_queue()?;
        let position = next_queue_position(&queue)?;
        let entry = QueueEntry::new(request, position)?;

        queue.push(entry.clone());
        save_collection(&self.store, keys::QUEUE, &queue)?;

        info!(entry_id = %entry.id, position, "customer joined queue");
        self.emit(LedgerEvent::QueueJoined {
            entry_id: entry.id.clone(),
            position,
        });
        Ok(entry)
    }

    /// Store a contact-form message.
    pub fn submit_contact_message(&self, request: ContactRequest) -> CcResult<ContactMessage> {
        let message = ContactMessage::new(request)?;

        let mut messages = self.list_messages()?;
        messages.push(message.clone());
        save_collection(&self.store, keys::MESSAGES, &messages)?;

        info!(message_id = %message.id, "contact message received");
        self.emit(LedgerEvent::MessageReceived {
            message_id: message.id.clone(),
        });
        Ok(message)
    }

    /// Set a booking's status and stamp `updatedAt`.
    ///
    /// Setting the current status again is allowed and restamps `updatedAt`.
    pub fn update_booking_status(&self, id: &str, status: BookingStatus) -> CcResult<BookingRecord> {
        let mut bookings = self.list_bookings()?;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| CcError::not_found("booking", id))?;

        let previous = booking.status;
        booking.set_status(status);
        let updated = booking.clone();
        save_collection(&self.store, keys::BOOKINGS, &bookings)?;

        info!(booking_id = %id, from = %previous, to = %status, "booking status updated");
        self.emit(LedgerEvent::BookingStatusChanged {
            booking_id: updated.id.clone(),
            status,
        });
        Ok(updated)
    }

    /// Set a queue entry's status and stamp `updatedAt`. Positions are never renumbered.
    pub fn update_queue_status(&self, id: &str, status: QueueStatus) -> CcResult<QueueEntry> {
        let mut queue = self.list_queue()?;
        let entry = queue
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| CcError::not_found("queue entry", id))?;

        let previous = entry.status;
        entry.set_status(status);
        let updated = entry.clone();
        save_collection(&self.store, keys::QUEUE, &queue)?;

        info!(entry_id = %id, from = %previous, to = %status, "queue status updated");
        self.emit(LedgerEvent::QueueStatusChanged {
            entry_id: updated.id.clone(),
            status,
        });
        Ok(updated)
    }

    pub fn list_bookings(&self) -> CcResult<Vec<BookingRecord>> {
        load_collection(&self.store, keys::BOOKINGS)
    }

    pub fn list_queue(&self) -> CcResult<Vec<QueueEntry>> {
        load_collection(&self.store, keys::QUEUE)
    }

    pub fn list_messages(&self) -> CcResult<Vec<ContactMessage>> {
        load_collection(&self.store, keys::MESSAGES)
    }

    /// Number of queue entries currently waiting.
    pub fn waiting_count(&self) -> CcResult<usize> {
        Ok(self.list_queue()?.iter().filter(|q| q.is_waiting()).count())
    }

    /// Counters, popular services and the recent-activity feed.
    pub fn compute_stats(&self) -> CcResult<LedgerStats> {
        let bookings = self.list_bookings()?;
        let queue = self.list_queue()?;
        let messages = self.list_messages()?;
        Ok(self.stats_for(&bookings, &queue, &messages))
    }

    /// Snapshot of every collection plus stats.
    pub fn export_data(&self) -> CcResult<LedgerExport> {
        let bookings = self.list_bookings()?;
        let queue = self.list_queue()?;
        let messages = self.list_messages()?;
        let stats = self.stats_for(&bookings, &queue, &messages);

        debug!(
            bookings = bookings.len(),
            queue = queue.len(),
            messages = messages.len(),
            "exporting ledger"
        );
        Ok(LedgerExport {
            bookings,
            queue,
            messages,
            stats,
            exported_at: Utc::now(),
        })
    }

    fn stats_for(
        &self,
        bookings: &[BookingRecord],
        queue: &[QueueEntry],
        messages: &[ContactMessage],
    ) -> LedgerStats {
        stats::compute(
            bookings,
            queue,
            messages,
            self.popular_services_limit,
            self.recent_activity_limit,
        )
    }

    fn emit(&self, event: LedgerEvent) {
        if let Some(bus) = &self.event_bus {
            bus.emit(event);
        }
    }
}

/// Position for the next queue entry: one past the highest waiting position,
/// or 1 when nobody is waiting.
pub fn next_queue_position(queue: &[QueueEntry]) -> CcResult<u32> {
    match queue.iter().filter(|q| q.is_waiting()).map(|q| q.position).max() {
        None => Ok(1),
        Some(highest) => highest
            .checked_add(1)
            .ok_or_else(|| CcError::Internal(format!("queue position {highest} cannot be followed"))),
    }
}

impl<S: DurableStore + Send + Sync> Service for Ledger<S> {
    fn name(&self) -> &str {
        "ledger"
    }

    fn state(&self) -> ServiceState {
        self.state
    }

    fn init(&mut self) -> CcResult<()> {
        self.state = ServiceState::Initializing;

        match self.export_data() {
            Ok(snapshot) => {
                info!(
                    bookings = snapshot.bookings.len(),
                    queue = snapshot.queue.len(),
                    waiting = snapshot.stats.queue_length,
                    messages = snapshot.messages.len(),
                    "ledger loaded"
                );
                self.state = ServiceState::Running;
                Ok(())
            }
            Err(e) => {
                warn!("ledger failed to load stored collections: {e}");
                self.state = ServiceState::Failed;
                Err(e)
            }
        }
    }

    fn shutdown(&mut self) -> CcResult<()> {
        self.state = ServiceState::Stopped;
        info!("ledger stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_models::MemoryStore;

    fn ledger() -> Ledger<MemoryStore> {
        Ledger::new(MemoryStore::new(), BusinessHours::default())
    }

    fn join(ledger: &Ledger<MemoryStore>, name: &str) -> QueueEntry {
        ledger
            .join_queue(QueueRequest {
                customer_name: name.into(),
                customer_phone: "9693427712".into(),
                service_interested: "grooming".into(),
                additional_notes: String::new(),
            })
            .unwrap()
    }

    #[test]
    fn test_next_position_empty_queue() {
        assert_eq!(next_queue_position(&[]).unwrap(), 1);
    }

    #[test]
    fn test_join_rejected_when_last_position_is_exhausted() {
        let ledger = ledger();
        let mut last = join(&ledger, "A");
        last.position = u32::MAX;
        save_collection(ledger.store(), keys::QUEUE, &[last.clone()]).unwrap();

        let err = ledger
            .join_queue(QueueRequest {
                customer_name: "B".into(),
                customer_phone: "9693427712".into(),
                service_interested: "grooming".into(),
                additional_notes: String::new(),
            })
            .unwrap_err();
        assert!(matches!(err, CcError::Internal(_)), "got {err}");
        assert_eq!(ledger.list_queue().unwrap(), vec![last]);
    }

    #[test]
    fn test_position_after_everyone_served() {
        let ledger = ledger();
        let first = join(&ledger, "A");
        ledger.update_queue_status(&first.id, QueueStatus::Served).unwrap();
        assert_eq!(join(&ledger, "B").position, 1);
    }

    #[test]
    fn test_waiting_count() {
        let ledger = ledger();
        let a = join(&ledger, "A");
        join(&ledger, "B");
        ledger.update_queue_status(&a.id, QueueStatus::Cancelled).unwrap();
        assert_eq!(ledger.waiting_count().unwrap(), 1);
    }

    #[test]
    fn test_service_lifecycle() {
        let mut ledger = ledger();
        assert_eq!(ledger.name(), "ledger");
        ledger.init().unwrap();
        assert!(ledger.is_healthy());
        ledger.shutdown().unwrap();
        assert_eq!(ledger.state(), ServiceState::Stopped);
    }

    #[test]
    fn test_init_fails_on_unreadable_collection() {
        let store = MemoryStore::new();
        store.set(keys::QUEUE, "{not json").unwrap();
        let mut ledger = Ledger::new(store, BusinessHours::default());
        assert!(matches!(ledger.init(), Err(CcError::Serialization(_))));
        assert_eq!(ledger.state(), ServiceState::Failed);
    }
}

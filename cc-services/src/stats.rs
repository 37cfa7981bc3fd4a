//! Dashboard statistics derived from the three ledger collections.
//!
//! Everything here is a pure function over slices so the ledger can compute
//! stats from one consistent read of the store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use cc_models::{BookingRecord, ContactMessage, QueueEntry};

/// Aggregate counters plus the popular-services and recent-activity lists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStats {
    pub total_bookings: usize,
    pub pending_bookings: usize,
    pub confirmed_bookings: usize,
    /// Queue entries still waiting.
    pub queue_length: usize,
    pub total_messages: usize,
    pub popular_services: Vec<ServiceCount>,
    pub recent_activity: Vec<ActivityEntry>,
}

/// How many bookings name a given service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCount {
    pub name: String,
    pub count: usize,
}

/// The record behind an activity entry, tagged by which collection it came from.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Activity {
    Booking(BookingRecord),
    Queue(QueueEntry),
    Message(ContactMessage),
}

impl Activity {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Booking(_) => "booking",
            Self::Queue(_) => "queue",
            Self::Message(_) => "message",
        }
    }

    /// One-line description for tables and logs.
    pub fn summary(&self) -> String {
        match self {
            Self::Booking(b) => format!("{} booked {} ({})", b.customer_name, b.service_name, b.status),
            Self::Queue(q) => format!("{} joined the queue at #{} ({})", q.customer_name, q.position, q.status),
            Self::Message(m) => format!("{} sent a message", m.name),
        }
    }
}

/// One row of the recent-activity feed: `{type, data, date}` when serialized.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    #[serde(flatten)]
    pub activity: Activity,
    pub date: DateTime<Utc>,
}

/// Compute the full stats block.
pub fn compute(
    bookings: &[BookingRecord],
    queue: &[QueueEntry],
    messages: &[ContactMessage],
    popular_limit: usize,
    recent_limit: usize,
) -> LedgerStats {
    LedgerStats {
        total_bookings: bookings.len(),
        pending_bookings: bookings.iter().filter(|b| b.is_pending()).count(),
        confirmed_bookings: bookings.iter().filter(|b| b.is_confirmed()).count(),
        queue_length: queue.iter().filter(|q| q.is_waiting()).count(),
        total_messages: messages.len(),
        popular_services: popular_services(bookings, popular_limit),
        recent_activity: recent_activity(bookings, queue, messages, recent_limit),
    }
}

/// Service names by booking count, descending. Ties keep first-seen order.
pub fn popular_services(bookings: &[BookingRecord], limit: usize) -> Vec<ServiceCount> {
    let mut counts: Vec<ServiceCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for booking in bookings {
        match index.get(booking.service_name.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(booking.service_name.as_str(), counts.len());
                counts.push(ServiceCount {
                    name: booking.service_name.clone(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so equal counts stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Newest entries across all three collections.
///
/// Bookings are dated by `createdAt`, queue entries by `joinedAt` and
/// messages by `sentAt`. Equal timestamps keep bookings before queue entries
/// before messages, each in insertion order.
pub fn recent_activity(
    bookings: &[BookingRecord],
    queue: &[QueueEntry],
    messages: &[ContactMessage],
    limit: usize,
) -> Vec<ActivityEntry> {
    let mut all: Vec<ActivityEntry> = bookings
        .iter()
        .map(|b| ActivityEntry {
            date: b.created_at,
            activity: Activity::Booking(b.clone()),
        })
        .chain(queue.iter().map(|q| ActivityEntry {
            date: q.joined_at,
            activity: Activity::Queue(q.clone()),
        }))
        .chain(messages.iter().map(|m| ActivityEntry {
            date: m.sent_at,
            activity: Activity::Message(m.clone()),
        }))
        .collect();

    all.sort_by(|a, b| b.date.cmp(&a.date));
    all.truncate(limit);
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveTime};
    use cc_models::{BookingRequest, BookingStatus, ContactRequest, QueueRequest, QueueStatus};

    fn booking(service: &str) -> BookingRecord {
        BookingRecord::new(BookingRequest {
            service_type: "grooming".into(),
            service_name: service.into(),
            customer_name: "Ravi".into(),
            customer_phone: "9693427712".into(),
            customer_email: String::new(),
            preferred_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            preferred_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            additional_notes: String::new(),
        })
        .unwrap()
    }

    fn queue_entry(position: u32) -> QueueEntry {
        QueueEntry::new(
            QueueRequest {
                customer_name: "Meera".into(),
                customer_phone: "8578901229".into(),
                service_interested: "bath".into(),
                additional_notes: String::new(),
            },
            position,
        )
        .unwrap()
    }

    fn message() -> ContactMessage {
        ContactMessage::new(ContactRequest {
            name: "Kabir".into(),
            email: "kabir@example.com".into(),
            phone: String::new(),
            message: "Do you board kittens?".into(),
        })
        .unwrap()
    }

    #[test]
    fn test_popular_services_ranking() {
        let bookings: Vec<_> = ["A", "B", "A", "A", "B"].iter().map(|s| booking(s)).collect();
        let popular = popular_services(&bookings, 5);
        assert_eq!(
            popular,
            vec![
                ServiceCount { name: "A".into(), count: 3 },
                ServiceCount { name: "B".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn test_popular_services_ties_keep_first_seen_order() {
        let bookings: Vec<_> = ["C", "B", "A", "B", "C", "A", "D"].iter().map(|s| booking(s)).collect();
        let names: Vec<_> = popular_services(&bookings, 3).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_counts() {
        let mut confirmed = booking("Bath");
        confirmed.set_status(BookingStatus::Confirmed);
        let bookings = vec![booking("Bath"), confirmed];

        let mut served = queue_entry(1);
        served.set_status(QueueStatus::Served);
        let queue = vec![served, queue_entry(2)];

        let stats = compute(&bookings, &queue, &[message()], 5, 10);
        assert_eq!(stats.total_bookings, 2);
        assert_eq!(stats.pending_bookings, 1);
        assert_eq!(stats.confirmed_bookings, 1);
        assert_eq!(stats.queue_length, 1);
        assert_eq!(stats.total_messages, 1);
    }

    #[test]
    fn test_recent_activity_order_and_cap() {
        let base = Utc::now();
        let mut bookings = Vec::new();
        for i in 0..6 {
            let mut b = booking("Bath");
            b.created_at = base + Duration::minutes(i * 3);
            bookings.push(b);
        }
        let mut queue = Vec::new();
        for i in 0..6 {
            let mut q = queue_entry(i as u32 + 1);
            q.joined_at = base + Duration::minutes(i * 3 + 1);
            queue.push(q);
        }
        let mut m = message();
        m.sent_at = base + Duration::minutes(100);

        let recent = recent_activity(&bookings, &queue, &[m], 10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].activity.kind(), "message");
        assert!(recent.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn test_activity_entry_shape() {
        let entry = ActivityEntry {
            date: Utc::now(),
            activity: Activity::Message(message()),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "message");
        assert_eq!(value["data"]["name"], "Kabir");
        assert!(value["date"].is_string());
    }
}

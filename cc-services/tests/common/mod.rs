//! Shared test utilities for integration tests.
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use tempfile::TempDir;

use cc_core::config::{AppConfig, ConfigHandle, StoreConfig};
use cc_models::{BookingRequest, ContactRequest, Database, MemoryStore, QueueRequest};
use cc_services::event_bus::EventBus;
use cc_services::{BusinessHours, Ledger};

/// Create a temporary SQLite store with schema and migrations applied.
/// Returns the Database and the TempDir (must be held alive for the duration of the test).
pub fn create_test_db() -> (Database, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("test.db");
    let db = Database::init(&path, &StoreConfig::default()).expect("failed to init test database");
    (db, dir)
}

/// Ledger over a fresh in-memory store with the default 10:00-19:00 window.
pub fn create_test_ledger() -> Ledger<MemoryStore> {
    Ledger::new(MemoryStore::new(), BusinessHours::default())
}

/// Create a default test configuration.
pub fn create_test_config() -> AppConfig {
    AppConfig::default()
}

/// Create a ConfigHandle wrapping a default config.
pub fn create_test_config_handle() -> ConfigHandle {
    ConfigHandle::new(create_test_config())
}

/// Create an EventBus with a small buffer suitable for tests.
pub fn create_test_event_bus() -> EventBus {
    EventBus::new(64)
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

/// A complete booking request for `service_name` at the given time.
pub fn booking_request(service_name: &str, at: NaiveTime) -> BookingRequest {
    BookingRequest {
        service_type: "grooming".into(),
        service_name: service_name.into(),
        customer_name: "Priya Sharma".into(),
        customer_phone: "+91 9693427712".into(),
        customer_email: "priya@example.com".into(),
        preferred_date: NaiveDate::from_ymd_opt(2025, 7, 4).expect("valid date"),
        preferred_time: at,
        additional_notes: "Persian cat, a bit shy".into(),
    }
}

pub fn queue_request(name: &str) -> QueueRequest {
    QueueRequest {
        customer_name: name.into(),
        customer_phone: "8578901229".into(),
        service_interested: "Bath & Brush".into(),
        additional_notes: String::new(),
    }
}

pub fn contact_request(name: &str) -> ContactRequest {
    ContactRequest {
        name: name.into(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: String::new(),
        message: "Do you groom long-haired cats?".into(),
    }
}

//! CandyChipaws Services - Business logic over the durable store.
//!
//! This crate provides:
//! - The booking/queue/contact ledger
//! - Dashboard statistics and the JSON export
//! - Gallery image management
//! - Business-hours validation
//! - Event bus (typed change notifications)
//! - The service lifecycle trait

pub mod service;
pub mod event_bus;
pub mod hours;
pub mod ledger;
pub mod stats;
pub mod export;
pub mod gallery;

// Re-export key types
pub use service::{Service, ServiceState};
pub use event_bus::{EventBus, LedgerEvent};
pub use hours::BusinessHours;
pub use ledger::Ledger;
pub use stats::{Activity, ActivityEntry, LedgerStats, ServiceCount};
pub use export::LedgerExport;
pub use gallery::GalleryService;

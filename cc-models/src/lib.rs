//! CandyChipaws Models - Record types, durable store backends, and validation.
//!
//! This crate owns the data layer: typed records for bookings, queue
//! entries, contact messages and gallery images, the `DurableStore` trait the
//! ledger persists through, an in-memory store and a SQLite-backed store
//! with versioned migrations, and the form validation helpers.

pub mod db;
pub mod schema;
pub mod migrations;
pub mod models;
pub mod store;
pub mod ids;
pub mod validation;

// Re-export key types
pub use db::{Database, DbPool};
pub use models::booking::{BookingRecord, BookingRequest, BookingStatus};
pub use models::queue_entry::{QueueEntry, QueueRequest, QueueStatus};
pub use models::contact_message::{ContactMessage, ContactRequest};
pub use models::gallery_image::GalleryImage;
pub use store::{DurableStore, MemoryStore};

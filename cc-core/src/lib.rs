//! CandyChipaws Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by all other CandyChipaws crates:
//! - Application configuration (store location, business hours, stats limits)
//! - Global error types covering all error categories
//! - Structured logging with tracing
//! - Platform directory detection
//! - Common constants (storage keys, defaults)

pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod constants;

// Re-export commonly used items at the crate root
pub use config::AppConfig;
pub use error::{CcError, CcResult};
pub use logging::init_logging;
pub use platform::Platform;

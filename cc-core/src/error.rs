//! Global error types for the CandyChipaws ledger.
//!
//! All error categories across the workspace are unified into a single
//! `CcError` enum with conversions from underlying library errors.

use thiserror::Error;

/// Convenience type alias for Results using CcError.
pub type CcResult<T> = Result<T, CcError>;

/// Unified error type covering all error categories in CandyChipaws.
#[derive(Error, Debug)]
pub enum CcError {
    // -- Input errors --
    /// Submitted data was rejected (outside business hours, blank field, bad status).
    #[error("validation error: {0}")]
    Validation(String),

    /// A record referenced by id does not exist in its collection.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Collection the lookup ran against ("booking", "queue entry", ...).
        kind: &'static str,
        /// The id that was looked up.
        id: String,
    },

    // -- Storage errors --
    /// The durable store failed to read or write a key.
    #[error("storage error: {0}")]
    Storage(String),

    /// SQLite database error.
    #[error("database error: {0}")]
    Database(String),

    /// Database migration failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// Database connection pool error.
    #[error("connection pool error: {0}")]
    Pool(String),

    /// Database integrity check failed.
    #[error("database integrity check failed: {0}")]
    IntegrityCheck(String),

    // -- Configuration errors --
    /// Failed to load or parse application configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    // -- Generic --
    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CcError {
    /// Shorthand for a `NotFound` error.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        CcError::NotFound { kind, id: id.into() }
    }

    /// Whether the caller should surface this error to the user as bad input.
    pub fn is_validation(&self) -> bool {
        matches!(self, CcError::Validation(_))
    }
}

impl From<serde_json::Error> for CcError {
    fn from(e: serde_json::Error) -> Self {
        CcError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for CcError {
    fn from(e: toml::de::Error) -> Self {
        CcError::Config(e.to_string())
    }
}

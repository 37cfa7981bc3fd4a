//! SQLite schema for the durable store.
//!
//! The store is a single key-value table: each ledger collection is one row
//! holding its JSON array.

use rusqlite::Connection;
use cc_core::error::{CcError, CcResult};
use tracing::debug;

/// Create all tables if they do not exist.
pub fn create_tables(conn: &Connection) -> CcResult<()> {
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| CcError::Database(format!("failed to create schema: {e}")))?;
    debug!("store schema verified");
    Ok(())
}

/// Drop all tables (used for store reset).
pub fn drop_tables(conn: &Connection) -> CcResult<()> {
    conn.execute_batch(
        "DROP TABLE IF EXISTS kv_store;
         DROP TABLE IF EXISTS schema_version;",
    )
    .map_err(|e| CcError::Database(format!("failed to drop tables: {e}")))?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

-- One row per stored collection. Later columns are added by migrations.
CREATE TABLE IF NOT EXISTS kv_store (
    key         TEXT PRIMARY KEY NOT NULL,
    value       TEXT NOT NULL
);
"#;

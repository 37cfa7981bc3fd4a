//! Versioned store migrations.
//!
//! Migrations run sequentially from the current stored version to the latest.
//! Each migration is an idempotent SQL script.

use rusqlite::Connection;
use tracing::{info, warn};
use cc_core::error::{CcError, CcResult};
use cc_core::constants::DB_SCHEMA_VERSION;

/// Run all pending migrations on the store.
pub fn run_migrations(conn: &Connection) -> CcResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version >= DB_SCHEMA_VERSION {
        return Ok(());
    }

    info!("running migrations from version {current_version} to {DB_SCHEMA_VERSION}");

    for version in (current_version + 1)..=DB_SCHEMA_VERSION {
        run_migration(conn, version)?;
    }

    set_schema_version(conn, DB_SCHEMA_VERSION)?;
    info!("migrations complete, schema at version {DB_SCHEMA_VERSION}");
    Ok(())
}

/// Get the current schema version from the store.
pub fn get_schema_version(conn: &Connection) -> CcResult<i32> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .map_err(|e| CcError::Migration(e.to_string()))?;

    if count == 0 {
        conn.execute("INSERT INTO schema_version (version) VALUES (0)", [])
            .map_err(|e| CcError::Migration(e.to_string()))?;
        return Ok(0);
    }

    conn.query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
        row.get(0)
    })
    .map_err(|e| CcError::Migration(e.to_string()))
}

fn set_schema_version(conn: &Connection, version: i32) -> CcResult<()> {
    conn.execute("UPDATE schema_version SET version = ?1", [version])
        .map_err(|e| CcError::Migration(e.to_string()))?;
    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> CcResult<()> {
    info!("applying migration version {version}");

    match version {
        1 => migration_v1(conn),
        _ => {
            warn!("unknown migration version {version}, skipping");
            Ok(())
        }
    }
}

/// Migration v1: track when each collection was last written.
///
/// Adds `kv_store.updated_at` and stamps rows that predate it.
fn migration_v1(conn: &Connection) -> CcResult<()> {
    if !has_column(conn, "kv_store", "updated_at")? {
        conn.execute_batch("ALTER TABLE kv_store ADD COLUMN updated_at TEXT;")
            .map_err(|e| CcError::Migration(e.to_string()))?;
    }

    let touched = conn
        .execute(
            "UPDATE kv_store SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE updated_at IS NULL",
            [],
        )
        .map_err(|e| CcError::Migration(e.to_string()))?;
    if touched > 0 {
        info!("backfilled updated_at on {touched} stored collections");
    }
    Ok(())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> CcResult<bool> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .map_err(|e| CcError::Migration(e.to_string()))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|e| CcError::Migration(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CcError::Migration(e.to_string()))?;
    Ok(names.iter().any(|name| name == column))
}

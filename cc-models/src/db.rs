//! SQLite-backed durable store.
//!
//! Uses SQLite in WAL mode with r2d2 connection pooling. Runs an integrity
//! check on startup and applies versioned migrations.

use std::path::Path;
use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, error, info, warn};

use cc_core::config::StoreConfig;
use cc_core::error::{CcError, CcResult};

use crate::migrations;
use crate::schema;
use crate::store::DurableStore;

/// Type alias for the SQLite connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Durable store backed by a SQLite file.
#[derive(Clone)]
pub struct Database {
    pool: Arc<DbPool>,
}

impl Database {
    /// Open (creating if needed) the store at the given path.
    ///
    /// Creates parent directories, applies connection pragmas, optionally
    /// runs an integrity check, then creates the schema and runs migrations.
    pub fn init(db_path: &Path, config: &StoreConfig) -> CcResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!("opening store at {}", db_path.display());

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(config.pool_size.max(1))
            .connection_customizer(Box::new(ConnectionCustomizer {
                wal_mode: config.wal_mode,
            }))
            .build(manager)
            .map_err(|e| CcError::Pool(e.to_string()))?;

        let db = Self {
            pool: Arc::new(pool),
        };

        if config.integrity_check_on_startup {
            db.run_integrity_check()?;
        }

        {
            let conn = db.conn()?;
            schema::create_tables(&conn)?;
            migrations::run_migrations(&conn)?;
        }

        Ok(db)
    }

    /// Get a connection from the pool.
    pub fn conn(&self) -> CcResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| CcError::Pool(e.to_string()))
    }

    /// Run a SQLite integrity check.
    pub fn run_integrity_check(&self) -> CcResult<()> {
        let conn = self.conn()?;
        let result: String = conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))
            .map_err(|e| CcError::Database(e.to_string()))?;

        if result != "ok" {
            error!("store integrity check failed: {result}");
            return Err(CcError::IntegrityCheck(result));
        }

        debug!("store integrity check passed");
        Ok(())
    }

    /// Keys currently stored, sorted.
    pub fn keys(&self) -> CcResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT key FROM kv_store ORDER BY key ASC")
            .map_err(|e| CcError::Database(e.to_string()))?;
        let keys = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| CcError::Database(e.to_string()))?
            .collect::<Result<Vec<String>, _>>()
            .map_err(|e| CcError::Database(e.to_string()))?;
        Ok(keys)
    }

    /// Get store statistics.
    pub fn stats(&self) -> CcResult<DatabaseStats> {
        let conn = self.conn()?;
        let (keys, bytes): (i64, i64) = conn
            .query_row(
                "SELECT COUNT(*), COALESCE(SUM(LENGTH(key) + LENGTH(value)), 0) FROM kv_store",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(|e| CcError::Database(e.to_string()))?;
        let schema_version = migrations::get_schema_version(&conn)?;

        Ok(DatabaseStats {
            keys,
            bytes,
            schema_version,
        })
    }

    /// Reset the store by dropping and recreating all tables.
    pub fn reset(&self) -> CcResult<()> {
        warn!("resetting store - all data will be lost");
        let conn = self.conn()?;
        schema::drop_tables(&conn)?;
        schema::create_tables(&conn)?;
        migrations::run_migrations(&conn)?;
        info!("store reset complete");
        Ok(())
    }
}

impl DurableStore for Database {
    fn get(&self, key: &str) -> CcResult<Option<String>> {
        let conn = self.conn().map_err(storage_error)?;
        conn.query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| row.get(0))
            .optional()
            .map_err(|e| CcError::Storage(format!("failed to read {key}: {e}")))
    }

    fn set(&self, key: &str, value: &str) -> CcResult<()> {
        let conn = self.conn().map_err(storage_error)?;
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )
        .map_err(|e| CcError::Storage(format!("failed to write {key}: {e}")))?;
        Ok(())
    }
}

fn storage_error(e: CcError) -> CcError {
    CcError::Storage(e.to_string())
}

/// Store size statistics.
#[derive(Debug, Clone)]
pub struct DatabaseStats {
    pub keys: i64,
    pub bytes: i64,
    pub schema_version: i32,
}

impl std::fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "keys={}, bytes={}, schema_version={}",
            self.keys, self.bytes, self.schema_version
        )
    }
}

/// r2d2 connection customizer that applies PRAGMA settings.
#[derive(Debug)]
struct ConnectionCustomizer {
    wal_mode: bool,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        if self.wal_mode {
            conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        }

        conn.execute_batch(
            "PRAGMA synchronous=NORMAL;
             PRAGMA busy_timeout=5000;",
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_db() -> (Database, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::init(&path, &StoreConfig::default()).unwrap();
        (db, dir)
    }

    #[test]
    fn test_database_init() {
        let (db, _dir) = test_db();
        let stats = db.stats().unwrap();
        assert_eq!(stats.keys, 0);
        assert_eq!(stats.bytes, 0);
        assert_eq!(stats.schema_version, cc_core::constants::DB_SCHEMA_VERSION);
    }

    #[test]
    fn test_get_set_overwrite() {
        let (db, _dir) = test_db();
        assert_eq!(db.get("candychipaws_bookings").unwrap(), None);
        db.set("candychipaws_bookings", "[]").unwrap();
        db.set("candychipaws_bookings", "[1]").unwrap();
        assert_eq!(db.get("candychipaws_bookings").unwrap().as_deref(), Some("[1]"));
        assert_eq!(db.keys().unwrap(), vec!["candychipaws_bookings".to_string()]);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reopen.db");
        {
            let db = Database::init(&path, &StoreConfig::default()).unwrap();
            db.set("catImages", "[]").unwrap();
        }
        let db = Database::init(&path, &StoreConfig::default()).unwrap();
        assert_eq!(db.get("catImages").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_reset_clears_values() {
        let (db, _dir) = test_db();
        db.set("k", "v").unwrap();
        db.reset().unwrap();
        assert_eq!(db.get("k").unwrap(), None);
    }

    #[test]
    fn test_integrity_check() {
        let (db, _dir) = test_db();
        assert!(db.run_integrity_check().is_ok());
    }
}

//! Application configuration management.
//!
//! Handles loading, saving, and accessing application configuration: where
//! the durable store lives, logging, the bookable business window, and the
//! limits used by the statistics report. Configuration is persisted as TOML
//! on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{CcError, CcResult};
use crate::platform::Platform;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Durable store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Business details and bookable hours.
    #[serde(default)]
    pub business: BusinessConfig,

    /// Statistics report limits.
    #[serde(default)]
    pub stats: StatsConfig,
}

/// Durable store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite store file. If empty, uses default location.
    #[serde(default)]
    pub path: String,

    /// Enable WAL (Write-Ahead Logging) mode.
    #[serde(default = "default_true")]
    pub wal_mode: bool,

    /// Maximum number of connections in the pool.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Run integrity check on startup.
    #[serde(default = "default_true")]
    pub integrity_check_on_startup: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

/// Business details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessConfig {
    /// Display name used in user-facing messages.
    #[serde(default = "default_business_name")]
    pub name: String,

    /// First bookable time of day, "HH:MM".
    #[serde(default = "default_opening_time")]
    pub opening_time: String,

    /// Last bookable time of day, "HH:MM", inclusive.
    #[serde(default = "default_closing_time")]
    pub closing_time: String,

    /// Phone numbers customers can call.
    #[serde(default = "default_phone_numbers")]
    pub phone_numbers: Vec<String>,
}

/// Statistics report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// How many services the popularity ranking keeps.
    #[serde(default = "default_popular_services_limit")]
    pub popular_services_limit: usize,

    /// How many entries the recent activity feed keeps.
    #[serde(default = "default_recent_activity_limit")]
    pub recent_activity_limit: usize,
}

// Default value functions for serde

fn default_true() -> bool {
    true
}

fn default_pool_size() -> u32 {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_business_name() -> String {
    constants::APP_NAME.to_string()
}

fn default_opening_time() -> String {
    constants::DEFAULT_OPENING_TIME.to_string()
}

fn default_closing_time() -> String {
    constants::DEFAULT_CLOSING_TIME.to_string()
}

fn default_phone_numbers() -> Vec<String> {
    vec![
        "+91 9693427712".to_string(),
        "+91 8092881183".to_string(),
        "+91 8578901229".to_string(),
    ]
}

fn default_popular_services_limit() -> usize {
    constants::DEFAULT_POPULAR_SERVICES_LIMIT
}

fn default_recent_activity_limit() -> usize {
    constants::DEFAULT_RECENT_ACTIVITY_LIMIT
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            wal_mode: true,
            pool_size: default_pool_size(),
            integrity_check_on_startup: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: default_business_name(),
            opening_time: default_opening_time(),
            closing_time: default_closing_time(),
            phone_numbers: default_phone_numbers(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            popular_services_limit: default_popular_services_limit(),
            recent_activity_limit: default_recent_activity_limit(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default config file path.
    pub fn load_default() -> CcResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> CcResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> CcResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| CcError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> CcResult<PathBuf> {
        Ok(Platform::config_dir()?.join("config.toml"))
    }

    /// Get the effective store path, using the configured path or the default.
    pub fn effective_store_path(&self) -> CcResult<PathBuf> {
        if self.store.path.is_empty() {
            Ok(Platform::data_dir()?.join("candychipaws.db"))
        } else {
            Ok(PathBuf::from(&self.store.path))
        }
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> CcResult<PathBuf> {
        if self.logging.directory.is_empty() {
            Ok(Platform::data_dir()?.join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }
}

/// Thread-safe configuration holder for shared access.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<AppConfig>>,
}

impl ConfigHandle {
    /// Create a new configuration handle.
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Read the configuration.
    pub async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, AppConfig> {
        self.inner.read().await
    }

    /// Write/update the configuration.
    pub async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, AppConfig> {
        self.inner.write().await
    }

    /// Clone out the current configuration.
    pub async fn snapshot(&self) -> AppConfig {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.store.wal_mode);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.business.opening_time, "10:00");
        assert_eq!(config.business.closing_time, "19:00");
        assert_eq!(config.stats.popular_services_limit, 5);
        assert_eq!(config.stats.recent_activity_limit, 10);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [business]
            closing_time = "20:00"
            "#,
        )
        .unwrap();
        assert_eq!(config.business.opening_time, "10:00");
        assert_eq!(config.business.closing_time, "20:00");
        assert_eq!(config.business.phone_numbers.len(), 3);
        assert_eq!(config.store.pool_size, 2);
    }

    #[test]
    fn test_roundtrip_toml() {
        let mut config = AppConfig::default();
        config.store.path = "/tmp/cc.db".into();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.store.path, "/tmp/cc.db");
        assert_eq!(
            deserialized.effective_store_path().unwrap(),
            PathBuf::from("/tmp/cc.db")
        );
    }

    #[tokio::test]
    async fn test_config_handle_write_visible() {
        let handle = ConfigHandle::new(AppConfig::default());
        handle.write().await.logging.level = "debug".into();
        assert_eq!(handle.snapshot().await.logging.level, "debug");
    }
}

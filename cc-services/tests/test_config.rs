//! Integration tests for application configuration.
//!
//! Tests config loading from TOML, saving and reloading, default values,
//! ConfigHandle shared access, and building a ledger from config.

mod common;

use cc_core::config::{AppConfig, ConfigHandle};
use cc_core::error::CcError;
use cc_core::platform::Platform;
use cc_models::MemoryStore;
use cc_services::Ledger;
use tempfile::TempDir;

use common::{booking_request, time};

#[test]
fn default_config_has_expected_values() {
    let config = AppConfig::default();
    assert!(config.store.path.is_empty());
    assert!(config.store.wal_mode);
    assert!(config.store.integrity_check_on_startup);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json_output);
    assert_eq!(config.business.opening_time, "10:00");
    assert_eq!(config.business.closing_time, "19:00");
    assert_eq!(config.business.phone_numbers.len(), 3);
    assert_eq!(config.stats.popular_services_limit, 5);
    assert_eq!(config.stats.recent_activity_limit, 10);
}

#[test]
fn config_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.business.closing_time = "21:00".into();
    config.stats.recent_activity_limit = 3;
    config.save_to_file(&path).unwrap();

    let loaded = AppConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded.business.closing_time, "21:00");
    assert_eq!(loaded.stats.recent_activity_limit, 3);
}

#[test]
fn partial_toml_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[business]\nopening_time = \"09:00\"\n").unwrap();

    let config = AppConfig::load_from_file(&path).unwrap();
    assert_eq!(config.business.opening_time, "09:00");
    assert_eq!(config.business.closing_time, "19:00");
    assert_eq!(config.store.pool_size, 2);
}

#[test]
fn malformed_toml_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[business\nopening_time = ").unwrap();
    assert!(matches!(AppConfig::load_from_file(&path), Err(CcError::Config(_))));
}

#[test]
fn ledger_uses_configured_limits() {
    let mut config = common::create_test_config();
    config.stats.popular_services_limit = 1;
    config.stats.recent_activity_limit = 2;
    let ledger = Ledger::from_config(MemoryStore::new(), &config).unwrap();

    for service in ["A", "B", "B"] {
        ledger.submit_booking(booking_request(service, time(13, 0))).unwrap();
    }
    let stats = ledger.compute_stats().unwrap();
    assert_eq!(stats.popular_services.len(), 1);
    assert_eq!(stats.popular_services[0].name, "B");
    assert_eq!(stats.recent_activity.len(), 2);
}

#[test]
fn invalid_business_hours_in_config_are_rejected() {
    let mut config = common::create_test_config();
    config.business.opening_time = "20:00".into();
    let result = Ledger::from_config(MemoryStore::new(), &config);
    assert!(matches!(result, Err(CcError::Config(_))));
}

#[test]
fn effective_paths_prefer_configured_values() {
    let mut config = AppConfig::default();
    config.store.path = "/tmp/cc/custom.db".into();
    assert_eq!(config.effective_store_path().unwrap().to_str(), Some("/tmp/cc/custom.db"));

    let default_dir = Platform::data_dir().unwrap();
    config.logging.directory.clear();
    assert_eq!(config.effective_log_dir().unwrap(), default_dir.join("logs"));
}

#[tokio::test]
async fn config_handle_shares_updates() {
    let handle: ConfigHandle = common::create_test_config_handle();
    let clone = handle.clone();
    clone.write().await.business.name = "Candy & Chipaws".into();
    assert_eq!(handle.read().await.business.name, "Candy & Chipaws");
    assert_eq!(handle.snapshot().await.business.name, "Candy & Chipaws");
}

//! CLI command implementations.

pub mod book;
pub mod queue;
pub mod contact;
pub mod bookings;
pub mod messages;
pub mod stats;
pub mod export;
pub mod gallery;
pub mod db;

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use console::style;
use serde::Serialize;

use cc_core::config::ConfigHandle;
use cc_core::error::CcResult;
use cc_models::validation::{is_valid_email, is_valid_phone};
use cc_models::Database;
use cc_services::{GalleryService, Ledger, Service};

/// Helper to open the store named in config.
pub async fn init_database(config: &ConfigHandle) -> CcResult<Database> {
    let config = config.read().await;
    let db_path = config.effective_store_path()?;
    Database::init(&db_path, &config.store)
}

/// Helper to open the ledger over the configured store.
///
/// Fails before any command runs if a stored collection cannot be read.
pub async fn open_ledger(config: &ConfigHandle) -> CcResult<Ledger<Database>> {
    let db = init_database(config).await?;
    let snapshot = config.snapshot().await;
    let mut ledger = Ledger::from_config(db, &snapshot)?;
    ledger.init()?;
    Ok(ledger)
}

/// Helper to open the gallery over the configured store.
pub async fn open_gallery(config: &ConfigHandle) -> CcResult<GalleryService<Database>> {
    let mut gallery = GalleryService::new(init_database(config).await?);
    gallery.init()?;
    Ok(gallery)
}

/// Table with the shared CLI look.
pub fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CcResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print advisory warnings for contact details that look wrong.
/// The ledger stores them regardless.
pub fn warn_contact_details(email: Option<&str>, phone: Option<&str>) {
    if let Some(email) = email.filter(|e| !e.trim().is_empty()) {
        if !is_valid_email(email) {
            eprintln!("  {} '{email}' does not look like an email address", style("WARN").yellow().bold());
        }
    }
    if let Some(phone) = phone.filter(|p| !p.trim().is_empty()) {
        if !is_valid_phone(phone) {
            eprintln!("  {} '{phone}' does not look like a phone number", style("WARN").yellow().bold());
        }
    }
}

/// Format a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Truncate a string to a maximum number of characters, appending an ellipsis if truncated.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars > 3 {
        let kept: String = s.chars().take(max_chars - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_core::config::AppConfig;
    use cc_core::constants::keys;
    use cc_core::error::CcError;
    use cc_models::DurableStore;

    fn config_for(dir: &tempfile::TempDir) -> ConfigHandle {
        let mut config = AppConfig::default();
        config.store.path = dir.path().join("front-desk.db").to_string_lossy().into_owned();
        ConfigHandle::new(config)
    }

    #[tokio::test]
    async fn test_open_ledger_starts_the_service() {
        let dir = tempfile::TempDir::new().unwrap();
        let ledger = open_ledger(&config_for(&dir)).await.unwrap();
        assert!(ledger.is_healthy());
    }

    #[tokio::test]
    async fn test_open_fails_on_unreadable_collection() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = config_for(&dir);
        let db = init_database(&config).await.unwrap();
        db.set(keys::BOOKINGS, "[{\"id\":").unwrap();
        db.set(keys::GALLERY, "not json").unwrap();

        assert!(matches!(open_ledger(&config).await, Err(CcError::Serialization(_))));
        assert!(matches!(open_gallery(&config).await, Err(CcError::Serialization(_))));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Full Grooming Deluxe", 10), "Full Gr...");
        assert_eq!(truncate("चिपॉज़ ग्रूमिंग", 5), "चि...");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}

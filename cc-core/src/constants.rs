//! Application-wide constants.

/// Application name.
pub const APP_NAME: &str = "CandyChipaws";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Store schema version.
pub const DB_SCHEMA_VERSION: i32 = 1;

/// Keys the ledger collections are persisted under.
pub mod keys {
    pub const BOOKINGS: &str = "candychipaws_bookings";
    pub const QUEUE: &str = "candychipaws_queue";
    pub const MESSAGES: &str = "candychipaws_messages";
    pub const GALLERY: &str = "catImages";

    /// All keys owned by the ledger and gallery.
    pub const ALL: &[&str] = &[BOOKINGS, QUEUE, MESSAGES, GALLERY];
}

/// Default first bookable time of day.
pub const DEFAULT_OPENING_TIME: &str = "10:00";

/// Default last bookable time of day (inclusive).
pub const DEFAULT_CLOSING_TIME: &str = "19:00";

/// Number of services reported in the popularity ranking.
pub const DEFAULT_POPULAR_SERVICES_LIMIT: usize = 5;

/// Number of entries reported in the recent activity feed.
pub const DEFAULT_RECENT_ACTIVITY_LIMIT: usize = 10;

/// Caption given to gallery images uploaded without one.
pub const DEFAULT_IMAGE_CAPTION: &str = "Beautiful Cat";

/// Prefix of exported data file names.
pub const EXPORT_FILE_PREFIX: &str = "candychipaws_data";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys_distinct() {
        let mut all = keys::ALL.to_vec();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 4);
    }
}

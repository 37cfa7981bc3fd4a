//! Full-ledger JSON snapshot for the business owner.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cc_core::constants::EXPORT_FILE_PREFIX;
use cc_models::{BookingRecord, ContactMessage, QueueEntry};

use crate::stats::LedgerStats;

/// Everything the ledger holds, plus stats, at one instant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerExport {
    pub bookings: Vec<BookingRecord>,
    pub queue: Vec<QueueEntry>,
    pub messages: Vec<ContactMessage>,
    pub stats: LedgerStats,
    pub exported_at: DateTime<Utc>,
}

impl LedgerExport {
    /// `candychipaws_data_<YYYY-MM-DD>.json`, dated by `exported_at`.
    pub fn suggested_file_name(&self) -> String {
        format!("{EXPORT_FILE_PREFIX}_{}.json", self.exported_at.format("%Y-%m-%d"))
    }

    pub fn to_json_pretty(&self) -> cc_core::CcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_suggested_file_name() {
        let export = LedgerExport {
            bookings: Vec::new(),
            queue: Vec::new(),
            messages: Vec::new(),
            stats: crate::stats::compute(&[], &[], &[], 5, 10),
            exported_at: Utc.with_ymd_and_hms(2025, 1, 9, 23, 59, 0).unwrap(),
        };
        assert_eq!(export.suggested_file_name(), "candychipaws_data_2025-01-09.json");

        let json = export.to_json_pretty().unwrap();
        assert!(json.contains("\"exportedAt\""));
        assert!(json.contains("\"popularServices\""));
    }
}

//! Waitlist (queue) entry model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cc_core::error::{CcError, CcResult};
use crate::ids::generate_id;
use crate::validation::require;

/// Status of a waitlist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueStatus {
    Waiting,
    Served,
    Cancelled,
}

impl QueueStatus {
    pub const ALL: [QueueStatus; 3] = [QueueStatus::Waiting, QueueStatus::Served, QueueStatus::Cancelled];

    /// Stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Served => "served",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueueStatus {
    type Err = CcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| CcError::Validation(format!("unknown queue status '{s}'")))
    }
}

/// Values submitted through the join-queue form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub service_interested: String,
    pub additional_notes: String,
}

/// A persisted waitlist entry.
///
/// `position` is fixed when the entry is created and never renumbered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub service_interested: String,
    #[serde(default)]
    pub additional_notes: String,
    pub position: u32,
    pub status: QueueStatus,
    pub joined_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl QueueEntry {
    /// Build a new waiting entry at the given position.
    pub fn new(request: QueueRequest, position: u32) -> CcResult<Self> {
        require("customer name", &request.customer_name)?;
        require("customer phone", &request.customer_phone)?;
        if position == 0 {
            return Err(CcError::Internal("queue positions start at 1".into()));
        }

        Ok(Self {
            id: generate_id(),
            customer_name: request.customer_name,
            customer_phone: request.customer_phone,
            service_interested: request.service_interested,
            additional_notes: request.additional_notes,
            position,
            status: QueueStatus::Waiting,
            joined_at: Utc::now(),
            updated_at: None,
        })
    }

    /// Change the status and stamp `updated_at`. The position is left alone.
    pub fn set_status(&mut self, status: QueueStatus) {
        self.status = status;
        self.updated_at = Some(Utc::now());
    }

    pub fn is_waiting(&self) -> bool {
        self.status == QueueStatus::Waiting
    }

    /// Acknowledgement shown to the customer after joining.
    pub fn confirmation_summary(&self) -> String {
        format!(
            "You've been added to our queue! Your position is #{}. We'll contact you at {} when it's your turn.",
            self.position, self.customer_phone
        )
    }
}

//! Booking record model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use cc_core::error::{CcError, CcResult};
use crate::ids::generate_id;
use crate::validation::require;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
    ];

    /// Stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = CcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| CcError::Validation(format!("unknown booking status '{s}'")))
    }
}

/// Values submitted through the booking form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub service_type: String,
    pub service_name: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub preferred_date: NaiveDate,
    pub preferred_time: NaiveTime,
    pub additional_notes: String,
}

/// A persisted booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: String,
    pub service_type: String,
    pub service_name: String,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: String,
    pub preferred_date: NaiveDate,
    #[serde(with = "super::form_time")]
    pub preferred_time: NaiveTime,
    #[serde(default)]
    pub additional_notes: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BookingRecord {
    /// Build a new pending booking from form input.
    ///
    /// Service type, service name, customer name and phone are required.
    /// Business-hours checks belong to the ledger, which knows the window.
    pub fn new(request: BookingRequest) -> CcResult<Self> {
        require("service type", &request.service_type)?;
        require("service name", &request.service_name)?;
        require("customer name", &request.customer_name)?;
        require("customer phone", &request.customer_phone)?;

        Ok(Self {
            id: generate_id(),
            service_type: request.service_type,
            service_name: request.service_name,
            customer_name: request.customer_name,
            customer_phone: request.customer_phone,
            customer_email: request.customer_email,
            preferred_date: request.preferred_date,
            preferred_time: request.preferred_time,
            additional_notes: request.additional_notes,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    /// Change the status and stamp `updated_at`.
    pub fn set_status(&mut self, status: BookingStatus) {
        self.status = status;
        self.updated_at = Some(Utc::now());
    }

    pub fn is_pending(&self) -> bool {
        self.status == BookingStatus::Pending
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    /// Acknowledgement shown to the customer after submitting.
    pub fn confirmation_summary(&self) -> String {
        format!(
            "Booking confirmed for {} on {} at {}. We'll contact you soon!",
            self.service_name,
            self.preferred_date.format("%A, %B %-d, %Y"),
            self.preferred_time.format("%-I:%M %p"),
        )
    }
}

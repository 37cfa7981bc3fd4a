//! Contact form message model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cc_core::error::CcResult;
use crate::ids::generate_id;
use crate::validation::require;

/// Values submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// A persisted contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

impl ContactMessage {
    /// Build a message from form input. Only presence is checked; phone is optional.
    pub fn new(request: ContactRequest) -> CcResult<Self> {
        require("name", &request.name)?;
        require("email", &request.email)?;
        require("message", &request.message)?;

        Ok(Self {
            id: generate_id(),
            name: request.name,
            email: request.email,
            phone: request.phone,
            message: request.message,
            sent_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_without_phone() {
        let msg = ContactMessage::new(ContactRequest {
            name: "Kabir".into(),
            email: "kabir@example.com".into(),
            phone: String::new(),
            message: "Do you have Maine Coons?".into(),
        })
        .unwrap();
        assert!(msg.phone.is_empty());

        let json = serde_json::to_value(&msg).unwrap();
        assert!(json["sentAt"].is_string());
    }

    #[test]
    fn test_blank_message_rejected() {
        let err = ContactMessage::new(ContactRequest {
            name: "Kabir".into(),
            email: "kabir@example.com".into(),
            phone: String::new(),
            message: "\n".into(),
        })
        .unwrap_err();
        assert!(err.is_validation());
    }
}

//! Form input validation helpers.
//!
//! `require` and the date/time parsers are enforced by the record
//! constructors. The email and phone checks are advisory: callers may warn
//! on them, but records are accepted regardless.

use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

use cc_core::error::{CcError, CcResult};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[1-9]\d{0,15}$").unwrap();
}

/// Whether the string looks like an email address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Whether the string looks like a phone number, ignoring whitespace.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_RE.is_match(&compact)
}

/// Fail with a validation error if a required field is blank.
pub fn require(field: &str, value: &str) -> CcResult<()> {
    if value.trim().is_empty() {
        return Err(CcError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Parse a form date ("YYYY-MM-DD").
pub fn parse_form_date(raw: &str) -> CcResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CcError::Validation(format!("invalid date '{raw}', expected YYYY-MM-DD")))
}

/// Parse a form time of day ("HH:MM", seconds optional).
pub fn parse_form_time(raw: &str) -> CcResult<NaiveTime> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| CcError::Validation(format!("invalid time '{raw}', expected HH:MM")))
}

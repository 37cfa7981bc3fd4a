//! Bookable business window.

use chrono::NaiveTime;

use cc_core::config::BusinessConfig;
use cc_core::error::{CcError, CcResult};
use cc_models::validation::parse_form_time;

/// The span of the day bookings may start in. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    opens: NaiveTime,
    closes: NaiveTime,
}

impl BusinessHours {
    /// Build a window; `opens` must not be after `closes`.
    pub fn new(opens: NaiveTime, closes: NaiveTime) -> CcResult<Self> {
        if opens > closes {
            return Err(CcError::Config(format!(
                "business hours open at {} but close at {}",
                opens.format("%H:%M"),
                closes.format("%H:%M")
            )));
        }
        Ok(Self { opens, closes })
    }

    /// Read the window from the `[business]` config section.
    pub fn from_config(config: &BusinessConfig) -> CcResult<Self> {
        let opens = parse_form_time(&config.opening_time)
            .map_err(|e| CcError::Config(format!("business.opening_time: {e}")))?;
        let closes = parse_form_time(&config.closing_time)
            .map_err(|e| CcError::Config(format!("business.closing_time: {e}")))?;
        Self::new(opens, closes)
    }

    pub fn opens(&self) -> NaiveTime {
        self.opens
    }

    pub fn closes(&self) -> NaiveTime {
        self.closes
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.opens <= time && time <= self.closes
    }

    /// Fail with a validation error if `time` is outside the window.
    pub fn check(&self, time: NaiveTime) -> CcResult<()> {
        if self.contains(time) {
            return Ok(());
        }
        Err(CcError::Validation(format!(
            "please select a time between {} and {} (got {})",
            self.opens.format("%-I:%M %p"),
            self.closes.format("%-I:%M %p"),
            time.format("%H:%M")
        )))
    }
}

impl Default for BusinessHours {
    /// 10:00 to 19:00.
    fn default() -> Self {
        Self {
            opens: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN),
            closes: NaiveTime::from_hms_opt(19, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_default_window_edges() {
        let hours = BusinessHours::default();
        assert!(hours.contains(t(10, 0)));
        assert!(hours.contains(t(19, 0)));
        assert!(!hours.contains(t(9, 59)));
        assert!(!hours.contains(t(19, 1)));
    }

    #[test]
    fn test_check_message() {
        let err = BusinessHours::default().check(t(8, 0)).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("10:00 AM and 7:00 PM"));
    }

    #[test]
    fn test_from_config() {
        let mut config = BusinessConfig::default();
        config.closing_time = "20:00".into();
        let hours = BusinessHours::from_config(&config).unwrap();
        assert!(hours.contains(t(19, 30)));
    }

    #[test]
    fn test_inverted_window_rejected() {
        assert!(BusinessHours::new(t(19, 0), t(10, 0)).is_err());

        let mut config = BusinessConfig::default();
        config.opening_time = "noon".into();
        assert!(matches!(BusinessHours::from_config(&config), Err(CcError::Config(_))));
    }
}

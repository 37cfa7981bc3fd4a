//! Record model definitions.

pub mod booking;
pub mod queue_entry;
pub mod contact_message;
pub mod gallery_image;

/// Serde adapter storing a time of day the way the booking form submits it ("HH:MM").
///
/// Seconds are written only when non-zero; both forms are accepted on read.
pub mod form_time {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        let text = if time.second() == 0 {
            time.format("%H:%M").to_string()
        } else {
            time.format("%H:%M:%S").to_string()
        };
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        crate::validation::parse_form_time(&raw).map_err(serde::de::Error::custom)
    }
}

/// Read a record id stored either as a string or as a bare JSON number.
///
/// The admin page stamped gallery images with `Date.now()`, so older
/// `catImages` entries carry numeric ids. Ids are always written back as strings.
pub fn deserialize_id<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

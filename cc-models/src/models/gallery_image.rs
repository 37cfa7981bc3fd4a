//! Gallery image model.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cc_core::constants::DEFAULT_IMAGE_CAPTION;
use cc_core::error::CcResult;
use crate::ids::generate_id;
use crate::validation::require;

/// An image shown in the public gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    /// Image content as a `data:` URL.
    pub src: String,
    pub caption: String,
    pub uploaded_at: DateTime<Utc>,
}

impl GalleryImage {
    /// Build a gallery image. A blank caption falls back to the default one.
    pub fn new(src: String, caption: &str) -> CcResult<Self> {
        require("image source", &src)?;
        let caption = if caption.trim().is_empty() {
            DEFAULT_IMAGE_CAPTION.to_string()
        } else {
            caption.to_string()
        };

        Ok(Self {
            id: generate_id(),
            src,
            caption,
            uploaded_at: Utc::now(),
        })
    }
}

/// Guess an image MIME type from a file name.
pub fn mime_type_for(file_name: &Path) -> &'static str {
    let ext = file_name
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Encode raw image bytes as a base64 `data:` URL.
pub fn image_data_url(bytes: &[u8], file_name: &Path) -> String {
    format!("data:{};base64,{}", mime_type_for(file_name), STANDARD.encode(bytes))
}

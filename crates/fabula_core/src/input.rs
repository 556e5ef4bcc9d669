//! Input types for generation requests.

use crate::MediaSource;
use serde::{Deserialize, Serialize};

/// Supported input types to generative backends.
///
/// # Examples
///
/// ```
/// use fabula_core::{Input, MediaSource};
///
/// // Text input
/// let text = Input::Text("A knight rides into the valley.".to_string());
///
/// // Image conditioning input with raw bytes
/// let image = Input::Image {
///     mime: Some("image/png".to_string()),
///     source: MediaSource::Binary(vec![0x89, 0x50, 0x4E, 0x47]),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text input.
    Text(String),

    /// Image input (PNG, JPEG, WebP, etc.), used as conditioning content.
    Image {
        /// MIME type, e.g., "image/png" or "image/jpeg"
        mime: Option<String>,
        /// Media source (URL, base64, or raw bytes)
        source: MediaSource,
    },
}

impl Input {
    /// Text content, if this input is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Input::Text(text) => Some(text),
            _ => None,
        }
    }

    /// True if this input carries non-text media.
    pub fn is_media(&self) -> bool {
        !matches!(self, Input::Text(_))
    }
}

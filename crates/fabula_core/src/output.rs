//! Output types from generation responses.

use serde::{Deserialize, Serialize};

/// Supported output types from generative backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Generated image output.
    Image {
        /// MIME type of the image
        mime: Option<String>,
        /// Binary image data
        data: Vec<u8>,
    },

    /// Structured JSON output.
    Json(serde_json::Value),
}

impl Output {
    /// Text content, if this output is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Image payload, if this output carries image data.
    pub fn as_image(&self) -> Option<(Option<&str>, &[u8])> {
        match self {
            Output::Image { mime, data } => Some((mime.as_deref(), data)),
            _ => None,
        }
    }
}

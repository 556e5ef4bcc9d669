//! Structured illustration payloads and their data-URI transport form.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use fabula_error::{MediaError, MediaErrorKind};
use serde::{Deserialize, Serialize};

/// A generated illustration: raw bytes plus their media type.
///
/// Internally illustrations are always carried in this structured form.
/// The string-packed data URI (`data:<mime>;base64,<payload>`) exists only
/// at display and serialization boundaries.
///
/// # Examples
///
/// ```
/// use fabula_core::SceneImage;
///
/// let image = SceneImage::new("image/png", vec![1, 2, 3]);
/// let uri = image.to_data_uri();
/// assert_eq!(uri, "data:image/png;base64,AQID");
/// assert_eq!(SceneImage::from_data_uri(&uri).unwrap(), image);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneImage {
    mime: String,
    data: Vec<u8>,
}

impl SceneImage {
    /// Create an image from its media type and raw bytes.
    ///
    /// The media type is stored as reported by the producer, unverified.
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }

    /// Media type tag, e.g. "image/png".
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Raw image bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image, returning its raw bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Encode as a self-contained data URI.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.data))
    }

    /// Decode a data URI back into structured form.
    ///
    /// # Errors
    ///
    /// Fails on a missing `data:` header, a missing `;base64` tag or
    /// payload separator, or an undecodable base64 payload.
    pub fn from_data_uri(uri: &str) -> Result<Self, MediaError> {
        let rest = uri.strip_prefix("data:").ok_or_else(|| {
            MediaError::new(MediaErrorKind::MalformedDataUri(
                "missing 'data:' header".to_string(),
            ))
        })?;
        let (header, payload) = rest.split_once(',').ok_or_else(|| {
            MediaError::new(MediaErrorKind::MalformedDataUri(
                "missing payload separator".to_string(),
            ))
        })?;
        let mime = header.strip_suffix(";base64").ok_or_else(|| {
            MediaError::new(MediaErrorKind::MalformedDataUri(
                "missing ';base64' tag".to_string(),
            ))
        })?;
        if mime.is_empty() {
            return Err(MediaError::new(MediaErrorKind::MalformedDataUri(
                "empty media type".to_string(),
            )));
        }
        let data = BASE64
            .decode(payload)
            .map_err(|e| MediaError::new(MediaErrorKind::Base64Decode(e.to_string())))?;
        Ok(Self {
            mime: mime.to_string(),
            data,
        })
    }
}

impl Serialize for SceneImage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_uri())
    }
}

impl<'de> Deserialize<'de> for SceneImage {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let uri = String::deserialize(deserializer)?;
        Self::from_data_uri(&uri).map_err(serde::de::Error::custom)
    }
}

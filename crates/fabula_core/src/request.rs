//! Request and response types for generation.

use crate::{Message, Output};
use serde::{Deserialize, Serialize};

/// Output modality requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modality {
    /// Text output
    Text,
    /// Image output
    Image,
}

/// Generic generation request (multimodal-safe).
///
/// # Examples
///
/// ```
/// use fabula_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest {
///     messages: vec![Message::user_text("Hello!")],
///     max_tokens: Some(100),
///     temperature: Some(0.7),
///     model: Some("gemini-2.5-flash".to_string()),
///     ..Default::default()
/// };
///
/// assert_eq!(request.messages.len(), 1);
/// assert_eq!(request.max_tokens, Some(100));
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder,
)]
#[builder(default)]
pub struct GenerateRequest {
    /// The messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
    /// Model identifier to use
    pub model: Option<String>,
    /// JSON schema the backend must constrain its text output to
    pub response_schema: Option<serde_json::Value>,
    /// Output modalities the backend must be willing to produce
    pub response_modalities: Option<Vec<Modality>>,
}

impl GenerateRequest {
    /// Start building a request.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use fabula_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse {
///     outputs: vec![Output::Text("Once upon a time...".to_string())],
/// };
///
/// assert_eq!(response.outputs.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// First text output, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.outputs.iter().find_map(Output::as_text)
    }

    /// First output fragment carrying embedded image data, if any.
    pub fn first_image(&self) -> Option<(Option<&str>, &[u8])> {
        self.outputs.iter().find_map(Output::as_image)
    }
}

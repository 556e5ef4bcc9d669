//! Google Gemini API client.
//!
//! Speaks the REST `generateContent` endpoint directly so that a single
//! client covers both structured-output text generation and image
//! generation with inline-image conditioning and mixed response
//! modalities.
//!
//! # Example
//!
//! ```no_run
//! use fabula_core::{GenerateRequest, Message};
//! use fabula_interface::StoryDriver;
//! use fabula_models::GeminiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new()?;
//! let request = GenerateRequest {
//!     messages: vec![Message::user_text("Hello")],
//!     ..Default::default()
//! };
//! let response = client.generate(&request).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use std::env;
use tracing::{debug, error, instrument};

use fabula_core::{GenerateRequest, GenerateResponse};
use fabula_error::{GeminiError, GeminiErrorKind};
use fabula_interface::StoryDriver;

use super::{GeminiResult, convert_request, convert_response};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default model for narrative (structured text) generation.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Default model for illustration generation (image + text modalities).
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";

/// Client for the Google Gemini REST API.
///
/// Requests may override the model per call via `GenerateRequest.model`;
/// otherwise the client's default model is used. Each call is exactly one
/// attempt: no retry, no backoff, no timeout.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model_name: String,
}

impl GeminiClient {
    /// Create a client with the default text model.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    #[instrument(name = "gemini_client_new")]
    pub fn new() -> GeminiResult<Self> {
        Self::with_model(DEFAULT_TEXT_MODEL)
    }

    /// Create a client with a specific default model.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    #[instrument(name = "gemini_client_with_model")]
    pub fn with_model(model_name: impl Into<String> + std::fmt::Debug) -> GeminiResult<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::new(GeminiErrorKind::MissingApiKey))?;
        Ok(Self::from_api_key(api_key, model_name))
    }

    /// Create a client from an explicit API key.
    pub fn from_api_key(api_key: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model_name: model_name.into(),
        }
    }

    /// Internal generate method that returns Gemini-specific errors.
    #[instrument(skip(self, req), fields(model = req.model.as_deref().unwrap_or(self.model_name.as_str())))]
    async fn generate_internal(&self, req: &GenerateRequest) -> GeminiResult<GenerateResponse> {
        let model = req.model.as_deref().unwrap_or(&self.model_name);
        let url = format!("{GEMINI_API_BASE}/{model}:generateContent");

        let body = convert_request(req)?;
        debug!(contents = body.contents.len(), "Sending Gemini request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send request to Gemini API");
                GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string()))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, body = %message, "Gemini API returned error");
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message,
            }));
        }

        let dto = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse Gemini response");
            GeminiError::new(GeminiErrorKind::ResponseParse(e.to_string()))
        })?;

        convert_response(dto)
    }
}

#[async_trait]
impl StoryDriver for GeminiClient {
    async fn generate(&self, req: &GenerateRequest) -> fabula_error::FabulaResult<GenerateResponse> {
        self.generate_internal(req).await.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

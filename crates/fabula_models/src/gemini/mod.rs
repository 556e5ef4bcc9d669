//! Google Gemini backend.

mod client;
mod conversion;
mod dto;

pub use client::{DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GeminiClient};

pub(crate) use conversion::{convert_request, convert_response};

/// Result type carrying Gemini-specific errors.
pub(crate) type GeminiResult<T> = Result<T, fabula_error::GeminiError>;

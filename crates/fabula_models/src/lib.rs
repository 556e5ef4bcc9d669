//! Generative backend clients for Fabula.
//!
//! Currently one backend is supported: Google Gemini over its REST
//! `generateContent` endpoint, covering both structured-output text
//! generation and image generation with inline-image conditioning.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::{DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GeminiClient};

//! Error types for the Fabula library.
//!
//! This crate provides the foundation error types used throughout the Fabula
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use fabula_error::{FabulaResult, JsonError};
//!
//! fn parse_payload() -> FabulaResult<String> {
//!     Err(JsonError::new("unexpected end of input"))?
//! }
//!
//! match parse_payload() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod gemini;
mod json;
mod media;
mod speech;
mod story;
mod video;

pub use config::ConfigError;
pub use error::{FabulaError, FabulaErrorKind, FabulaResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use json::JsonError;
pub use media::{MediaError, MediaErrorKind};
pub use speech::{SpeechError, SpeechErrorKind};
pub use story::{StoryError, StoryErrorKind};
pub use video::{VideoError, VideoErrorKind};

//! Top-level error wrapper types.

use crate::{
    ConfigError, GeminiError, JsonError, MediaError, SpeechError, StoryError, VideoError,
};

/// The foundation error enum. Each Fabula crate surfaces its failures
/// through one of these variants.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaError, JsonError};
///
/// let json_err = JsonError::new("trailing comma");
/// let err: FabulaError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FabulaErrorKind {
    /// Story generation error
    #[from(StoryError)]
    Story(StoryError),
    /// Gemini backend error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Speech synthesis error
    #[from(SpeechError)]
    Speech(SpeechError),
    /// Video export error
    #[from(VideoError)]
    Video(VideoError),
    /// Media transport encoding error
    #[from(MediaError)]
    Media(MediaError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Fabula error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fabula_error::{ConfigError, FabulaResult};
///
/// fn might_fail() -> FabulaResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fabula Error: {}", _0)]
pub struct FabulaError(Box<FabulaErrorKind>);

impl FabulaError {
    /// Create a new error from a kind.
    pub fn new(kind: FabulaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FabulaErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to FabulaErrorKind
impl<T> From<T> for FabulaError
where
    T: Into<FabulaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fabula operations.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaResult, JsonError};
///
/// fn decode() -> FabulaResult<String> {
///     Err(JsonError::new("unexpected token"))?
/// }
/// ```
pub type FabulaResult<T> = std::result::Result<T, FabulaError>;

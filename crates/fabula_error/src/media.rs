//! Media encoding/decoding error types.

/// Specific error conditions for media transport encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum MediaErrorKind {
    /// Data URI is missing its header or media type tag
    #[display("Malformed data URI: {}", _0)]
    MalformedDataUri(String),
    /// Base64 payload could not be decoded
    #[display("Base64 decode error: {}", _0)]
    Base64Decode(String),
}

/// Media error with source location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{MediaError, MediaErrorKind};
///
/// let err = MediaError::new(MediaErrorKind::MalformedDataUri("no comma".into()));
/// assert!(format!("{}", err).contains("Malformed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Media Error: {} at line {} in {}", kind, line, file)]
pub struct MediaError {
    /// The kind of error that occurred
    pub kind: MediaErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl MediaError {
    /// Create a new MediaError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MediaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

//! Video export error types.

/// Specific error conditions for video export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum VideoErrorKind {
    /// The encoder binary could not be found or spawned
    #[display("Video encoder unavailable: {}", _0)]
    EncoderUnavailable(String),
    /// Writing frames to or finalizing the encoder failed
    #[display("Video encoder I/O error: {}", _0)]
    EncoderIo(String),
    /// A scene image could not be decoded for compositing
    #[display("Failed to decode scene image: {}", _0)]
    ImageDecode(String),
    /// Export configuration is invalid
    #[display("Invalid export configuration: {}", _0)]
    InvalidConfig(String),
}

/// Video error with source location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{VideoError, VideoErrorKind};
///
/// let err = VideoError::new(VideoErrorKind::InvalidConfig("fps must be non-zero".into()));
/// assert!(format!("{}", err).contains("fps"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Video Error: {} at line {} in {}", kind, line, file)]
pub struct VideoError {
    /// The kind of error that occurred
    pub kind: VideoErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl VideoError {
    /// Create a new VideoError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: VideoErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

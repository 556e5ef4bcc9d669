//! Story generation error types.

/// Specific error conditions for story generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoryErrorKind {
    /// Theme is empty or whitespace-only
    #[display("Story theme cannot be empty")]
    EmptyTheme,
    /// Narrative backend returned a malformed or insufficient scene list
    #[display("Invalid story structure from backend: {}", _0)]
    InvalidStory(String),
    /// No image fragment in a scene's illustration response
    #[display("No image data returned for scene {}", scene)]
    ImageGeneration {
        /// Zero-based index of the scene that failed
        scene: usize,
    },
}

/// Story error with source location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::ImageGeneration { scene: 1 });
/// assert!(format!("{}", err).contains("scene 1"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The kind of error that occurred
    pub kind: StoryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

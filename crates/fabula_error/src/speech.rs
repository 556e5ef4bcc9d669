//! Speech synthesis error types.

/// Specific error conditions for narration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SpeechErrorKind {
    /// The synthesis engine reported a failure for an utterance
    #[display("Speech synthesis failed: {}", _0)]
    SynthesisFailed(String),
    /// The synthesis engine could not be started at all
    #[display("Speech engine unavailable: {}", _0)]
    EngineUnavailable(String),
}

/// Speech error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Speech Error: {} at line {} in {}", kind, line, file)]
pub struct SpeechError {
    /// The kind of error that occurred
    pub kind: SpeechErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SpeechError {
    /// Create a new SpeechError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SpeechErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

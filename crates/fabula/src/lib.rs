//! Fabula: an interactive storytelling client.
//!
//! Give it a theme and it generates a three-scene illustrated story via a
//! generative AI backend, narrates it aloud, and can export the result as
//! an MP4 slideshow.
//!
//! This facade crate re-exports the public surface of the workspace.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod settings;

pub use settings::{FabulaConfig, ModelsConfig, SpeechConfig, VideoConfig};

pub use fabula_core::{
    GenerateRequest, GenerateResponse, Input, MediaSource, Message, Modality, Output, Role,
    SCENE_COUNT, Scene, SceneImage, Story,
};
pub use fabula_error::{
    FabulaError, FabulaErrorKind, FabulaResult, GeminiError, GeminiErrorKind, MediaError,
    MediaErrorKind, SpeechError, SpeechErrorKind, StoryError, StoryErrorKind, VideoError,
    VideoErrorKind,
};
pub use fabula_interface::{ProgressObserver, SpeechOutcome, SpeechSynthesizer, StoryDriver};
pub use fabula_models::{DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GeminiClient};
pub use fabula_playback::{CommandSpeech, PlaybackController, PlaybackState, SilentSpeech};
pub use fabula_story::{GenerationSession, SessionState, StoryPipeline};
pub use fabula_video::{ExportConfig, SCENE_DURATION_SECS, VideoExporter};

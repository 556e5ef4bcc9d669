//! Per-generation session state and its side effects.

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{instrument, warn};

use fabula_core::Story;
use fabula_error::{FabulaError, FabulaErrorKind, FabulaResult};
use fabula_interface::{ProgressObserver, SpeechSynthesizer};

use crate::StoryPipeline;

/// Observable state of one generation session.
///
/// Invariants, upheld by [`GenerationSession`]:
/// - `story` and `error` are never both present;
/// - `current_scene` is a valid index into `story` whenever `story` is
///   present;
/// - starting a new generation resets `story`, `error` and
///   `current_scene` before any asynchronous work begins.
#[derive(Debug, Clone, Default, derive_getters::Getters)]
pub struct SessionState {
    /// The theme the user supplied for the current run
    prompt: String,
    /// The completed story, once a run succeeds
    story: Option<Story>,
    /// Progress label while a run is in flight
    loading_message: Option<String>,
    /// User-facing message of the last failed run
    error: Option<String>,
    /// Index of the scene currently shown
    current_scene: usize,
}

impl SessionState {
    /// True while a generation run is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading_message.is_some()
    }
}

/// Forwards pipeline progress to the caller while mirroring the label
/// into the session state.
struct StateObserver<'a> {
    state: &'a Mutex<SessionState>,
    inner: &'a dyn ProgressObserver,
}

impl ProgressObserver for StateObserver<'_> {
    fn progress(&self, message: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.loading_message = Some(message.to_string());
        }
        self.inner.progress(message);
    }
}

/// Drives generation runs and owns the session state machine.
///
/// The speech handle is injected so the session can uphold the one
/// cross-operation exclusion rule of the system: any in-flight narration
/// is cancelled before a new generation run starts.
pub struct GenerationSession {
    pipeline: StoryPipeline,
    speech: Arc<dyn SpeechSynthesizer>,
    state: Mutex<SessionState>,
}

impl GenerationSession {
    /// Create a session over a pipeline and a speech capability handle.
    pub fn new(pipeline: StoryPipeline, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            pipeline,
            speech,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Snapshot of the current session state.
    pub fn state(&self) -> SessionState {
        self.lock_state().clone()
    }

    /// Run one generation for `theme`, replacing whatever the session
    /// held before.
    ///
    /// Cancels any in-flight narration synchronously, resets the session
    /// state, runs the pipeline, then installs either the finished story
    /// or a user-facing error message. Partial results from a failed run
    /// are never retained.
    #[instrument(skip(self, progress), fields(theme = %theme))]
    pub async fn begin(
        &self,
        theme: &str,
        progress: &dyn ProgressObserver,
    ) -> FabulaResult<Story> {
        // Stale narration must not talk over the new run.
        self.speech.cancel_all();

        {
            let mut state = self.lock_state();
            state.prompt = theme.to_string();
            state.story = None;
            state.error = None;
            state.current_scene = 0;
            state.loading_message = Some("Crafting your narrative...".to_string());
        }

        let observer = StateObserver {
            state: &self.state,
            inner: progress,
        };
        let result = self.pipeline.generate(theme, &observer).await;

        let mut state = self.lock_state();
        state.loading_message = None;
        match result {
            Ok(story) => {
                state.story = Some(story.clone());
                Ok(story)
            }
            Err(err) => {
                warn!(error = %err, "Story generation failed");
                state.error = Some(user_message(&err));
                Err(err)
            }
        }
    }

    /// Clear a failed run, returning to the initial input state.
    pub fn reset(&self) {
        self.speech.cancel_all();
        let mut state = self.lock_state();
        state.story = None;
        state.error = None;
        state.loading_message = None;
        state.current_scene = 0;
    }

    /// Show the scene at `index`, clamped into the story's range.
    ///
    /// Ignored while no story is present.
    pub fn set_scene(&self, index: usize) {
        let mut state = self.lock_state();
        if let Some(story) = &state.story {
            state.current_scene = story.clamp_index(index);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        // A poisoned lock means a panicked holder; the state itself is
        // still coherent for this single-writer session.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Map a pipeline failure to the message shown to the user.
///
/// Structured generation errors surface their own message; anything
/// outside the generation taxonomy collapses to a generic message.
fn user_message(err: &FabulaError) -> String {
    match err.kind() {
        FabulaErrorKind::Story(e) => e.kind.to_string(),
        FabulaErrorKind::Gemini(e) => e.kind.to_string(),
        _ => "An unknown error occurred while generating the story.".to_string(),
    }
}

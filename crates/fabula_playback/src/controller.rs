//! The playback state machine.

use std::sync::{Arc, Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use fabula_core::Story;
use fabula_error::FabulaResult;
use fabula_interface::{SpeechOutcome, SpeechSynthesizer};

/// Playback states, scoped to one story.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Story present, narration not yet started
    Idle,
    /// Narration in flight; navigation disabled
    Playing,
    /// Narration finished, failed or was stopped; navigation enabled
    Stopped,
}

struct Shared {
    state: PlaybackState,
    current_scene: usize,
    has_played_once: bool,
    token: CancellationToken,
}

/// Drives sequential narration across one story's scenes.
///
/// A controller is scoped to a single [`Story`]; when a new story
/// replaces the old one, the old controller is dropped (cancelling any
/// narration still in flight) and a fresh one is built. Callers start the
/// first run themselves right after construction — presenting a story
/// auto-plays it.
///
/// The narration run is an explicit sequential loop with a single
/// cancellation token checked between utterances. At most one narration
/// stream is active system-wide: entering [`PlaybackState::Playing`]
/// always cancels the prior stream first.
pub struct PlaybackController {
    synth: Arc<dyn SpeechSynthesizer>,
    story: Story,
    shared: Mutex<Shared>,
}

impl PlaybackController {
    /// Create a controller for one story.
    pub fn new(synth: Arc<dyn SpeechSynthesizer>, story: Story) -> Self {
        Self {
            synth,
            story,
            shared: Mutex::new(Shared {
                state: PlaybackState::Idle,
                current_scene: 0,
                has_played_once: false,
                token: CancellationToken::new(),
            }),
        }
    }

    /// The story this controller narrates.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// Current playback state.
    pub fn state(&self) -> PlaybackState {
        self.lock().state
    }

    /// Index of the scene currently shown.
    pub fn current_scene(&self) -> usize {
        self.lock().current_scene
    }

    /// True once a narration run has completed all scenes.
    pub fn has_played_once(&self) -> bool {
        self.lock().has_played_once
    }

    /// Narrate the story from scene 0 (initial play or replay).
    ///
    /// Cancels any narration already in flight, resets the visible index,
    /// then speaks each scene in order. On each successful utterance the
    /// visible index is advanced to the scene just narrated; after the
    /// last scene the controller transitions to
    /// [`PlaybackState::Stopped`].
    ///
    /// # Errors
    ///
    /// A synthesis failure halts the sequence immediately and is returned
    /// after the controller transitions to Stopped. No scene after the
    /// failing one is spoken, the visible index is left untouched, and
    /// nothing is retried.
    pub async fn play(&self) -> FabulaResult<()> {
        let token = {
            let mut shared = self.lock();
            // supersede whatever run was active
            shared.token.cancel();
            let token = CancellationToken::new();
            shared.token = token.clone();
            shared.state = PlaybackState::Playing;
            shared.current_scene = 0;
            token
        };
        self.synth.cancel_all();

        for (index, scene) in self.story.scenes().iter().enumerate() {
            if token.is_cancelled() {
                // A newer run owns the state now; leave it alone.
                return Ok(());
            }
            debug!(scene = index, "Narrating scene");
            match self.synth.speak(scene.text()).await {
                Ok(SpeechOutcome::Completed) => {
                    let mut shared = self.lock();
                    if token.is_cancelled() {
                        return Ok(());
                    }
                    // keep display synchronized with the scene just heard
                    shared.current_scene = index;
                }
                Ok(SpeechOutcome::Cancelled) => {
                    let mut shared = self.lock();
                    if !token.is_cancelled() {
                        shared.state = PlaybackState::Stopped;
                    }
                    return Ok(());
                }
                Err(err) => {
                    warn!(scene = index, error = %err, "Narration failed, halting playback");
                    let mut shared = self.lock();
                    if !token.is_cancelled() {
                        shared.state = PlaybackState::Stopped;
                    }
                    return Err(err);
                }
            }
        }

        let mut shared = self.lock();
        if !token.is_cancelled() {
            shared.state = PlaybackState::Stopped;
            shared.has_played_once = true;
        }
        Ok(())
    }

    /// Stop narration, cancelling the in-flight utterance best-effort.
    pub fn stop(&self) {
        let mut shared = self.lock();
        shared.token.cancel();
        if shared.state == PlaybackState::Playing {
            shared.state = PlaybackState::Stopped;
        }
        drop(shared);
        self.synth.cancel_all();
    }

    /// Advance to the next scene, clamped to the last index.
    ///
    /// Ignored while narration is playing. Returns the visible index.
    pub fn next(&self) -> usize {
        let mut shared = self.lock();
        if shared.state != PlaybackState::Playing {
            shared.current_scene = self.story.clamp_index(shared.current_scene + 1);
        }
        shared.current_scene
    }

    /// Go back to the previous scene, clamped to index 0.
    ///
    /// Ignored while narration is playing. Returns the visible index.
    pub fn previous(&self) -> usize {
        let mut shared = self.lock();
        if shared.state != PlaybackState::Playing {
            shared.current_scene = shared.current_scene.saturating_sub(1);
        }
        shared.current_scene
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        // Teardown cancels narration unconditionally, whatever the state.
        self.lock().token.cancel();
        self.synth.cancel_all();
    }
}

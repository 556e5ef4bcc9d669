//! Trait definitions for generative backends and media capabilities.

use async_trait::async_trait;
use fabula_core::{GenerateRequest, GenerateResponse};
use fabula_error::FabulaResult;

/// Core trait that all generative backends must implement.
///
/// One call maps to one backend request; there is no retry or backoff at
/// this seam — callers see the first failure as-is.
#[async_trait]
pub trait StoryDriver: Send + Sync {
    /// Generate model output given a multimodal request.
    async fn generate(&self, req: &GenerateRequest) -> FabulaResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier used when the request names none.
    fn model_name(&self) -> &str;
}

/// How an utterance ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechOutcome {
    /// The utterance was spoken to completion.
    Completed,
    /// The utterance was cancelled before completing. A cancelled
    /// utterance's completion must not drive state updates.
    Cancelled,
}

/// An injected speech-engine capability handle.
///
/// At most one narration stream is active system-wide: implementations
/// must make [`cancel_all`](SpeechSynthesizer::cancel_all) interrupt any
/// utterance currently in flight, immediately and best-effort.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak one utterance, resolving when it finishes or is cancelled.
    ///
    /// # Errors
    ///
    /// Fails if the engine cannot be started or reports a synthesis
    /// failure. Cancellation is not an error; it resolves to
    /// [`SpeechOutcome::Cancelled`].
    async fn speak(&self, utterance: &str) -> FabulaResult<SpeechOutcome>;

    /// Cancel any queued or in-flight utterance. Immediate, best-effort,
    /// global.
    fn cancel_all(&self);
}

/// Receiver for human-readable pipeline progress labels.
pub trait ProgressObserver: Send + Sync {
    /// Called with a progress label before each pipeline stage.
    fn progress(&self, message: &str);
}

/// No-op observer for callers that do not render progress.
impl ProgressObserver for () {
    fn progress(&self, _message: &str) {}
}

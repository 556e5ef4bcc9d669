//! Speech engine implementations.

use std::process::Stdio;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use fabula_error::{FabulaResult, SpeechError, SpeechErrorKind};
use fabula_interface::{SpeechOutcome, SpeechSynthesizer};

/// Speech engine that shells out to a TTS command per utterance.
///
/// The utterance text is appended as the final argument, so any speaker
/// taking text on the command line works: `espeak-ng`, macOS `say`, a
/// `piper` wrapper script, and so on. `cancel_all` kills the active
/// child; a killed utterance resolves as cancelled, not failed.
///
/// # Examples
///
/// ```no_run
/// use fabula_playback::CommandSpeech;
///
/// let speech = CommandSpeech::new("espeak-ng").with_args(["-s", "150"]);
/// ```
pub struct CommandSpeech {
    program: String,
    args: Vec<String>,
    active: Mutex<Option<CancellationToken>>,
}

impl CommandSpeech {
    /// Create an engine around a speaker program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            active: Mutex::new(None),
        }
    }

    /// Add fixed arguments placed before the utterance text.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSpeech {
    #[instrument(skip(self, utterance), fields(program = %self.program, chars = utterance.len()))]
    async fn speak(&self, utterance: &str) -> FabulaResult<SpeechOutcome> {
        let token = CancellationToken::new();
        *self.active.lock().unwrap() = Some(token.clone());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(utterance)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                SpeechError::new(SpeechErrorKind::EngineUnavailable(format!(
                    "{}: {e}",
                    self.program
                )))
            })?;

        let waited = tokio::select! {
            status = child.wait() => Some(status),
            _ = token.cancelled() => None,
        };

        match waited {
            Some(Ok(status)) if status.success() => {
                debug!("Utterance completed");
                Ok(SpeechOutcome::Completed)
            }
            Some(Ok(status)) => Err(SpeechError::new(SpeechErrorKind::SynthesisFailed(
                format!("{} exited with {status}", self.program),
            ))
            .into()),
            Some(Err(e)) => Err(SpeechError::new(SpeechErrorKind::SynthesisFailed(
                e.to_string(),
            ))
            .into()),
            None => {
                // best-effort, immediate: kill and reap without reporting
                let _ = child.start_kill();
                let _ = child.wait().await;
                debug!("Utterance cancelled");
                Ok(SpeechOutcome::Cancelled)
            }
        }
    }

    fn cancel_all(&self) {
        if let Some(token) = self.active.lock().unwrap().take() {
            token.cancel();
        }
    }
}

/// No-op engine for headless runs: every utterance completes immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeech;

#[async_trait]
impl SpeechSynthesizer for SilentSpeech {
    async fn speak(&self, _utterance: &str) -> FabulaResult<SpeechOutcome> {
        Ok(SpeechOutcome::Completed)
    }

    fn cancel_all(&self) {}
}

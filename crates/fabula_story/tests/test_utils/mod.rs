//! Test utilities: scripted backend driver and speech engine fakes.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use fabula_core::{GenerateRequest, GenerateResponse, Output};
use fabula_error::{FabulaResult, GeminiError, GeminiErrorKind, SpeechError, SpeechErrorKind};
use fabula_interface::{ProgressObserver, SpeechOutcome, SpeechSynthesizer, StoryDriver};

/// One scripted backend reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Respond with a single text output
    Text(String),
    /// Respond with a single image output
    Image {
        mime: &'static str,
        data: Vec<u8>,
    },
    /// Respond with arbitrary outputs
    Outputs(Vec<Output>),
    /// Fail with a backend error
    Error(GeminiErrorKind),
}

/// Backend driver that replays a scripted reply sequence and records
/// every request it receives.
pub struct MockDriver {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockDriver {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of generate() calls seen so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Snapshot of all recorded requests, in call order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoryDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> FabulaResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());

        let reply = self.replies.lock().unwrap().pop_front().ok_or_else(|| {
            GeminiError::new(GeminiErrorKind::ApiRequest(
                "mock reply sequence exhausted".to_string(),
            ))
        })?;

        match reply {
            MockReply::Text(text) => Ok(GenerateResponse {
                outputs: vec![Output::Text(text)],
            }),
            MockReply::Image { mime, data } => Ok(GenerateResponse {
                outputs: vec![Output::Image {
                    mime: Some(mime.to_string()),
                    data,
                }],
            }),
            MockReply::Outputs(outputs) => Ok(GenerateResponse { outputs }),
            MockReply::Error(kind) => Err(GeminiError::new(kind).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// A scene payload the narrative stage will accept, with `count` entries.
pub fn scenes_json(count: usize) -> String {
    let scenes: Vec<serde_json::Value> = (0..count)
        .map(|i| serde_json::json!({ "sentence": format!("Scene {i} unfolds.") }))
        .collect();
    serde_json::json!({ "scenes": scenes }).to_string()
}

/// How the fake speech engine handles one utterance.
#[derive(Debug, Clone)]
pub enum FakeUtterance {
    Complete,
    Cancelled,
    Fail(&'static str),
}

/// Speech engine fake: records utterances and cancellations, optionally
/// replaying a script of outcomes (default: everything completes).
#[derive(Default)]
pub struct FakeSpeech {
    spoken: Mutex<Vec<String>>,
    cancels: Mutex<usize>,
    script: Mutex<VecDeque<FakeUtterance>>,
}

impl FakeSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: Vec<FakeUtterance>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        }
    }

    /// Utterances spoken to completion or failure, in order.
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }

    /// Number of cancel_all() calls seen.
    pub fn cancel_count(&self) -> usize {
        *self.cancels.lock().unwrap()
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSpeech {
    async fn speak(&self, utterance: &str) -> FabulaResult<SpeechOutcome> {
        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(FakeUtterance::Complete);
        match reply {
            FakeUtterance::Complete => {
                self.spoken.lock().unwrap().push(utterance.to_string());
                Ok(SpeechOutcome::Completed)
            }
            FakeUtterance::Cancelled => Ok(SpeechOutcome::Cancelled),
            FakeUtterance::Fail(message) => {
                self.spoken.lock().unwrap().push(utterance.to_string());
                Err(SpeechError::new(SpeechErrorKind::SynthesisFailed(message.to_string())).into())
            }
        }
    }

    fn cancel_all(&self) {
        *self.cancels.lock().unwrap() += 1;
    }
}

/// Progress observer that records every label.
#[derive(Default)]
pub struct RecordingProgress {
    messages: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ProgressObserver for RecordingProgress {
    fn progress(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

//! Test utilities: a scripted speech engine and story fixtures.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use fabula_core::{Scene, SceneImage, Story};
use fabula_error::{FabulaResult, SpeechError, SpeechErrorKind};
use fabula_interface::{SpeechOutcome, SpeechSynthesizer};

/// How the fake engine handles one utterance.
#[derive(Debug, Clone)]
pub enum FakeUtterance {
    Complete,
    CompleteAfter(Duration),
    Cancelled,
    Fail(&'static str),
}

/// Speech engine fake: records utterances and cancellations and replays
/// a script of outcomes (default: everything completes immediately).
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

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }

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
            FakeUtterance::CompleteAfter(delay) => {
                tokio::time::sleep(delay).await;
                self.spoken.lock().unwrap().push(utterance.to_string());
                Ok(SpeechOutcome::Completed)
            }
            FakeUtterance::Cancelled => Ok(SpeechOutcome::Cancelled),
            FakeUtterance::Fail(message) => {
                self.spoken.lock().unwrap().push(utterance.to_string());
                Err(
                    SpeechError::new(SpeechErrorKind::SynthesisFailed(message.to_string()))
                        .into(),
                )
            }
        }
    }

    fn cancel_all(&self) {
        *self.cancels.lock().unwrap() += 1;
    }
}

/// A three-scene story with predictable sentences.
pub fn sample_story() -> Story {
    let scenes = (0..3)
        .map(|i| {
            Scene::new(
                format!("Sentence {i}."),
                SceneImage::new("image/png", vec![i as u8]),
            )
        })
        .collect();
    Story::new(scenes).unwrap()
}

//! Narration playback for Fabula stories.
//!
//! [`PlaybackController`] drives sequential text-to-speech narration over
//! one story, keeping the visible scene index synchronized with the scene
//! being narrated. Speech engines live behind the
//! [`SpeechSynthesizer`](fabula_interface::SpeechSynthesizer) trait; this
//! crate ships a subprocess-backed engine and a silent one.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod controller;
mod synth;

pub use controller::{PlaybackController, PlaybackState};
pub use synth::{CommandSpeech, SilentSpeech};

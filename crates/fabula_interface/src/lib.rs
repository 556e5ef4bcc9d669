//! Boundary traits for Fabula backends and media capabilities.
//!
//! Every external collaborator of the pipeline — the generative backend,
//! the speech engine, the progress sink — is reached through a trait
//! defined here, so orchestration code can be exercised against fakes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ProgressObserver, SpeechOutcome, SpeechSynthesizer, StoryDriver};

//! Story generation pipeline and session state for Fabula.
//!
//! This crate sequences the narrative generator and the illustration
//! generator into complete three-scene stories, and owns the
//! per-generation session state machine (loading, error, scene index).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod illustration;
mod narrative;
mod pipeline;
mod session;

pub use illustration::generate_scene_image;
pub use narrative::generate_scene_sentences;
pub use pipeline::StoryPipeline;
pub use session::{GenerationSession, SessionState};

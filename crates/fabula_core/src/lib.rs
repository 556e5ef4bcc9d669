//! Core data types for the Fabula storytelling library.
//!
//! This crate provides the foundation data types shared across the Fabula
//! workspace: the story model (scenes, images) and the generation request
//! model spoken to generative backends.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod image;
mod input;
mod media;
mod message;
mod output;
mod request;
mod role;
mod scene;

pub use image::SceneImage;
pub use input::Input;
pub use media::MediaSource;
pub use message::{Message, MessageBuilder};
pub use output::Output;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, Modality};
pub use role::Role;
pub use scene::{SCENE_COUNT, Scene, Story};

//! Scene compositing and MP4 export for Fabula stories.
//!
//! Each scene's illustration is letterboxed onto a fixed canvas with a
//! semi-opaque caption band, held for a fixed five-second duration, and
//! streamed as raw RGBA frames into a piped system `ffmpeg` process that
//! burns in the wrapped caption text and encodes the result.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod compose;
mod encode;
mod export;
mod frame;

pub use compose::{FitRect, compose_scene_frame, fit_rect, wrap_caption};
pub use encode::{
    EncodeConfig, FfmpegEncoder, SceneCaption, default_mp4_config, is_ffmpeg_on_path,
};
pub use export::{ExportConfig, SCENE_DURATION_SECS, VideoExporter, total_frames};
pub use frame::FrameRgba;

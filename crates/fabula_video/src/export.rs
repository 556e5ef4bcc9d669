//! The export driver: one story in, one MP4 out.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, instrument};

use fabula_core::Story;
use fabula_error::{VideoError, VideoErrorKind};

use crate::compose::{compose_scene_frame, wrap_caption};
use crate::encode::{FfmpegEncoder, SceneCaption, default_mp4_config};

/// Wall-clock duration of each scene on the output stream.
pub const SCENE_DURATION_SECS: u64 = 5;

/// Caption band color: semi-opaque black.
const BAND_RGBA: [u8; 4] = [0, 0, 0, 153];

/// Horizontal text margin inside the canvas.
const MARGIN_PX: u32 = 24;

/// Vertical padding above and below the caption text block.
const PADDING_PX: u32 = 18;

/// Extra spacing between wrapped caption lines.
const LINE_SPACING_PX: u32 = 8;

/// Number of frames an export of `scene_count` scenes produces.
pub fn total_frames(scene_count: usize, fps: u32) -> u64 {
    scene_count as u64 * SCENE_DURATION_SECS * u64::from(fps)
}

/// Export configuration.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Output frame rate
    pub fps: u32,
    /// Caption font size in pixels
    pub font_size: u32,
    /// Directory for caption scratch files
    pub work_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 30,
            font_size: 28,
            work_dir: std::env::temp_dir().join("fabula-export"),
        }
    }
}

struct CaptionLayout {
    lines: Vec<String>,
    band_height: u32,
    text_y: u32,
}

fn layout_caption(text: &str, config: &ExportConfig) -> CaptionLayout {
    // column estimate from an average glyph advance of ~0.55em
    let approx_char_px = ((config.font_size * 11) / 20).max(1);
    let usable = config.width.saturating_sub(MARGIN_PX * 2);
    let columns = ((usable / approx_char_px) as usize).max(8);

    let lines = wrap_caption(text, columns);
    let line_count = lines.len() as u32;
    let band_height = line_count * config.font_size
        + line_count.saturating_sub(1) * LINE_SPACING_PX
        + 2 * PADDING_PX;
    let text_y = config.height.saturating_sub(band_height) + PADDING_PX;

    CaptionLayout {
        lines,
        band_height,
        text_y,
    }
}

/// Composites a story into a fixed-duration MP4.
///
/// Each scene's image is letterboxed onto the canvas with its caption
/// band and held for [`SCENE_DURATION_SECS`]; the total duration is
/// always `scene count x 5 s`. One export at a time: re-entry while an
/// export is running is rejected, and a failed export removes its
/// partially written file.
pub struct VideoExporter {
    config: ExportConfig,
    in_progress: AtomicBool,
}

impl VideoExporter {
    /// Create an exporter with the given configuration.
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            in_progress: AtomicBool::new(false),
        }
    }

    /// Export `story` to `out_path`.
    ///
    /// This is a blocking operation (compositing plus a piped encoder);
    /// async callers should wrap it in a blocking task.
    ///
    /// # Errors
    ///
    /// Any failure (decode, spawn, encoder I/O, re-entry) aborts the
    /// export; a partial output file is removed.
    #[instrument(skip(self, story), fields(scenes = story.len(), out = %out_path.display()))]
    pub fn export(&self, story: &Story, out_path: &Path) -> Result<(), VideoError> {
        if self.in_progress.swap(true, Ordering::SeqCst) {
            return Err(VideoError::new(VideoErrorKind::InvalidConfig(
                "an export is already in progress".to_string(),
            )));
        }

        let result = self.export_inner(story, out_path);
        self.in_progress.store(false, Ordering::SeqCst);

        if result.is_err() {
            let _ = std::fs::remove_file(out_path);
        }
        result
    }

    fn export_inner(&self, story: &Story, out_path: &Path) -> Result<(), VideoError> {
        std::fs::create_dir_all(&self.config.work_dir).map_err(|e| {
            VideoError::new(VideoErrorKind::EncoderIo(format!(
                "failed to create work directory '{}': {e}",
                self.config.work_dir.display()
            )))
        })?;

        let mut captions = Vec::with_capacity(story.len());
        let mut frames = Vec::with_capacity(story.len());

        for (index, scene) in story.scenes().iter().enumerate() {
            let layout = layout_caption(scene.text(), &self.config);

            let text_file = self.config.work_dir.join(format!("caption_{index}.txt"));
            std::fs::write(&text_file, layout.lines.join("\n")).map_err(|e| {
                VideoError::new(VideoErrorKind::EncoderIo(format!(
                    "failed to write caption file '{}': {e}",
                    text_file.display()
                )))
            })?;

            captions.push(SceneCaption {
                text_file,
                start_s: (index as u64 * SCENE_DURATION_SECS) as f64,
                end_s: ((index as u64 + 1) * SCENE_DURATION_SECS) as f64,
                y: layout.text_y,
                font_size: self.config.font_size,
            });

            frames.push(compose_scene_frame(
                scene.image().data(),
                self.config.width,
                self.config.height,
                layout.band_height,
                BAND_RGBA,
            )?);
        }

        let cfg = default_mp4_config(
            out_path,
            self.config.width,
            self.config.height,
            self.config.fps,
        );
        let mut encoder = FfmpegEncoder::new(cfg, &captions)?;

        let frames_per_scene = SCENE_DURATION_SECS * u64::from(self.config.fps);
        for frame in &frames {
            for _ in 0..frames_per_scene {
                encoder.encode_frame(frame)?;
            }
        }
        encoder.finish()?;

        info!(
            frames = total_frames(story.len(), self.config.fps),
            "Video export complete"
        );
        Ok(())
    }
}

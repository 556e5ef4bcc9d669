//! Piped ffmpeg MP4 encoding with burned-in captions.

use std::{
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use fabula_error::{VideoError, VideoErrorKind};

use crate::frame::FrameRgba;

/// Encoder configuration.
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    /// Output width in pixels (must be even)
    pub width: u32,
    /// Output height in pixels (must be even)
    pub height: u32,
    /// Frames per second
    pub fps: u32,
    /// Output file path
    pub out_path: PathBuf,
    /// Overwrite an existing output file
    pub overwrite: bool,
}

impl EncodeConfig {
    /// Validate dimension and rate constraints.
    ///
    /// # Errors
    ///
    /// Width, height and fps must be non-zero, and dimensions must be
    /// even (the encoder targets yuv420p output for compatibility).
    pub fn validate(&self) -> Result<(), VideoError> {
        if self.width == 0 || self.height == 0 {
            return Err(VideoError::new(VideoErrorKind::InvalidConfig(
                "encode width/height must be non-zero".to_string(),
            )));
        }
        if self.fps == 0 {
            return Err(VideoError::new(VideoErrorKind::InvalidConfig(
                "encode fps must be non-zero".to_string(),
            )));
        }
        if self.width % 2 != 0 || self.height % 2 != 0 {
            return Err(VideoError::new(VideoErrorKind::InvalidConfig(
                "encode width/height must be even (required for yuv420p mp4 output)".to_string(),
            )));
        }
        Ok(())
    }
}

/// Default MP4 encoder configuration.
pub fn default_mp4_config(
    out_path: impl Into<PathBuf>,
    width: u32,
    height: u32,
    fps: u32,
) -> EncodeConfig {
    EncodeConfig {
        width,
        height,
        fps,
        out_path: out_path.into(),
        overwrite: true,
    }
}

/// True if a runnable `ffmpeg` binary is on PATH.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn ensure_parent_dir(path: &Path) -> Result<(), VideoError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            VideoError::new(VideoErrorKind::EncoderIo(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            )))
        })?;
    }
    Ok(())
}

/// One scene's caption burn-in: a text file rendered centered inside the
/// caption band during the scene's time window.
#[derive(Clone, Debug)]
pub struct SceneCaption {
    /// File holding the wrapped caption lines
    pub text_file: PathBuf,
    /// Window start on the output timeline, seconds
    pub start_s: f64,
    /// Window end on the output timeline, seconds
    pub end_s: f64,
    /// Top of the text block in pixels
    pub y: u32,
    /// Font size in pixels
    pub font_size: u32,
}

/// Build the drawtext filter chain for a set of scene captions.
pub(crate) fn caption_filter(captions: &[SceneCaption]) -> String {
    captions
        .iter()
        .map(|caption| {
            format!(
                "drawtext=textfile='{}':font='Sans':fontsize={}:fontcolor=white:\
                 x=(w-text_w)/2:y={}:line_spacing=8:enable='between(t,{},{})'",
                caption.text_file.display(),
                caption.font_size,
                caption.y,
                caption.start_s,
                caption.end_s
            )
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Streams raw RGBA frames into a system `ffmpeg` process producing an
/// H.264 MP4.
///
/// The system binary is used rather than native FFmpeg linkage to avoid
/// dev header/lib requirements.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    child: Child,
    stdin: Option<ChildStdin>,
}

impl FfmpegEncoder {
    /// Spawn the encoder process.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration, a pre-existing output file when
    /// overwrite is off, or a missing/unspawnable ffmpeg binary.
    pub fn new(cfg: EncodeConfig, captions: &[SceneCaption]) -> Result<Self, VideoError> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(VideoError::new(VideoErrorKind::InvalidConfig(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            ))));
        }

        if !is_ffmpeg_on_path() {
            return Err(VideoError::new(VideoErrorKind::EncoderUnavailable(
                "ffmpeg is required for MP4 encoding, but was not found on PATH".to_string(),
            )));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        cmd.arg(if cfg.overwrite { "-y" } else { "-n" });

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
        ]);

        if !captions.is_empty() {
            cmd.args(["-vf", &caption_filter(captions)]);
        }

        cmd.args([
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            VideoError::new(VideoErrorKind::EncoderUnavailable(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            )))
        })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            VideoError::new(VideoErrorKind::EncoderIo(
                "failed to open ffmpeg stdin".to_string(),
            ))
        })?;

        Ok(Self {
            cfg,
            child,
            stdin: Some(stdin),
        })
    }

    /// Write one frame to the stream.
    ///
    /// # Errors
    ///
    /// The frame must match the configured dimensions exactly.
    pub fn encode_frame(&mut self, frame: &FrameRgba) -> Result<(), VideoError> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(VideoError::new(VideoErrorKind::InvalidConfig(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            ))));
        }
        let expected = (self.cfg.width as usize) * (self.cfg.height as usize) * 4;
        if frame.data.len() != expected {
            return Err(VideoError::new(VideoErrorKind::InvalidConfig(
                "frame.data size mismatch with width*height*4".to_string(),
            )));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(VideoError::new(VideoErrorKind::EncoderIo(
                "ffmpeg encoder is already finalized".to_string(),
            )));
        };

        use std::io::Write as _;
        stdin.write_all(&frame.data).map_err(|e| {
            VideoError::new(VideoErrorKind::EncoderIo(format!(
                "failed to write frame to ffmpeg stdin: {e}"
            )))
        })
    }

    /// Close the stream and wait for ffmpeg to finish.
    pub fn finish(mut self) -> Result<(), VideoError> {
        drop(self.stdin.take());

        let output = self.child.wait_with_output().map_err(|e| {
            VideoError::new(VideoErrorKind::EncoderIo(format!(
                "failed to wait for ffmpeg to finish: {e}"
            )))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VideoError::new(VideoErrorKind::EncoderIo(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            ))));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validation_catches_bad_values() {
        assert!(default_mp4_config("out.mp4", 0, 10, 30).validate().is_err());
        assert!(default_mp4_config("out.mp4", 11, 10, 30).validate().is_err());
        assert!(default_mp4_config("out.mp4", 10, 10, 0).validate().is_err());
        assert!(default_mp4_config("out.mp4", 1280, 720, 30).validate().is_ok());
    }

    #[test]
    fn caption_filter_windows_each_scene() {
        let captions = vec![
            SceneCaption {
                text_file: PathBuf::from("/tmp/cap_0.txt"),
                start_s: 0.0,
                end_s: 5.0,
                y: 600,
                font_size: 28,
            },
            SceneCaption {
                text_file: PathBuf::from("/tmp/cap_1.txt"),
                start_s: 5.0,
                end_s: 10.0,
                y: 620,
                font_size: 28,
            },
        ];
        let filter = caption_filter(&captions);

        assert!(filter.contains("textfile='/tmp/cap_0.txt'"));
        assert!(filter.contains("between(t,0,5)"));
        assert!(filter.contains("between(t,5,10)"));
        assert!(filter.contains("x=(w-text_w)/2"));
        assert_eq!(filter.matches("drawtext=").count(), 2);
    }
}

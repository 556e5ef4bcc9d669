//! The `export` command and the shared export helper.

use std::path::Path;

use anyhow::Context;

use fabula::{ExportConfig, FabulaConfig, Story, VideoExporter};

/// Export a story to an MP4 using the configured canvas parameters.
///
/// Compositing and encoding are blocking, so the work runs on a blocking
/// task.
pub async fn export_story(
    config: &FabulaConfig,
    story: &Story,
    out: &Path,
) -> anyhow::Result<()> {
    let export_config = ExportConfig {
        width: config.video.width,
        height: config.video.height,
        fps: config.video.fps,
        font_size: config.video.font_size,
        ..Default::default()
    };
    let exporter = VideoExporter::new(export_config);

    println!("Exporting video to {} ...", out.display());
    let story = story.clone();
    let out_path = out.to_path_buf();
    tokio::task::spawn_blocking(move || exporter.export(&story, &out_path))
        .await
        .context("export task failed")??;
    println!("Video saved.");
    Ok(())
}

/// Handle `fabula export`: load a saved story JSON and export it.
pub async fn run_export(story_path: &Path, out: &Path) -> anyhow::Result<()> {
    let config = FabulaConfig::load()?;

    let json = std::fs::read_to_string(story_path)
        .with_context(|| format!("failed to read story file '{}'", story_path.display()))?;
    let story: Story = serde_json::from_str(&json)
        .with_context(|| format!("'{}' is not a valid story file", story_path.display()))?;

    export_story(&config, &story, out).await
}

//! The `tell` command: generate, narrate, navigate, export.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::AsyncBufReadExt;
use tracing::warn;

use fabula::{
    CommandSpeech, FabulaConfig, GeminiClient, GenerationSession, PlaybackController,
    ProgressObserver, SilentSpeech, SpeechSynthesizer, Story, StoryPipeline,
};

use super::export::export_story;

/// Options for one `tell` run.
#[derive(Debug)]
pub struct TellOptions {
    /// The story theme
    pub theme: String,
    /// Export the story as an MP4 at this path after narration
    pub export: Option<PathBuf>,
    /// Narrate with the silent engine
    pub quiet: bool,
    /// Directory for generated scene images
    pub work_dir: PathBuf,
    /// Save the story as JSON at this path
    pub save_json: Option<PathBuf>,
    /// Skip the interactive navigation loop
    pub no_interact: bool,
}

/// Prints pipeline progress labels as they arrive.
struct ConsoleProgress;

impl ProgressObserver for ConsoleProgress {
    fn progress(&self, message: &str) {
        println!("{message}");
    }
}

/// Handle `fabula tell`.
pub async fn run_tell(options: TellOptions) -> anyhow::Result<()> {
    let config = FabulaConfig::load()?;

    let driver = Arc::new(GeminiClient::with_model(config.models.text.as_str())?);
    let speech: Arc<dyn SpeechSynthesizer> = if options.quiet {
        Arc::new(SilentSpeech)
    } else {
        Arc::new(
            CommandSpeech::new(config.speech.program.clone())
                .with_args(config.speech.args.clone()),
        )
    };

    let pipeline = StoryPipeline::new(driver).with_image_model(config.models.image.clone());
    let session = GenerationSession::new(pipeline, speech.clone());

    let story = match session.begin(&options.theme, &ConsoleProgress).await {
        Ok(story) => story,
        Err(_) => {
            let state = session.state();
            let message = state
                .error()
                .clone()
                .unwrap_or_else(|| "An unknown error occurred while generating the story.".into());
            eprintln!("Story generation failed: {message}");
            eprintln!("Run the command again to retry.");
            anyhow::bail!("story generation failed");
        }
    };

    let image_paths = save_scene_images(&story, &options.work_dir)?;
    if let Some(path) = &options.save_json {
        std::fs::write(path, serde_json::to_string_pretty(&story)?)
            .with_context(|| format!("failed to write story JSON to '{}'", path.display()))?;
        println!("Story JSON saved to {}", path.display());
    }

    let controller = Arc::new(PlaybackController::new(speech.clone(), story.clone()));

    // Presenting a fresh story auto-plays its narration.
    narrate(&controller, &story, &image_paths).await;

    if let Some(path) = &options.export {
        export_story(&config, &story, path).await?;
    }

    if !options.no_interact {
        interact(&config, &controller, &story, &image_paths).await?;
    }

    Ok(())
}

fn scene_extension(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    }
}

fn save_scene_images(story: &Story, work_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(work_dir)
        .with_context(|| format!("failed to create work directory '{}'", work_dir.display()))?;

    story
        .scenes()
        .iter()
        .enumerate()
        .map(|(index, scene)| {
            let path = work_dir.join(format!(
                "scene_{index}.{}",
                scene_extension(scene.image().mime())
            ));
            std::fs::write(&path, scene.image().data())
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            Ok(path)
        })
        .collect()
}

fn print_scene(story: &Story, image_paths: &[PathBuf], index: usize) {
    if let Some(scene) = story.get(index) {
        println!();
        println!("-- Scene {}/{} --", index + 1, story.len());
        println!("{}", scene.text());
        if let Some(path) = image_paths.get(index) {
            println!("   illustration: {}", path.display());
        }
    }
}

/// Run one narration pass, mirroring the controller's visible scene index
/// to the terminal as it advances.
async fn narrate(controller: &Arc<PlaybackController>, story: &Story, image_paths: &[PathBuf]) {
    let runner = controller.clone();
    let handle = tokio::spawn(async move { runner.play().await });

    print_scene(story, image_paths, 0);
    let mut shown = 0usize;
    while !handle.is_finished() {
        tokio::time::sleep(Duration::from_millis(150)).await;
        let current = controller.current_scene();
        if current != shown {
            shown = current;
            print_scene(story, image_paths, current);
        }
    }

    match handle.await {
        Ok(Ok(())) => {}
        // narration errors stop playback but leave the story visible
        Ok(Err(err)) => warn!(error = %err, "Narration stopped early"),
        Err(err) => warn!(error = %err, "Narration task failed"),
    }

    let current = controller.current_scene();
    if current != shown {
        print_scene(story, image_paths, current);
    }
}

/// Line-based navigation loop, active once narration has stopped.
async fn interact(
    config: &FabulaConfig,
    controller: &Arc<PlaybackController>,
    story: &Story,
    image_paths: &[PathBuf],
) -> anyhow::Result<()> {
    println!();
    println!("Commands: n (next), p (previous), r (replay), e [path] (export mp4), q (quit)");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "" => {}
            "q" => break,
            "n" => {
                let index = controller.next();
                print_scene(story, image_paths, index);
            }
            "p" => {
                let index = controller.previous();
                print_scene(story, image_paths, index);
            }
            "r" => {
                if controller.has_played_once() {
                    narrate(controller, story, image_paths).await;
                } else {
                    println!("Nothing to replay yet.");
                }
            }
            other => {
                let mut parts = other.split_whitespace();
                if parts.next() == Some("e") {
                    let out = Path::new(parts.next().unwrap_or("story.mp4"));
                    // export failures leave the viewer state unchanged
                    if let Err(err) = export_story(config, story, out).await {
                        eprintln!("Video export failed: {err}");
                    }
                } else {
                    println!("Unknown command: {other}");
                }
            }
        }
    }

    Ok(())
}

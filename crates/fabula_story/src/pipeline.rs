//! The story pipeline: narrative first, then illustrations in order.

use std::sync::Arc;
use tracing::{info, instrument};

use fabula_core::{SCENE_COUNT, Scene, Story};
use fabula_error::FabulaResult;
use fabula_interface::{ProgressObserver, StoryDriver};

use crate::{generate_scene_image, generate_scene_sentences};

/// Sequences narrative and illustration generation into a complete
/// [`Story`].
///
/// The pipeline runs a single attempt end to end: any failure at any
/// stage aborts the run, all partial results are dropped, and the first
/// error is returned unchanged. On success the finished story is returned
/// atomically; callers never observe fewer than three fully formed
/// scenes.
pub struct StoryPipeline {
    driver: Arc<dyn StoryDriver>,
    text_model: Option<String>,
    image_model: Option<String>,
}

impl StoryPipeline {
    /// Create a pipeline over a backend driver, using the driver's
    /// default model for both stages.
    pub fn new(driver: Arc<dyn StoryDriver>) -> Self {
        Self {
            driver,
            text_model: None,
            image_model: None,
        }
    }

    /// Override the model used for narrative generation.
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = Some(model.into());
        self
    }

    /// Override the model used for illustration generation.
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = Some(model.into());
        self
    }

    /// Run one full generation: theme in, three-scene story out.
    ///
    /// Progress labels are emitted through `progress` before each stage
    /// so a caller can render live status. Illustrations are generated
    /// strictly sequentially because each is conditioned on its
    /// predecessor.
    #[instrument(skip(self, progress), fields(theme = %theme))]
    pub async fn generate(
        &self,
        theme: &str,
        progress: &dyn ProgressObserver,
    ) -> FabulaResult<Story> {
        progress.progress("Crafting your narrative...");
        let sentences =
            generate_scene_sentences(self.driver.as_ref(), theme, self.text_model.as_deref())
                .await?;

        let mut scenes: Vec<Scene> = Vec::with_capacity(SCENE_COUNT);
        for (index, sentence) in sentences.into_iter().enumerate() {
            progress.progress(&format!(
                "Illustrating scene {}/{}...",
                index + 1,
                SCENE_COUNT
            ));
            let reference = scenes.last().map(Scene::image);
            let image = generate_scene_image(
                self.driver.as_ref(),
                index,
                &sentence,
                reference,
                self.image_model.as_deref(),
            )
            .await?;
            scenes.push(Scene::new(sentence, image));
        }

        info!(scenes = scenes.len(), "Story generation complete");
        Ok(Story::new(scenes)?)
    }
}

//! Illustration generation with image-to-image continuity.

use tracing::{debug, instrument};

use fabula_core::{
    GenerateRequest, Input, MediaSource, Message, Modality, Role, SceneImage,
};
use fabula_error::{FabulaResult, StoryError, StoryErrorKind};
use fabula_interface::StoryDriver;

fn opening_prompt(sentence: &str) -> String {
    format!(
        "A vibrant, colorful storybook illustration of the following scene: {sentence}"
    )
}

fn continuation_prompt(sentence: &str) -> String {
    format!(
        "Using the provided image as a reference, keep the same characters and art style \
         and illustrate the next moment of the story, showing clear visual progression. \
         New action to depict: {sentence}"
    )
}

/// Generate the illustration for one scene.
///
/// Scene 0 is prompted from its sentence alone. Every later scene is
/// conditioned on the previous scene's image: the reference image bytes
/// are supplied as binary input ahead of the continuation instruction, so
/// characters and style carry across scenes. Callers must therefore
/// invoke this sequentially, in index order.
///
/// # Errors
///
/// [`StoryErrorKind::ImageGeneration`] naming the scene index when no
/// response fragment carries embedded image data.
#[instrument(skip(driver, sentence, reference), fields(scene = index, conditioned = reference.is_some()))]
pub async fn generate_scene_image(
    driver: &dyn StoryDriver,
    index: usize,
    sentence: &str,
    reference: Option<&SceneImage>,
    model: Option<&str>,
) -> FabulaResult<SceneImage> {
    let content = match reference {
        Some(reference) => vec![
            Input::Image {
                mime: Some(reference.mime().to_string()),
                source: MediaSource::Binary(reference.data().to_vec()),
            },
            Input::Text(continuation_prompt(sentence)),
        ],
        None => vec![Input::Text(opening_prompt(sentence))],
    };

    let request = GenerateRequest {
        messages: vec![Message {
            role: Role::User,
            content,
        }],
        model: model.map(str::to_string),
        response_modalities: Some(vec![Modality::Image, Modality::Text]),
        ..Default::default()
    };

    let response = driver.generate(&request).await?;

    // The first fragment with embedded image data wins; text fragments in
    // the same response are commentary and ignored.
    let (mime, data) = response
        .first_image()
        .ok_or_else(|| StoryError::new(StoryErrorKind::ImageGeneration { scene: index }))?;

    debug!(bytes = data.len(), "Received scene illustration");

    Ok(SceneImage::new(
        mime.unwrap_or("image/png").to_string(),
        data.to_vec(),
    ))
}

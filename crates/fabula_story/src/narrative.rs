//! Narrative generation: a theme becomes exactly three scene sentences.

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use fabula_core::{GenerateRequest, Message, SCENE_COUNT};
use fabula_error::{FabulaResult, StoryError, StoryErrorKind};
use fabula_interface::StoryDriver;

/// JSON payload shape the backend is constrained to.
#[derive(Debug, Deserialize)]
struct ScenesPayload {
    scenes: Vec<SceneEntry>,
}

#[derive(Debug, Deserialize)]
struct SceneEntry {
    sentence: String,
}

/// Schema sent alongside the narrative request: an object with a `scenes`
/// array whose elements each carry one required string `sentence`.
fn scenes_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "scenes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "sentence": { "type": "string" }
                    },
                    "required": ["sentence"]
                }
            }
        },
        "required": ["scenes"]
    })
}

fn narrative_instruction(theme: &str) -> String {
    format!(
        "Write a short story about \"{theme}\" told in exactly {SCENE_COUNT} scenes. \
         Describe each scene in a single sentence."
    )
}

/// Request exactly [`SCENE_COUNT`] scene sentences for a theme.
///
/// The backend is asked for exactly three scenes, but its answer is
/// handled permissively: extra scenes are silently dropped and only the
/// first three are kept. Sentence structure is not validated.
///
/// # Errors
///
/// - [`StoryErrorKind::EmptyTheme`] for a blank theme, before any
///   backend call.
/// - [`StoryErrorKind::InvalidStory`] when the payload is not valid
///   JSON for the schema or holds fewer than three scenes.
#[instrument(skip(driver), fields(provider = driver.provider_name()))]
pub async fn generate_scene_sentences(
    driver: &dyn StoryDriver,
    theme: &str,
    model: Option<&str>,
) -> FabulaResult<Vec<String>> {
    let theme = theme.trim();
    if theme.is_empty() {
        return Err(StoryError::new(StoryErrorKind::EmptyTheme).into());
    }

    let request = GenerateRequest {
        messages: vec![Message::user_text(narrative_instruction(theme))],
        model: model.map(str::to_string),
        response_schema: Some(scenes_schema()),
        ..Default::default()
    };

    let response = driver.generate(&request).await?;
    let payload = response.first_text().ok_or_else(|| {
        StoryError::new(StoryErrorKind::InvalidStory(
            "response contained no text payload".to_string(),
        ))
    })?;

    let parsed: ScenesPayload = serde_json::from_str(payload)
        .map_err(|e| StoryError::new(StoryErrorKind::InvalidStory(e.to_string())))?;

    if parsed.scenes.len() < SCENE_COUNT {
        return Err(StoryError::new(StoryErrorKind::InvalidStory(format!(
            "backend returned {} scenes, need {}",
            parsed.scenes.len(),
            SCENE_COUNT
        )))
        .into());
    }

    debug!(returned = parsed.scenes.len(), "Parsed scene sentences");

    Ok(parsed
        .scenes
        .into_iter()
        .take(SCENE_COUNT)
        .map(|entry| entry.sentence)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_embeds_theme_verbatim() {
        let instruction = narrative_instruction("a lighthouse keeper's cat");
        assert!(instruction.contains("\"a lighthouse keeper's cat\""));
        assert!(instruction.contains("exactly 3 scenes"));
    }

    #[test]
    fn schema_requires_scenes_with_sentences() {
        let schema = scenes_schema();
        assert_eq!(schema["required"][0], "scenes");
        assert_eq!(
            schema["properties"]["scenes"]["items"]["required"][0],
            "sentence"
        );
    }
}

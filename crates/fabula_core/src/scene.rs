//! The story model: scenes and the three-scene story invariant.

use crate::SceneImage;
use fabula_error::{StoryError, StoryErrorKind};
use serde::{Deserialize, Serialize};

/// Number of scenes in every story.
pub const SCENE_COUNT: usize = 3;

/// One (sentence, illustration) pair of a generated story.
///
/// A scene is immutable once constructed and never partially populated:
/// both fields are set together when the scene finishes generating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Scene {
    /// The single sentence describing this scene
    text: String,
    /// The illustration for this scene (serialized as a data URI)
    #[serde(rename = "imageUrl")]
    image: SceneImage,
}

impl Scene {
    /// Create a fully populated scene.
    pub fn new(text: impl Into<String>, image: SceneImage) -> Self {
        Self {
            text: text.into(),
            image,
        }
    }
}

/// The complete ordered result of one generation run: exactly
/// [`SCENE_COUNT`] scenes, index `0..SCENE_COUNT`.
///
/// A `Story` can only be constructed from a full scene list, so no caller
/// ever observes a partially generated story.
///
/// # Examples
///
/// ```
/// use fabula_core::{Scene, SceneImage, Story};
///
/// let scenes: Vec<Scene> = (0..3)
///     .map(|i| Scene::new(format!("Scene {i}."), SceneImage::new("image/png", vec![i as u8])))
///     .collect();
/// let story = Story::new(scenes).unwrap();
/// assert_eq!(story.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Scene>", into = "Vec<Scene>")]
pub struct Story(Vec<Scene>);

impl Story {
    /// Build a story from exactly [`SCENE_COUNT`] scenes.
    ///
    /// # Errors
    ///
    /// Returns [`StoryErrorKind::InvalidStory`] for any other length.
    pub fn new(scenes: Vec<Scene>) -> Result<Self, StoryError> {
        if scenes.len() != SCENE_COUNT {
            return Err(StoryError::new(StoryErrorKind::InvalidStory(format!(
                "expected {} scenes, got {}",
                SCENE_COUNT,
                scenes.len()
            ))));
        }
        Ok(Self(scenes))
    }

    /// The scenes, in narrative order.
    pub fn scenes(&self) -> &[Scene] {
        &self.0
    }

    /// Number of scenes (always [`SCENE_COUNT`]).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Scene at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Scene> {
        self.0.get(index)
    }

    /// Index of the final scene.
    pub fn last_index(&self) -> usize {
        self.0.len() - 1
    }

    /// Clamp an index into the valid range `[0, len - 1]`.
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.last_index())
    }
}

impl TryFrom<Vec<Scene>> for Story {
    type Error = StoryError;

    fn try_from(scenes: Vec<Scene>) -> Result<Self, Self::Error> {
        Self::new(scenes)
    }
}

impl From<Story> for Vec<Scene> {
    fn from(story: Story) -> Self {
        story.0
    }
}

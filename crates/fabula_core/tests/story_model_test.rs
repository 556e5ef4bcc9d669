// Tests for the story data model and its serialization boundaries.

use fabula_core::{SCENE_COUNT, Scene, SceneImage, Story};

fn sample_scenes(count: usize) -> Vec<Scene> {
    (0..count)
        .map(|i| {
            Scene::new(
                format!("Scene {i} happens."),
                SceneImage::new("image/png", vec![i as u8, 0xAB]),
            )
        })
        .collect()
}

#[test]
fn data_uri_round_trips() {
    let image = SceneImage::new("image/jpeg", vec![0xFF, 0xD8, 0xFF]);
    let uri = image.to_data_uri();
    assert!(uri.starts_with("data:image/jpeg;base64,"));
    assert_eq!(SceneImage::from_data_uri(&uri).unwrap(), image);
}

#[test]
fn data_uri_rejects_missing_header() {
    assert!(SceneImage::from_data_uri("image/png;base64,AQID").is_err());
}

#[test]
fn data_uri_rejects_missing_base64_tag() {
    assert!(SceneImage::from_data_uri("data:image/png,AQID").is_err());
}

#[test]
fn data_uri_rejects_invalid_payload() {
    assert!(SceneImage::from_data_uri("data:image/png;base64,@@@@").is_err());
}

#[test]
fn data_uri_keeps_media_type_unverified() {
    // The producer's media type tag is embedded unchanged, even if bogus.
    let image = SceneImage::new("image/not-a-real-type", vec![1]);
    let decoded = SceneImage::from_data_uri(&image.to_data_uri()).unwrap();
    assert_eq!(decoded.mime(), "image/not-a-real-type");
}

#[test]
fn story_requires_exactly_three_scenes() {
    assert!(Story::new(sample_scenes(2)).is_err());
    assert!(Story::new(sample_scenes(4)).is_err());
    let story = Story::new(sample_scenes(SCENE_COUNT)).unwrap();
    assert_eq!(story.len(), SCENE_COUNT);
    assert_eq!(story.last_index(), SCENE_COUNT - 1);
}

#[test]
fn story_clamps_indices() {
    let story = Story::new(sample_scenes(SCENE_COUNT)).unwrap();
    assert_eq!(story.clamp_index(0), 0);
    assert_eq!(story.clamp_index(2), 2);
    assert_eq!(story.clamp_index(99), 2);
}

#[test]
fn scene_serializes_with_data_uri_image() {
    let scene = Scene::new("A scene.", SceneImage::new("image/png", vec![1, 2, 3]));
    let json = serde_json::to_value(&scene).unwrap();
    assert_eq!(json["text"], "A scene.");
    assert_eq!(json["imageUrl"], "data:image/png;base64,AQID");
}

#[test]
fn story_serde_enforces_scene_count() {
    let story = Story::new(sample_scenes(SCENE_COUNT)).unwrap();
    let json = serde_json::to_string(&story).unwrap();
    let back: Story = serde_json::from_str(&json).unwrap();
    assert_eq!(back, story);

    let short = serde_json::to_string(&sample_scenes(2)).unwrap();
    assert!(serde_json::from_str::<Story>(&short).is_err());
}

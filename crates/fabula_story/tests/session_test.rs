// Session state machine: reset-before-run, story/error exclusion,
// narration cancellation, and index clamping.

mod test_utils;

use std::sync::Arc;

use fabula_story::{GenerationSession, StoryPipeline};
use test_utils::{FakeSpeech, MockDriver, MockReply, scenes_json};

fn success_replies() -> Vec<MockReply> {
    vec![
        MockReply::Text(scenes_json(3)),
        MockReply::Image { mime: "image/png", data: vec![0] },
        MockReply::Image { mime: "image/png", data: vec![1] },
        MockReply::Image { mime: "image/png", data: vec![2] },
    ]
}

fn session_with(replies: Vec<MockReply>) -> (Arc<FakeSpeech>, GenerationSession) {
    let driver = Arc::new(MockDriver::new(replies));
    let speech = Arc::new(FakeSpeech::new());
    let session = GenerationSession::new(StoryPipeline::new(driver), speech.clone());
    (speech, session)
}

#[tokio::test]
async fn successful_run_installs_story() -> anyhow::Result<()> {
    let (_speech, session) = session_with(success_replies());

    session.begin("a moonlit garden", &()).await?;

    let state = session.state();
    assert_eq!(state.prompt(), "a moonlit garden");
    assert!(state.story().is_some());
    assert!(state.error().is_none());
    assert!(!state.is_loading());
    assert_eq!(*state.current_scene(), 0);
    Ok(())
}

#[tokio::test]
async fn failed_run_records_error_and_no_story() {
    let (_speech, session) = session_with(vec![MockReply::Text(scenes_json(1))]);

    assert!(session.begin("theme", &()).await.is_err());

    let state = session.state();
    assert!(state.story().is_none());
    let message = state.error().as_deref().unwrap();
    assert!(message.contains("Invalid story structure"));
    assert!(!state.is_loading());
}

#[tokio::test]
async fn backend_errors_surface_their_message_verbatim() {
    let (_speech, session) = session_with(vec![MockReply::Error(
        fabula_error::GeminiErrorKind::ApiRequest("socket closed".to_string()),
    )]);

    assert!(session.begin("theme", &()).await.is_err());

    let state = session.state();
    assert!(state.error().as_deref().unwrap().contains("socket closed"));
}

#[tokio::test]
async fn new_run_cancels_narration_and_clears_previous_result() -> anyhow::Result<()> {
    let driver = Arc::new(MockDriver::new(
        success_replies()
            .into_iter()
            .chain(vec![MockReply::Text(scenes_json(0))])
            .collect(),
    ));
    let speech = Arc::new(FakeSpeech::new());
    let session = GenerationSession::new(StoryPipeline::new(driver), speech.clone());

    session.begin("first theme", &()).await?;
    assert_eq!(speech.cancel_count(), 1);
    assert!(session.state().story().is_some());

    // Second run fails; the first story must not survive it.
    assert!(session.begin("second theme", &()).await.is_err());
    assert_eq!(speech.cancel_count(), 2);
    let state = session.state();
    assert!(state.story().is_none());
    assert!(state.error().is_some());
    assert_eq!(state.prompt(), "second theme");
    Ok(())
}

#[tokio::test]
async fn reset_returns_to_input_state() {
    let (speech, session) = session_with(vec![MockReply::Text(scenes_json(1))]);

    assert!(session.begin("theme", &()).await.is_err());
    session.reset();

    let state = session.state();
    assert!(state.story().is_none());
    assert!(state.error().is_none());
    assert_eq!(*state.current_scene(), 0);
    // reset also silences any narration
    assert_eq!(speech.cancel_count(), 2);
}

#[tokio::test]
async fn scene_selection_clamps_to_story_range() -> anyhow::Result<()> {
    let (_speech, session) = session_with(success_replies());
    session.begin("theme", &()).await?;

    session.set_scene(1);
    assert_eq!(*session.state().current_scene(), 1);

    session.set_scene(99);
    assert_eq!(*session.state().current_scene(), 2);
    Ok(())
}

#[tokio::test]
async fn scene_selection_ignored_without_story() {
    let (_speech, session) = session_with(vec![]);
    session.set_scene(2);
    assert_eq!(*session.state().current_scene(), 0);
}

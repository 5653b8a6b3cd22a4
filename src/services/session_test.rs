use super::*;
use crate::llm::types::{GenerateResponse, LlmError};
use crate::services::composer::{GENERIC_ERROR, Phase};
use crate::services::post::{Language, Tone};
use crate::state::test_helpers::{MockGenerator, test_app_state};

fn set_nifty(state: &AppState) {
    let mut composer = state.composer();
    composer.set_topic("Nifty hitting all time high");
    composer.set_tone(Tone::Hype);
    composer.set_language(Language::Hinglish);
    composer.set_cta("");
}

#[tokio::test]
async fn submit_once_calls_provider_once() {
    let mock = Arc::new(MockGenerator::with_texts(["**BREAKING** 🔥\nNifty sabse high!"]));
    let state = test_app_state(mock.clone());
    set_nifty(&state);

    submit_and_wait(&state).await.unwrap();

    assert_eq!(mock.call_count(), 1);
    let requests = mock.requests();
    let prompt = &requests[0].prompt;
    assert!(prompt.contains("Nifty hitting all time high"));
    assert!(prompt.contains("Hype"));
    assert!(prompt.contains("Hinglish"));
    assert!(prompt.contains("Make sure to check it out"));

    let composer = state.composer();
    assert_eq!(composer.phase(), Phase::Settled);
    assert_eq!(composer.content(), "**BREAKING** 🔥\nNifty sabse high!");
    assert!(composer.error().is_none());
    assert!(!composer.is_loading());
}

#[tokio::test]
async fn blank_topic_makes_no_call() {
    let mock = Arc::new(MockGenerator::with_texts([]));
    let state = test_app_state(mock.clone());
    state.composer().set_topic("  \n ");

    assert_eq!(submit_and_wait(&state).await.unwrap_err(), SubmitSkipped::EmptyTopic);
    assert_eq!(mock.call_count(), 0);
    assert_eq!(state.composer().phase(), Phase::Idle);
}

#[tokio::test]
async fn second_submit_while_pending_is_rejected() {
    let (mock, gate) = MockGenerator::gated(vec![Ok(GenerateResponse { text: "post".into(), ..Default::default() })]);
    let mock = Arc::new(mock);
    let state = test_app_state(mock.clone());
    set_nifty(&state);

    let handle = submit(&state).unwrap();
    assert!(state.composer().is_loading());
    assert!(!state.composer().can_submit());
    assert_eq!(submit(&state).unwrap_err(), SubmitSkipped::InFlight);

    gate.add_permits(1);
    handle.await.unwrap();
    assert_eq!(mock.call_count(), 1);
    assert_eq!(state.composer().content(), "post");
}

#[tokio::test]
async fn provider_failure_sets_generic_error() {
    let mock = Arc::new(MockGenerator::new(vec![Err(LlmError::MissingApiKey { var: "GEMINI_API_KEY".into() })]));
    let state = test_app_state(mock);
    set_nifty(&state);

    submit_and_wait(&state).await.unwrap();

    let composer = state.composer();
    assert_eq!(composer.error(), Some(GENERIC_ERROR));
    assert!(composer.content().is_empty());
    assert!(!composer.is_loading());
}

#[tokio::test]
async fn empty_provider_text_sets_generic_error() {
    let mock = Arc::new(MockGenerator::with_texts(["   "]));
    let state = test_app_state(mock);
    set_nifty(&state);

    submit_and_wait(&state).await.unwrap();
    assert_eq!(state.composer().error(), Some(GENERIC_ERROR));
}

#[tokio::test]
async fn cancel_aborts_pending_request() {
    let (mock, _gate) = MockGenerator::gated(vec![]);
    let state = test_app_state(Arc::new(mock));
    set_nifty(&state);

    let handle = submit(&state).unwrap();
    assert!(cancel(&state));
    assert!(handle.await.unwrap_err().is_cancelled());

    let composer = state.composer();
    assert!(!composer.is_loading());
    assert_eq!(composer.phase(), Phase::Idle);
}

#[tokio::test]
async fn reset_clears_settled_output() {
    let mock = Arc::new(MockGenerator::with_texts(["post"]));
    let state = test_app_state(mock);
    set_nifty(&state);
    submit_and_wait(&state).await.unwrap();

    reset(&state);
    assert_eq!(state.composer().phase(), Phase::Idle);
    assert!(state.composer().params().has_topic());
}

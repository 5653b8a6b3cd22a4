use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use super::*;
use crate::llm::types::LlmError;
use crate::services::composer::GENERIC_ERROR;
use crate::state::test_helpers::{MockGenerator, test_app_state};

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn healthz_ok() {
    let state = test_app_state(Arc::new(MockGenerator::with_texts([])));
    let resp = app(state)
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn api_generate_scenario_end_to_end() {
    let mock = Arc::new(MockGenerator::with_texts(["**BREAKING** 🔥\nNifty sabse high!"]));
    let state = test_app_state(mock.clone());

    let resp = app(state)
        .oneshot(json_request(
            "POST",
            "/api/generate",
            serde_json::json!({
                "topic": "Nifty hitting all time high",
                "tone": "Hype",
                "language": "Hinglish",
                "cta": ""
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["phase"], "settled");
    assert_eq!(body["loading"], false);
    assert!(body["error"].is_null());
    assert_eq!(body["content"], "**BREAKING** 🔥\nNifty sabse high!");
    assert_eq!(body["html"], "<b>BREAKING</b> 🔥<br/>Nifty sabse high!");
    assert_eq!(body["params"]["language"], "Hinglish");

    assert_eq!(mock.call_count(), 1);
    assert!(mock.requests()[0].prompt.contains("Make sure to check it out"));
}

#[tokio::test]
async fn api_generate_without_body_uses_stored_params() {
    let mock = Arc::new(MockGenerator::with_texts(["Nifty post"]));
    let state = test_app_state(mock.clone());
    state.composer().set_topic("Nifty");

    let resp = app(state)
        .oneshot(Request::builder().method("POST").uri("/api/generate").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["content"], "Nifty post");
    assert_eq!(body["params"]["topic"], "Nifty");
    assert_eq!(mock.call_count(), 1);
    assert!(mock.requests()[0].prompt.contains("- Topic: Nifty"));
}

#[tokio::test]
async fn api_generate_blank_topic_is_422_without_call() {
    let mock = Arc::new(MockGenerator::with_texts([]));
    let state = test_app_state(mock.clone());
    let resp = app(state)
        .oneshot(json_request("POST", "/api/generate", serde_json::json!({ "topic": "   " })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn api_generate_failure_returns_generic_error() {
    let mock = Arc::new(MockGenerator::new(vec![Err(LlmError::ApiRequest("connection refused".into()))]));
    let state = test_app_state(mock);
    let resp = app(state)
        .oneshot(json_request("POST", "/api/generate", serde_json::json!({ "topic": "Crypto crash" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["error"], GENERIC_ERROR);
    assert_eq!(body["content"], "");
}

#[tokio::test]
async fn api_generate_while_pending_is_409() {
    let (mock, gate) = MockGenerator::gated(vec![]);
    let mock = Arc::new(mock);
    let state = test_app_state(mock.clone());
    state.composer().set_topic("Nifty");
    let pending = crate::services::session::submit(&state).unwrap();

    let resp = app(state.clone())
        .oneshot(json_request("POST", "/api/generate", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    gate.add_permits(1);
    pending.await.unwrap();
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn api_patch_params_updates_fields() {
    let state = test_app_state(Arc::new(MockGenerator::with_texts([])));
    let resp = app(state)
        .oneshot(json_request("PATCH", "/api/params", serde_json::json!({ "tone": "Educational", "cta": "Link in bio" })))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["params"]["tone"], "Educational");
    assert_eq!(body["params"]["cta"], "Link in bio");
    assert_eq!(body["params"]["language"], "English");
    assert_eq!(body["phase"], "idle");
    assert_eq!(body["can_submit"], false);
}

#[tokio::test]
async fn form_generate_redirects_and_starts_generation() {
    let mock = Arc::new(MockGenerator::with_texts(["Loot deal"]));
    let state = test_app_state(mock.clone());

    let resp = app(state.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("topic=Flipkart+sale&tone=Urgent&language=Hindi&cta="))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/");

    let params = state.composer().params().clone();
    assert_eq!(params.topic, "Flipkart sale");
    assert_eq!(params.tone.as_str(), "Urgent");
    assert_eq!(params.language.as_str(), "Hindi");
    assert_eq!(state.composer().seq(), 1);
}

#[tokio::test]
async fn index_renders_page() {
    let state = test_app_state(Arc::new(MockGenerator::with_texts([])));
    let resp = app(state)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("<title>TeleGen</title>"));
    assert!(html.contains(r#"action="/generate""#));
}

#[tokio::test]
async fn settled_page_copies_in_browser() {
    let mock = Arc::new(MockGenerator::with_texts(["**BREAKING** 🔥\nNifty sabse high!"]));
    let state = test_app_state(mock);
    state.composer().set_topic("Nifty");
    crate::services::session::submit_and_wait(&state).await.unwrap();
    let router = app(state);

    let resp = router
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("data-source=\"**BREAKING** 🔥\nNifty sabse high!\""));
    assert!(html.contains("navigator.clipboard.writeText"));

    let resp = router
        .oneshot(Request::builder().method("POST").uri("/api/copy").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

//! Gemini provider and profiler against a mock HTTP endpoint.

use std::sync::Arc;

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use traitcloud::core::llm::{ChatMessage, ChatRequest, GoogleProvider, LLMError, LLMProvider};
use traitcloud::core::profiler::Profiler;
use traitcloud::core::traits::TraitMap;

const MODEL: &str = "gemini-2.0-flash";

fn gemini_reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

fn provider_for(server: &MockServer) -> GoogleProvider {
    GoogleProvider::new("AIzaTestKey".to_string(), MODEL.to_string())
        .unwrap()
        .with_base_url(server.uri())
}

#[tokio::test]
async fn chat_sends_key_header_and_parses_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:generateContent")))
        .and(header("x-goog-api-key", "AIzaTestKey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("Hello there.")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let response = provider
        .chat(ChatRequest::from_prompt("Say hello"))
        .await
        .unwrap();

    assert_eq!(response.content, "Hello there.");
    assert_eq!(response.model, MODEL);
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
}

#[tokio::test]
async fn chat_maps_history_roles_to_gemini_contents() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:generateContent")))
        .and(body_partial_json(serde_json::json!({
            "contents": [
                { "role": "user", "parts": [{ "text": "hi" }] },
                { "role": "model", "parts": [{ "text": "hello" }] },
                { "role": "user", "parts": [{ "text": "bye" }] }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = ChatRequest::new(vec![
        ChatMessage::user("hi"),
        ChatMessage::assistant("hello"),
        ChatMessage::user("bye"),
    ]);
    provider.chat(request).await.unwrap();
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider
        .chat(ChatRequest::from_prompt("hi"))
        .await
        .unwrap_err();

    match err {
        LLMError::ApiError { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("quota"));
        }
        other => panic!("expected ApiError, got {other}"),
    }
}

#[tokio::test]
async fn missing_candidates_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider
        .chat(ChatRequest::from_prompt("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, LLMError::InvalidResponse(_)));
}

#[tokio::test]
async fn propose_deltas_extracts_json_from_prose() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(
            "Here are the adjustments:\n{\n  \"curious\": 3,\n  \"guarded\": 2\n}",
        )))
        .mount(&server)
        .await;

    let profiler = Profiler::new(Arc::new(provider_for(&server)));
    let deltas = profiler
        .propose_deltas("A cautious scholar.", "Mara", &TraitMap::new())
        .await
        .unwrap();

    assert_eq!(deltas.get("curious"), Some(&3));
    assert_eq!(deltas.get("guarded"), Some(&2));
}

#[tokio::test]
async fn propose_deltas_degrades_to_empty_on_prose_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(gemini_reply("I cannot help with that.")),
        )
        .mount(&server)
        .await;

    let profiler = Profiler::new(Arc::new(provider_for(&server)));
    let deltas = profiler
        .propose_deltas("...", "Mara", &TraitMap::new())
        .await
        .unwrap();
    assert!(deltas.is_empty());
}

#[tokio::test]
async fn ask_question_returns_raw_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(gemini_reply("She fits the Explorer.")),
        )
        .mount(&server)
        .await;

    let profiler = Profiler::new(Arc::new(provider_for(&server)));
    let mut traits = TraitMap::new();
    traits.insert("curious".to_string(), 3);

    let answer = profiler
        .ask_question("What archetype?", "Mara", &traits, &[])
        .await
        .unwrap();
    assert_eq!(answer, "She fits the Explorer.");
}

#![allow(unused_crate_dependencies)]
#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::expect_used, reason = "panics are the assertion mechanism in integration tests")]

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use chatbridge_core::proxy::{build_proxy_router, AppState};
use chatbridge_types::BridgeConfig;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OLLAMA_MODEL: &str = r#"{"id":"ollama:llama3","name":"Llama 3","provider":"Ollama","providerId":"ollama","enabled":true,"toolCallType":"manual"}"#;

fn app(ollama: &MockServer) -> TestServer {
    let mut config = BridgeConfig::default();
    config.ollama.base_url = ollama.uri();
    let state = AppState::new(config, reqwest::Client::new());
    TestServer::new(build_proxy_router(state)).expect("test server")
}

fn model_cookie(model_json: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("selectedModel={}", urlencoding::encode(model_json)))
        .expect("cookie header")
}

fn chat_body(id: Option<&str>) -> Value {
    let mut body = json!({ "messages": [{"role": "user", "content": "hello"}] });
    if let Some(id) = id {
        body["id"] = json!(id);
    }
    body
}

/// Split an SSE body into `data:` payloads, `[DONE]` kept as a string.
fn events(body: &str) -> Vec<String> {
    body.split("\n\n")
        .filter(|event| !event.is_empty())
        .map(|event| event.strip_prefix("data: ").expect("data prefix").to_string())
        .collect()
}

fn parse(event: &str) -> Value {
    serde_json::from_str(event).expect("event payload is JSON")
}

async fn mount_chat_stream(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"model": "llama3", "stream": true})))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_ollama_stream_is_translated() {
    let ollama = MockServer::start().await;
    mount_chat_stream(
        &ollama,
        200,
        "{\"message\":{\"role\":\"assistant\",\"content\":\"Hi\"},\"done\":false}\n\
         {\"message\":{\"role\":\"assistant\",\"content\":\" there\"},\"done\":false}\n\
         {\"done\":true}\n",
    )
    .await;

    let response = app(&ollama)
        .post("/api/chat")
        .add_header(header::COOKIE, model_cookie(OLLAMA_MODEL))
        .json(&chat_body(Some("chat-42")))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).expect("content type"),
        "text/event-stream"
    );

    let events = events(&response.text());
    assert_eq!(events.len(), 5, "unexpected events: {events:?}");

    let start = parse(&events[0]);
    assert_eq!(start["object"], "chat.completion.chunk");
    assert_eq!(start["model"], "ollama:llama3");
    assert_eq!(start["choices"][0]["delta"]["role"], "assistant");
    assert_eq!(start["choices"][0]["delta"]["content"], "");
    assert!(start["choices"][0]["finish_reason"].is_null());

    assert_eq!(parse(&events[1])["choices"][0]["delta"]["content"], "Hi");
    assert_eq!(parse(&events[2])["choices"][0]["delta"]["content"], " there");

    let end = parse(&events[3]);
    assert_eq!(end["choices"][0]["finish_reason"], "stop");
    assert_eq!(end["choices"][0]["delta"], json!({}));

    assert_eq!(events[4], "[DONE]");

    for event in &events[..4] {
        assert_eq!(parse(event)["id"], "chat-42");
    }
}

#[tokio::test]
async fn test_generated_id_is_shared_by_all_frames() {
    let ollama = MockServer::start().await;
    mount_chat_stream(&ollama, 200, "{\"message\":{\"content\":\"x\"}}\n{\"done\":true}").await;

    let response = app(&ollama)
        .post("/api/chat")
        .add_header(header::COOKIE, model_cookie(OLLAMA_MODEL))
        .json(&chat_body(None))
        .await;

    let events = events(&response.text());
    let ids: Vec<Value> = events[..3].iter().map(|e| parse(e)["id"].clone()).collect();
    assert!(ids[0].as_str().is_some_and(|id| !id.is_empty()));
    assert!(ids.iter().all(|id| *id == ids[0]));
}

#[tokio::test]
async fn test_malformed_lines_are_skipped() {
    let ollama = MockServer::start().await;
    mount_chat_stream(
        &ollama,
        200,
        "{\"message\":{\"content\":\"a\"}}\nnot json at all\n\n{\"message\":{\"content\":\"b\"}}\n{\"done\":true}\n",
    )
    .await;

    let response = app(&ollama)
        .post("/api/chat")
        .add_header(header::COOKIE, model_cookie(OLLAMA_MODEL))
        .json(&chat_body(Some("c1")))
        .await;

    let events = events(&response.text());
    let transcript: String = events
        .iter()
        .filter(|e| e.as_str() != "[DONE]")
        .filter_map(|e| parse(e)["choices"][0]["delta"]["content"].as_str().map(str::to_string))
        .collect();
    assert_eq!(transcript, "ab");
    assert_eq!(events.last().map(String::as_str), Some("[DONE]"));
}

#[tokio::test]
async fn test_upstream_error_becomes_error_frame() {
    let ollama = MockServer::start().await;
    mount_chat_stream(&ollama, 500, "model 'llama3' not found").await;

    let response = app(&ollama)
        .post("/api/chat")
        .add_header(header::COOKIE, model_cookie(OLLAMA_MODEL))
        .json(&chat_body(Some("c2")))
        .await;

    response.assert_status_ok();
    let events = events(&response.text());
    assert_eq!(events.len(), 2, "unexpected events: {events:?}");
    assert_eq!(parse(&events[0])["choices"][0]["delta"]["role"], "assistant");
    assert_eq!(
        parse(&events[1]),
        json!({"error": true, "message": "Ollama API error: model 'llama3' not found"})
    );
}

#[tokio::test]
async fn test_share_page_is_forbidden() {
    let ollama = MockServer::start().await;

    let response = app(&ollama)
        .post("/api/chat")
        .add_header(header::REFERER, HeaderValue::from_static("http://localhost:3000/share/abc"))
        .add_header(header::COOKIE, model_cookie(OLLAMA_MODEL))
        .json(&chat_body(None))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.text(), "Chat API is not available on share pages");
    assert!(ollama.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_disabled_provider_is_not_found() {
    let ollama = MockServer::start().await;

    let response = app(&ollama)
        .post("/api/chat")
        .add_header(
            header::COOKIE,
            model_cookie(r#"{"id":"claude-3","providerId":"anthropic","toolCallType":"native"}"#),
        )
        .json(&chat_body(None))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "Selected provider is not enabled anthropic");
}

#[tokio::test]
async fn test_corrupt_cookie_uses_default_model() {
    let ollama = MockServer::start().await;

    let response = app(&ollama)
        .post("/api/chat")
        .add_header(header::COOKIE, HeaderValue::from_static("selectedModel=%7Bnot-json"))
        .json(&chat_body(None))
        .await;

    // Default model is OpenAI with native tools; that builder is not wired in tests.
    response.assert_status(StatusCode::NOT_IMPLEMENTED);
    let body: Value = response.json();
    assert_eq!(body["model"], "gpt-4o-mini");
    assert!(body["error"].as_str().is_some_and(|e| e.contains("native-tool-calling")));
    assert!(ollama.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_invalid_body_is_generic_500() {
    let ollama = MockServer::start().await;

    let response = app(&ollama).post("/api/chat").text("definitely not json").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "Error processing your request");
}

#[tokio::test]
async fn test_list_models_passthrough() {
    let ollama = MockServer::start().await;
    let tags = json!({"models": [{"name": "llama3:latest", "size": 4661224676_u64}]});
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tags.clone()))
        .mount(&ollama)
        .await;

    let response = app(&ollama).get("/api/ollama").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), tags);
}

#[tokio::test]
async fn test_list_models_failure_keeps_status() {
    let ollama = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&ollama)
        .await;

    let response = app(&ollama).get("/api/ollama").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "Failed to list models: Service Unavailable"})
    );
}

#[tokio::test]
async fn test_chat_relay_merges_options() {
    let ollama = MockServer::start().await;
    let reply = json!({"message": {"role": "assistant", "content": "ok"}, "done": true});
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"model": "llama3", "stream": false, "temperature": 0.5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply.clone()))
        .expect(1)
        .mount(&ollama)
        .await;

    let response = app(&ollama)
        .post("/api/ollama")
        .json(&json!({
            "model": "llama3",
            "messages": [{"role": "user", "content": "hi"}],
            "options": {"temperature": 0.5}
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), reply);
}

#[tokio::test]
async fn test_chat_relay_failure() {
    let ollama = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&ollama)
        .await;

    let response = app(&ollama)
        .post("/api/ollama")
        .json(&json!({"model": "missing", "messages": []}))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), json!({"error": "Ollama API error: Not Found"}));
}

#[tokio::test]
async fn test_chat_relay_forwards_tool_messages() {
    let ollama = MockServer::start().await;
    let messages = json!([
        {"role": "user", "content": "what is 6*7"},
        {"role": "tool", "content": "42"}
    ]);
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"model": "llama3", "messages": messages.clone()})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"done": true})))
        .expect(1)
        .mount(&ollama)
        .await;

    let response = app(&ollama)
        .post("/api/ollama")
        .json(&json!({"model": "llama3", "messages": messages}))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_chat_relay_bad_body_is_error_json() {
    let ollama = MockServer::start().await;

    let response = app(&ollama).post("/api/ollama").text("not json").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"].as_str().is_some_and(|e| e.starts_with("Invalid request body")));
    assert!(ollama.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_health() {
    let ollama = MockServer::start().await;

    let response = app(&ollama).get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"status": "ok"}));
}

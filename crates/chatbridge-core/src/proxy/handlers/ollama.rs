//! Pass-through routes to the local Ollama server, used by the model picker
//! and for one-shot completions.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::error;

use crate::proxy::server::AppState;
use crate::proxy::upstream::PassthroughReply;

/// Body of `POST /api/ollama`.
///
/// `model` and `messages` are forwarded as sent, so Ollama sees roles and
/// fields this bridge does not model.
#[derive(Debug, Deserialize)]
pub struct OllamaRelayRequest {
    #[serde(default)]
    pub model: Value,
    #[serde(default)]
    pub messages: Value,
    /// Merged into the top level of the upstream body
    #[serde(default)]
    pub options: Map<String, Value>,
}

impl OllamaRelayRequest {
    /// Upstream body: `stream` defaults to false, `options` entries override.
    pub fn into_upstream_body(self) -> Value {
        let mut body = Map::new();
        if !self.model.is_null() {
            body.insert("model".to_string(), self.model);
        }
        if !self.messages.is_null() {
            body.insert("messages".to_string(), self.messages);
        }
        body.insert("stream".to_string(), Value::Bool(false));
        body.extend(self.options);
        Value::Object(body)
    }
}

fn error_body(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// `GET /api/ollama`
pub async fn handle_list_models(State(state): State<AppState>) -> Response {
    match state.upstream.list_models().await {
        Ok(PassthroughReply::Json(value)) => Json(value).into_response(),
        Ok(PassthroughReply::Failed { status, status_text }) => {
            error_body(status, format!("Failed to list models: {}", status_text))
        },
        Err(e) => {
            error!("Ollama list models error: {}", e);
            error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        },
    }
}

/// `POST /api/ollama`
pub async fn handle_chat_relay(
    State(state): State<AppState>,
    body: Bytes,
) -> Response {
    let request: OllamaRelayRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            error!("Ollama chat relay body rejected: {}", e);
            return error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Invalid request body: {}", e),
            );
        },
    };

    let body = request.into_upstream_body();
    match state.upstream.chat_once(&body).await {
        Ok(PassthroughReply::Json(value)) => Json(value).into_response(),
        Ok(PassthroughReply::Failed { status, status_text }) => {
            error_body(status, format!("Ollama API error: {}", status_text))
        },
        Err(e) => {
            error!("Ollama chat relay error: {}", e);
            error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        },
    }
}

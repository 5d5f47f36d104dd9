use async_trait::async_trait;
use axum::http::StatusCode;
use chatbridge_types::protocol::OllamaChatRequest;
use chatbridge_types::ProxyError;
use futures::StreamExt;
use reqwest::Client;
use serde_json::Value;

use super::{ByteStream, LineDelimitedBackend};
use crate::error::AppResult;

const PROVIDER: &str = "ollama";

/// Outcome of a non-streaming relay call.
#[derive(Debug, Clone, PartialEq)]
pub enum PassthroughReply {
    /// 2xx with a JSON body, forwarded verbatim
    Json(Value),
    /// Non-success status; `status_text` is the canonical reason phrase
    Failed { status: StatusCode, status_text: String },
}

/// HTTP client for a local Ollama server.
pub struct OllamaClient {
    http_client: Client,
    base_url: String,
}

impl OllamaClient {
    /// Create a client for `base_url` using a pre-built `reqwest::Client`.
    pub fn new(http_client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http_client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /api/tags`, relayed as-is.
    pub async fn list_models(&self) -> AppResult<PassthroughReply> {
        let response = self.http_client.get(self.url("/api/tags")).send().await?;
        relay_json(response).await
    }

    /// Single-shot `POST /api/chat` with an arbitrary body.
    pub async fn chat_once(&self, body: &Value) -> AppResult<PassthroughReply> {
        let response = self.http_client.post(self.url("/api/chat")).json(body).send().await?;
        relay_json(response).await
    }
}

async fn relay_json(response: reqwest::Response) -> AppResult<PassthroughReply> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!("Ollama relay returned {}", status);
        return Ok(PassthroughReply::Failed {
            status: StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        });
    }
    Ok(PassthroughReply::Json(response.json::<Value>().await?))
}

#[async_trait]
impl LineDelimitedBackend for OllamaClient {
    fn provider(&self) -> &str {
        PROVIDER
    }

    async fn open_chat_stream(&self, request: &OllamaChatRequest) -> Result<ByteStream, ProxyError> {
        tracing::debug!("Opening Ollama stream for model {}", request.model);

        let response = self
            .http_client
            .post(self.url("/api/chat"))
            .json(request)
            .send()
            .await
            .map_err(|e| ProxyError::upstream(PROVIDER, format!("Ollama API error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Ollama returned {} on stream open: {}", status, body);
            return Err(ProxyError::upstream(PROVIDER, format!("Ollama API error: {}", body)));
        }

        let stream = response.bytes_stream().map(|item| {
            item.map_err(|e| ProxyError::upstream(PROVIDER, format!("Ollama stream error: {}", e)))
        });
        Ok(Box::pin(stream))
    }
}

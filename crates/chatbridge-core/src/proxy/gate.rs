//! Request Gate: decides whether a chat request may be served at all.

use axum::http::{header, HeaderMap};
use chatbridge_types::{ChatMessage, ChatTurn, ModelDescriptor, ProxyError};
use serde::Deserialize;

use super::registry::ProviderRegistry;

/// Referer path marker of the read-only share view.
pub const SHARE_PATH_MARKER: &str = "/share/";

pub const SELECTED_MODEL_COOKIE: &str = "selectedModel";
pub const SEARCH_MODE_COOKIE: &str = "search-mode";

const SHARE_PAGE_REASON: &str = "Chat API is not available on share pages";

/// Client-facing request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub id: Option<String>,
}

/// Request metadata the gate looks at, lifted out of the headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub referer: Option<String>,
    /// Raw `selectedModel` cookie value
    pub selected_model: Option<String>,
    pub search_mode: bool,
}

impl RequestContext {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let referer = headers
            .get(header::REFERER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        Self {
            referer,
            selected_model: cookie_value(headers, SELECTED_MODEL_COOKIE),
            search_mode: cookie_value(headers, SEARCH_MODE_COOKIE).as_deref() == Some("true"),
        }
    }

    fn is_share_page(&self) -> bool {
        self.referer.as_deref().is_some_and(|r| r.contains(SHARE_PATH_MARKER))
    }
}

/// Find a cookie across all `Cookie` headers, percent-decoding its value.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| match urlencoding::decode(value) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => value.to_string(),
        })
}

/// Decode the persisted model selection, degrading to the default on any failure.
pub fn resolve_model(selected: Option<&str>) -> ModelDescriptor {
    let Some(raw) = selected else {
        return ModelDescriptor::default_model();
    };
    match serde_json::from_str::<ModelDescriptor>(raw) {
        Ok(model) => model,
        Err(e) => {
            tracing::error!("Failed to parse selected model: {}", e);
            ModelDescriptor::default_model()
        },
    }
}

/// Admit a request or reject it before any backend is contacted.
pub fn admit(
    registry: &ProviderRegistry,
    ctx: &RequestContext,
    request: ChatRequest,
) -> Result<ChatTurn, ProxyError> {
    if ctx.is_share_page() {
        tracing::info!("Rejected chat request from share page");
        return Err(ProxyError::Forbidden { reason: SHARE_PAGE_REASON.to_string() });
    }

    let model = resolve_model(ctx.selected_model.as_deref());

    if !registry.is_provider_enabled(&model.provider_id) || !model.enabled {
        tracing::info!("Rejected chat request for disabled {} / {}", model.provider_id, model.id);
        return Err(ProxyError::NotFound { provider_id: model.provider_id });
    }

    Ok(ChatTurn {
        messages: request.messages,
        model,
        conversation_id: request.id,
        search_mode: ctx.search_mode,
    })
}

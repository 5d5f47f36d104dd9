use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chatbridge_types::ChatTurn;
use serde_json::json;

/// Builds the full HTTP response for an admitted chat turn.
///
/// The tool-calling pipelines for SSE-native providers live outside this crate
/// and plug in through this trait.
#[async_trait]
pub trait ResponseBuilder: Send + Sync {
    fn name(&self) -> &'static str;

    async fn build(&self, turn: ChatTurn) -> Response;
}

/// Placeholder for a builder that has not been wired in.
#[derive(Debug, Clone, Copy)]
pub struct UnconfiguredBuilder {
    name: &'static str,
}

impl UnconfiguredBuilder {
    pub fn native_tools() -> Self {
        Self { name: "native-tool-calling" }
    }

    pub fn manual_tools() -> Self {
        Self { name: "manual-tool-calling" }
    }
}

#[async_trait]
impl ResponseBuilder for UnconfiguredBuilder {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn build(&self, turn: ChatTurn) -> Response {
        tracing::warn!(
            "No {} response builder configured for model {}",
            self.name,
            turn.model.id
        );
        (
            StatusCode::NOT_IMPLEMENTED,
            Json(json!({
                "error": format!("{} response builder is not configured", self.name),
                "model": turn.model.id,
            })),
        )
            .into_response()
    }
}

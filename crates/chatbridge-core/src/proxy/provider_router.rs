use std::sync::Arc;

use axum::response::Response;
use chatbridge_types::{ChatTurn, ModelDescriptor};

use super::builders::ResponseBuilder;
use super::mappers::ollama::StreamPump;
use super::registry::ProviderRegistry;

/// Strategy chosen for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Backend streams line-delimited JSON; translated by the stream pump
    LineDelimited,
    /// Provider with native function calling
    NativeTools,
    /// Provider with prompt-based tool calling
    ManualTools,
}

pub fn select_route(registry: &ProviderRegistry, model: &ModelDescriptor) -> Route {
    if registry.is_line_delimited(&model.provider_id) {
        Route::LineDelimited
    } else if model.supports_native_tools() {
        Route::NativeTools
    } else {
        Route::ManualTools
    }
}

/// Dispatches an admitted turn to the strategy that serves it.
#[derive(Clone)]
pub struct ProviderRouter {
    registry: Arc<ProviderRegistry>,
    pump: StreamPump,
    native: Arc<dyn ResponseBuilder>,
    manual: Arc<dyn ResponseBuilder>,
}

impl ProviderRouter {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        pump: StreamPump,
        native: Arc<dyn ResponseBuilder>,
        manual: Arc<dyn ResponseBuilder>,
    ) -> Self {
        Self { registry, pump, native, manual }
    }

    pub async fn route(&self, turn: ChatTurn) -> Response {
        let route = select_route(&self.registry, &turn.model);
        tracing::info!(
            "Routing {} ({}) via {:?}",
            turn.model.id,
            turn.model.provider_id,
            route
        );

        match route {
            Route::LineDelimited => self.pump.respond(turn),
            Route::NativeTools => self.native.build(turn).await,
            Route::ManualTools => self.manual.build(turn).await,
        }
    }
}

use std::future::Future;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use chatbridge_types::BridgeConfig;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::proxy::builders::{ResponseBuilder, UnconfiguredBuilder};
use crate::proxy::handlers;
use crate::proxy::mappers::ollama::StreamPump;
use crate::proxy::provider_router::ProviderRouter;
use crate::proxy::registry::ProviderRegistry;
use crate::proxy::upstream::OllamaClient;

/// Axum application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ProviderRegistry>,
    pub upstream: Arc<OllamaClient>,
    pub router: Arc<ProviderRouter>,
}

impl AppState {
    /// State with both tool-calling builders left unconfigured.
    pub fn new(config: BridgeConfig, http_client: reqwest::Client) -> Self {
        Self::with_builders(
            config,
            http_client,
            Arc::new(UnconfiguredBuilder::native_tools()),
            Arc::new(UnconfiguredBuilder::manual_tools()),
        )
    }

    pub fn with_builders(
        config: BridgeConfig,
        http_client: reqwest::Client,
        native: Arc<dyn ResponseBuilder>,
        manual: Arc<dyn ResponseBuilder>,
    ) -> Self {
        let registry = Arc::new(ProviderRegistry::from_config(&config.providers));
        let upstream = Arc::new(OllamaClient::new(http_client, config.ollama.base_url.clone()));
        let pump = StreamPump::new(upstream.clone(), config.server.stream_buffer);

        tracing::debug!(
            "Wired Ollama at {}, builders: native={}, manual={}",
            upstream.base_url(),
            native.name(),
            manual.name()
        );
        let router = Arc::new(ProviderRouter::new(registry.clone(), pump, native, manual));

        Self { registry, upstream, router }
    }
}

pub fn build_proxy_router(state: AppState) -> Router<()> {
    Router::new()
        .route("/api/chat", post(handlers::chat::handle_chat))
        .route(
            "/api/ollama",
            get(handlers::ollama::handle_list_models).post(handlers::ollama::handle_chat_relay),
        )
        .route("/health", get(handlers::handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

/// Axum server instance
pub struct AxumServer {
    state: AppState,
}

impl AxumServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Serve until `shutdown` resolves, then let in-flight streams finish.
    pub async fn run<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!("Starting Axum server on {}", listener.local_addr()?);

        let app = build_proxy_router(self.state);
        axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;

        tracing::info!("Axum server stopped");
        Ok(())
    }
}

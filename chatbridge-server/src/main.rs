//! chatbridge Server - Headless Daemon
//!
//! Serves the chat front-end's API:
//! - `POST /api/chat` streams OpenAI-style chunks, translating line-delimited backends
//! - `GET|POST /api/ollama` relays model listing and one-shot completions to Ollama
//! - `GET /health`

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod server_utils;

use chatbridge_core::modules::config::load_config;
use chatbridge_core::proxy::common::build_http_client;
use chatbridge_core::proxy::{AppState, AxumServer};
use cli::Cli;

const CONNECT_TIMEOUT_SECS: u64 = 10;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = load_config(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    cli.apply_to(&mut config);

    info!("chatbridge {} starting...", env!("CHATBRIDGE_BUILD_VERSION"));
    info!("Ollama backend at {}", config.ollama.base_url);
    info!("Enabled providers: {}", config.providers.enabled.join(", "));

    let http_client = build_http_client(CONNECT_TIMEOUT_SECS)?;
    let addr = config.server.socket_addr();
    let state = AppState::new(config, http_client);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?;
    info!("Server listening on http://{}", addr);

    AxumServer::new(state)
        .run(listener, server_utils::shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Server stopped");
    Ok(())
}

use chatbridge_types::BridgeConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "chatbridge-server",
    about = "chatbridge - OpenAI-compatible chat streaming for local backends",
    version = env!("CHATBRIDGE_BUILD_VERSION"),
    author
)]
pub struct Cli {
    #[arg(long, env = "CHATBRIDGE_HOST", help = "Interface to bind (overrides config)")]
    pub host: Option<String>,

    #[arg(short, long, env = "CHATBRIDGE_PORT", help = "Port to listen on (overrides config)")]
    pub port: Option<u16>,

    #[arg(short, long, env = "CHATBRIDGE_CONFIG", help = "Path to config.json")]
    pub config: Option<PathBuf>,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Flags win over config-file values.
    pub fn apply_to(&self, config: &mut BridgeConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

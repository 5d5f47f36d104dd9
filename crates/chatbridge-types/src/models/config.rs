//! Application configuration models.

use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Server
// ============================================================================

/// Listener and streaming settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct ServerConfig {
    /// Interface to bind
    #[validate(length(min = 1))]
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[validate(range(min = 1))]
    #[serde(default = "default_port")]
    pub port: u16,
    /// Frames buffered between the stream pump and a slow client
    #[validate(range(min = 1, max = 4096))]
    #[serde(default = "default_stream_buffer")]
    pub stream_buffer: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), stream_buffer: default_stream_buffer() }
    }
}

impl ServerConfig {
    /// Get the full bind socket address.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ============================================================================
// Backends
// ============================================================================

/// Local Ollama backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct OllamaConfig {
    /// Base URL, without trailing slash
    #[validate(url)]
    #[serde(default = "default_ollama_base_url")]
    pub base_url: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self { base_url: default_ollama_base_url() }
    }
}

/// Provider registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct ProvidersConfig {
    /// Provider ids that may serve requests
    #[serde(default = "default_enabled_providers")]
    pub enabled: Vec<String>,
    /// Providers whose native wire format is line-delimited JSON
    #[serde(default = "default_line_delimited_providers")]
    pub line_delimited: Vec<String>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled_providers(),
            line_delimited: default_line_delimited_providers(),
        }
    }
}

// ============================================================================
// Main Configuration
// ============================================================================

/// Full application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct BridgeConfig {
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,
    #[serde(default)]
    #[validate(nested)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    #[validate(nested)]
    pub providers: ProvidersConfig,
}

// ============================================================================
// Default Value Functions
// ============================================================================

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_stream_buffer() -> usize {
    32
}

fn default_ollama_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_enabled_providers() -> Vec<String> {
    vec!["openai".to_string(), "ollama".to_string()]
}

fn default_line_delimited_providers() -> Vec<String> {
    vec!["ollama".to_string()]
}

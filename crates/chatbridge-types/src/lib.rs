//! # chatbridge Types
//!
//! Wire types, models, and error definitions for chatbridge.
//!
//! This crate provides the foundational type system shared by the proxy core
//! and the server binary:
//!
//! - **`error`** - Typed error taxonomy for proxying and configuration
//! - **`models`** - Domain models (ChatMessage, ModelDescriptor, BridgeConfig)
//! - **`protocol`** - OpenAI chunk frames and Ollama line-delimited wire types
//!
//! ## Architecture Role
//!
//! ```text
//!         chatbridge-types (this crate)
//!                  │
//!                  ▼
//!          chatbridge-core
//!                  │
//!                  ▼
//!          chatbridge-server
//! ```

pub mod error;
pub mod models;
pub mod protocol;

// Re-export error types for convenience
pub use error::{ConfigError, ProxyError, Result, TypedError};

// Re-export core model types
pub use models::{
    BridgeConfig, ChatMessage, ChatRole, ChatTurn, ModelDescriptor, OllamaConfig, ProvidersConfig,
    ServerConfig, ToolCallType,
};

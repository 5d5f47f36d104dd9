//! Core domain models for chatbridge.
//!
//! This module contains the data structures passed between the request gate,
//! the provider router and the stream pump.

mod chat;
mod config;
mod model;

// Re-export all models
pub use chat::{ChatMessage, ChatRole, ChatTurn};
pub use config::{BridgeConfig, OllamaConfig, ProvidersConfig, ServerConfig};
pub use model::{ModelDescriptor, ToolCallType};

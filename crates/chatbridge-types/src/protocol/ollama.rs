//! Ollama `/api/chat` wire types.

use serde::{Deserialize, Serialize};

use crate::models::{ChatMessage, ChatRole, ModelDescriptor};

/// Message as Ollama expects it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OllamaMessage {
    pub role: ChatRole,
    pub content: String,
}

impl From<&ChatMessage> for OllamaMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self { role: msg.role, content: msg.content.clone() }
    }
}

/// Streaming chat request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OllamaChatRequest {
    /// Backend-native model id (no `ollama:` prefix)
    pub model: String,
    pub messages: Vec<OllamaMessage>,
    pub stream: bool,
}

impl OllamaChatRequest {
    /// Build the streaming request for a resolved model and history.
    pub fn from_turn(model: &ModelDescriptor, messages: &[ChatMessage]) -> Self {
        Self {
            model: model.backend_model_name().to_string(),
            messages: messages.iter().map(OllamaMessage::from).collect(),
            stream: true,
        }
    }
}

/// `message` object inside one streamed line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OllamaChunkMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// One line of the `/api/chat` streaming response.
///
/// Only `message.content` is consumed; the final `done: true` line carries
/// timing counters that are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OllamaChatChunk {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub message: Option<OllamaChunkMessage>,
    #[serde(default)]
    pub done: bool,
}

//! Model selection metadata.

use serde::{Deserialize, Serialize};

/// How a model expects tools to be offered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolCallType {
    /// Provider supports function calling natively
    Native,
    /// Tools are described in the prompt and parsed from text
    #[default]
    Manual,
}

/// Model selection, as persisted by the client in the `selectedModel` cookie.
///
/// Field names follow the client's camelCase JSON. A missing `enabled` flag
/// counts as enabled; a missing `toolCallType` counts as manual.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub provider: String,
    pub provider_id: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub tool_call_type: ToolCallType,
}

/// Prefix carried by Ollama model ids in the client's model list.
pub const OLLAMA_MODEL_PREFIX: &str = "ollama:";

impl ModelDescriptor {
    /// Fallback used when no selection is persisted or it cannot be decoded.
    pub fn default_model() -> Self {
        Self {
            id: "gpt-4o-mini".to_string(),
            name: "GPT-4o mini".to_string(),
            provider: "OpenAI".to_string(),
            provider_id: "openai".to_string(),
            enabled: true,
            tool_call_type: ToolCallType::Native,
        }
    }

    /// Model id as the backend knows it (client-side prefix stripped).
    pub fn backend_model_name(&self) -> &str {
        self.id.strip_prefix(OLLAMA_MODEL_PREFIX).unwrap_or(&self.id)
    }

    pub fn supports_native_tools(&self) -> bool {
        self.tool_call_type == ToolCallType::Native
    }
}

impl Default for ModelDescriptor {
    fn default() -> Self {
        Self::default_model()
    }
}

fn default_true() -> bool {
    true
}

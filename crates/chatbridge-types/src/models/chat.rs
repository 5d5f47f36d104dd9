//! Conversation models.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ModelDescriptor;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::System => write!(f, "system"),
            ChatRole::User => write!(f, "user"),
            ChatRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message of the conversation history.
///
/// Unknown fields sent by chat front-ends (ids, annotations, tool invocations)
/// are ignored; only `role` and `content` travel upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

/// An admitted request, as handed from the request gate to the provider router.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    /// Conversation history, in order
    pub messages: Vec<ChatMessage>,
    /// Resolved model selection for this request only
    pub model: ModelDescriptor,
    /// Conversation id supplied by the client, if any
    pub conversation_id: Option<String>,
    /// Persisted search-mode flag
    pub search_mode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ignores_extra_fields() {
        let msg: ChatMessage = serde_json::from_value(serde_json::json!({
            "id": "m1",
            "role": "assistant",
            "content": "hello",
            "annotations": []
        }))
        .expect("message should parse");

        assert_eq!(msg, ChatMessage::new(ChatRole::Assistant, "hello"));
    }

    #[test]
    fn test_role_rejects_unknown_value() {
        let result: Result<ChatMessage, _> =
            serde_json::from_value(serde_json::json!({"role": "tool", "content": "x"}));
        assert!(result.is_err());
    }
}

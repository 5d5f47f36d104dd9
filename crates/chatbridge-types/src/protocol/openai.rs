//! OpenAI `chat.completion.chunk` streaming types.

use serde::{Deserialize, Serialize};

/// Value of the `object` field on every chunk.
pub const CHUNK_OBJECT: &str = "chat.completion.chunk";

/// Streamed delta for one choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ChunkDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// One choice of a chunk. `finish_reason` is always present, `null` until the end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkChoice {
    pub index: u32,
    pub delta: ChunkDelta,
    pub finish_reason: Option<String>,
}

/// A `chat.completion.chunk` object as written after `data: `.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatCompletionChunk {
    pub id: String,
    pub model: String,
    pub created: i64,
    pub object: String,
    pub choices: Vec<ChunkChoice>,
}

/// In-band failure payload, `{"error": true, "message": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamErrorPayload {
    pub error: bool,
    pub message: String,
}

/// One outward unit of the translated stream.
///
/// Frames are self-contained: a transcript is rebuilt by concatenating
/// `Delta::text` in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkFrame {
    Start { id: String, model: String, created_at: i64 },
    Delta { id: String, model: String, created_at: i64, text: String },
    End { id: String, model: String, created_at: i64, reason: String },
    Error { message: String },
}

//! Protocol definitions for both sides of the translator.
//!
//! - OpenAI (`chat.completion.chunk` SSE frames, client-facing)
//! - Ollama (`/api/chat` line-delimited JSON, backend-facing)

pub mod ollama;
pub mod openai;

pub use ollama::{OllamaChatChunk, OllamaChatRequest, OllamaMessage};
pub use openai::{ChatCompletionChunk, ChunkChoice, ChunkDelta, ChunkFrame, StreamErrorPayload};

//! Ollama line-delimited JSON → OpenAI `chat.completion.chunk` SSE.

pub mod codec;
pub mod line_buffer;
pub mod pump;

pub use codec::BackendEvent;
pub use line_buffer::LineReassembler;
pub use pump::{build_sse_response, SessionOutcome, SessionReport, StreamPump};

pub mod ollama;

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use chatbridge_types::protocol::OllamaChatRequest;
use chatbridge_types::ProxyError;
use futures::Stream;

pub use ollama::{OllamaClient, PassthroughReply};

/// Raw response body of a streaming backend, fragment by fragment.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, ProxyError>> + Send>>;

/// A backend that answers a chat request with newline-separated JSON.
#[async_trait]
pub trait LineDelimitedBackend: Send + Sync {
    /// Provider id used in logs and error attribution.
    fn provider(&self) -> &str;

    /// Open the streaming chat call. A non-success status is an error carrying
    /// the response body text.
    async fn open_chat_stream(
        &self,
        request: &OllamaChatRequest,
    ) -> Result<ByteStream, ProxyError>;
}

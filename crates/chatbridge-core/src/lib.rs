//! # chatbridge Core
//!
//! Streaming protocol translator between chat-completion backends and an
//! OpenAI-compatible `chat.completion.chunk` SSE stream.
//!
//! ## Architecture
//!
//! ```text
//! chatbridge-core/src/
//! ├── modules/config.rs          # Config file + env overrides
//! └── proxy/
//!     ├── gate.rs                # Request Gate (share-page, provider, model checks)
//!     ├── provider_router.rs     # Provider Router (pump vs. tool-calling builders)
//!     ├── builders.rs            # ResponseBuilder seam for external builders
//!     ├── registry.rs            # Enabled / line-delimited provider sets
//!     ├── mappers/ollama/        # Frame codec, line reassembler, stream pump
//!     ├── upstream/              # Ollama HTTP client
//!     ├── handlers/              # axum handlers
//!     └── server.rs              # AppState + router
//! ```

#![allow(clippy::map_err_ignore, reason = "Error context is provided in the replacement message")]
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::print_stdout,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::assertions_on_result_states
    )
)]

pub mod error;
pub mod modules;
pub mod proxy;

// Re-export commonly used types
pub use chatbridge_types::{BridgeConfig, ChatMessage, ChatRole, ModelDescriptor, ToolCallType};
pub use error::{AppError, AppResult};

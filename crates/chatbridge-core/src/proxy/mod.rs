//! Proxy module - chat streaming translator service
//!
//! Request flow:
//!
//! ```text
//! POST /api/chat ─► gate ─► provider_router ─┬─► StreamPump (line-delimited backends)
//!                                            ├─► native tool-calling builder
//!                                            └─► manual tool-calling builder
//! ```

pub mod builders;
pub mod common;
pub mod gate;
pub mod handlers;
pub mod mappers;
pub mod provider_router;
pub mod registry;
pub mod server;
pub mod upstream;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use builders::{ResponseBuilder, UnconfiguredBuilder};
pub use gate::{ChatRequest, RequestContext};
pub use mappers::ollama::{LineReassembler, StreamPump};
pub use provider_router::{ProviderRouter, Route};
pub use registry::ProviderRegistry;
pub use server::{build_proxy_router, AppState, AxumServer};
pub use upstream::{LineDelimitedBackend, OllamaClient};

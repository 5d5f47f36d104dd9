//! Proxy-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while serving a chat request.
///
/// `Forbidden` and `NotFound` are detected before any stream opens and become
/// plain HTTP errors. Everything raised after the SSE headers are committed is
/// reported in-band as an error frame instead.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ProxyError {
    /// Request came from a read-only rendering context
    #[error("{reason}")]
    Forbidden { reason: String },

    /// Provider or model is disabled
    #[error("Selected provider is not enabled {provider_id}")]
    NotFound { provider_id: String },

    /// Connection failure or non-success status from the backend
    #[error("{message}")]
    UpstreamUnavailable { provider: String, message: String },

    /// One upstream line could not be decoded; never aborts a session
    #[error("Skipped undecodable line: {raw}")]
    DecodeSkip { raw: String },

    /// Client went away; triggers cleanup, never reported to the client
    #[error("Client disconnected")]
    SinkClosed,

    /// Anything else
    #[error("{message}")]
    Unhandled { message: String },
}

impl ProxyError {
    /// Shorthand for an upstream failure attributed to `provider`.
    pub fn upstream(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable { provider: provider.into(), message: message.into() }
    }

    /// Whether this error ends the stream session it occurs in.
    pub fn is_fatal_to_stream(&self) -> bool {
        !matches!(self, Self::DecodeSkip { .. })
    }

    /// Check if this error is caught before any streaming begins.
    pub fn is_pre_stream(&self) -> bool {
        matches!(self, Self::Forbidden { .. } | Self::NotFound { .. })
    }

    /// Get HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Forbidden { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::UpstreamUnavailable { .. } => 502,
            Self::DecodeSkip { .. } => 400,
            Self::SinkClosed => 499,
            Self::Unhandled { .. } => 500,
        }
    }
}

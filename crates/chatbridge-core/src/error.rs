//! Unified error types for chatbridge Core.

use serde::Serialize;
use thiserror::Error;

/// Main error type for all chatbridge operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    /// Network request failed (HTTP client).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

/// Result type alias for chatbridge operations.
pub type AppResult<T> = Result<T, AppError>;

//! Configuration-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// Config file exists but could not be read
    #[error("Config read error at {path}: {message}")]
    Io {
        /// Filesystem path that failed
        path: String,
        /// Description of the IO failure
        message: String,
    },

    /// Config file is not valid JSON for the expected shape
    #[error("Config parse error: {message}")]
    Parse {
        /// Description of the parse failure
        message: String,
    },

    /// Config validation error (invalid values)
    #[error("Config validation error for {field}: {message}")]
    Invalid {
        /// Name of the field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },
}

impl ConfigError {
    /// Create a parse error from a serde_json error.
    pub fn from_json_error(e: &serde_json::Error) -> Self {
        Self::Parse { message: e.to_string() }
    }

    /// Create a read error from an IO error.
    pub fn from_io_error(path: &std::path::Path, e: &std::io::Error) -> Self {
        Self::Io { path: path.display().to_string(), message: e.to_string() }
    }
}

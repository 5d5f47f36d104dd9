use std::time::Duration;

use chatbridge_types::ConfigError;

/// Build the shared HTTP client for backend calls.
///
/// Only connecting is bounded: streamed completions stay open for as long as
/// the backend keeps generating.
pub fn build_http_client(connect_timeout_secs: u64) -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(connect_timeout_secs.max(1)))
        .tcp_nodelay(true)
        .build()
        .map_err(|e| ConfigError::Invalid {
            field: "http_client".to_string(),
            message: format!("Failed to build HTTP client: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_with_zero_timeout() {
        assert!(build_http_client(0).is_ok());
    }
}

use std::collections::HashSet;

use chatbridge_types::ProvidersConfig;

/// Static provider metadata consulted by the gate and the router.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    enabled: HashSet<String>,
    line_delimited: HashSet<String>,
}

impl ProviderRegistry {
    pub fn from_config(config: &ProvidersConfig) -> Self {
        Self {
            enabled: config.enabled.iter().cloned().collect(),
            line_delimited: config.line_delimited.iter().cloned().collect(),
        }
    }

    pub fn is_provider_enabled(&self, provider_id: &str) -> bool {
        self.enabled.contains(provider_id)
    }

    /// Whether the provider streams newline-separated JSON instead of SSE.
    pub fn is_line_delimited(&self, provider_id: &str) -> bool {
        self.line_delimited.contains(provider_id)
    }
}

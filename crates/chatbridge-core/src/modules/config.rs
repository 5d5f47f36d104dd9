use std::fs;
use std::path::{Path, PathBuf};

use chatbridge_types::{BridgeConfig, ConfigError, ModelDescriptor};
use validator::Validate;

const DATA_DIR: &str = ".chatbridge";
const CONFIG_FILE: &str = "config.json";

/// Get the data directory path (`$CHATBRIDGE_DATA_DIR` or `~/.chatbridge`).
pub fn get_data_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(dir) = std::env::var("CHATBRIDGE_DATA_DIR") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = dirs::home_dir().ok_or_else(|| ConfigError::Io {
        path: "~".to_string(),
        message: "Cannot get home directory".to_string(),
    })?;
    Ok(home.join(DATA_DIR))
}

/// Load configuration.
///
/// Reads `path`, or `<data_dir>/config.json` when none is given. A missing
/// file yields defaults. Environment overrides are applied last, then the
/// result is validated.
pub fn load_config(path: Option<&Path>) -> Result<BridgeConfig, ConfigError> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => get_data_dir()?.join(CONFIG_FILE),
    };

    let config = read_config_file(&config_path)?;
    let config = apply_env_overrides(config, |key| std::env::var(key).ok());
    validate_config(&config)?;

    tracing::debug!(
        "Loaded config: bind={}, ollama={}, enabled providers={:?}",
        config.server.socket_addr(),
        config.ollama.base_url,
        config.providers.enabled
    );
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<BridgeConfig, ConfigError> {
    if !path.exists() {
        tracing::info!("No config file at {}, using defaults", path.display());
        return Ok(BridgeConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::from_io_error(path, &e))?;
    serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))
}

/// Apply `OLLAMA_API_URL` and `CHATBRIDGE_ENABLED_PROVIDERS` on top of `config`.
pub fn apply_env_overrides<F>(mut config: BridgeConfig, lookup: F) -> BridgeConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup("OLLAMA_API_URL") {
        let base = raw.trim().trim_end_matches('/').to_string();
        if base.is_empty() {
            tracing::warn!("OLLAMA_API_URL is empty, keeping {}", config.ollama.base_url);
        } else if url::Url::parse(&base).is_err() {
            tracing::warn!("OLLAMA_API_URL is not a valid URL, keeping {}", config.ollama.base_url);
        } else {
            config.ollama.base_url = base;
        }
    }

    if let Some(raw) = lookup("CHATBRIDGE_ENABLED_PROVIDERS") {
        config.providers.enabled = raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
    }

    config.ollama.base_url = config.ollama.base_url.trim_end_matches('/').to_string();
    config
}

fn validate_config(config: &BridgeConfig) -> Result<(), ConfigError> {
    config.validate().map_err(|errors| {
        let field = errors
            .field_errors()
            .keys()
            .next()
            .map(|k| k.to_string())
            .or_else(|| errors.errors().keys().next().map(|k| k.to_string()))
            .unwrap_or_else(|| "config".to_string());
        ConfigError::Invalid { field, message: errors.to_string() }
    })?;

    // Requests with no usable model cookie fall back to the default model.
    let default_provider = ModelDescriptor::default_model().provider_id;
    if !config.providers.enabled.contains(&default_provider) {
        return Err(ConfigError::Invalid {
            field: "providers.enabled".to_string(),
            message: format!("must include {} (provider of the default model)", default_provider),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = read_config_file(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_reads_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"ollama":{"base_url":"http://gpu-box:11434"}}"#).unwrap();

        let config = read_config_file(&path).unwrap();
        assert_eq!(config.ollama.base_url, "http://gpu-box:11434");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_config_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_overrides_base_url_and_trims_slash() {
        let config = apply_env_overrides(
            BridgeConfig::default(),
            env(&[("OLLAMA_API_URL", "http://10.0.0.5:11434/")]),
        );
        assert_eq!(config.ollama.base_url, "http://10.0.0.5:11434");
    }

    #[test]
    fn test_invalid_env_url_is_ignored() {
        let config =
            apply_env_overrides(BridgeConfig::default(), env(&[("OLLAMA_API_URL", "::nope")]));
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_env_overrides_enabled_providers() {
        let config = apply_env_overrides(
            BridgeConfig::default(),
            env(&[("CHATBRIDGE_ENABLED_PROVIDERS", "ollama, groq ,,")]),
        );
        assert_eq!(config.providers.enabled, vec!["ollama".to_string(), "groq".to_string()]);
    }

    #[test]
    fn test_validation_names_failing_field() {
        let mut config = BridgeConfig::default();
        config.server.stream_buffer = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "server"));
    }

    #[test]
    fn test_default_model_provider_must_stay_enabled() {
        let config = apply_env_overrides(
            BridgeConfig::default(),
            env(&[("CHATBRIDGE_ENABLED_PROVIDERS", "ollama")]),
        );
        let err = validate_config(&config).unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid { ref field, .. } if field == "providers.enabled")
        );
    }

    #[test]
    fn test_file_without_default_provider_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"providers":{"enabled":["ollama"]}}"#).unwrap();

        let config = read_config_file(&path).unwrap();
        let err = validate_config(&config).unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid { ref field, .. } if field == "providers.enabled")
        );
        assert!(err.to_string().contains("openai"));
    }
}

//! Configuration loading
//!
//! Layers, lowest priority first: embedded defaults, `config/local.toml`,
//! an explicit `--config` file, then `GLORPI_` environment variables.

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use glorpi_core::ProviderId;
use glorpi_llm::LlmConfig;
use serde::Deserialize;
use std::path::Path;

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Provider and model used when neither the command line nor the
    /// project picks one
    pub defaults: DefaultsConfig,
    /// Provider credentials and endpoints
    pub llm: LlmConfig,
}

/// Fallback provider and model
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Provider id
    pub provider: Option<String>,
    /// Model id
    pub model: Option<String>,
}

impl DefaultsConfig {
    /// Parsed default provider
    pub fn provider(&self) -> Result<Option<ProviderId>> {
        self.provider
            .as_deref()
            .map(|p| p.parse::<ProviderId>())
            .transpose()
            .context("Invalid defaults.provider in configuration")
    }
}

/// Load configuration from files and environment
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let mut builder = Config::builder()
        // 1. Embedded defaults (always available)
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        // 2. Local overrides (optional)
        .add_source(File::with_name("config/local").required(false));

    // 3. File named on the command line (must exist)
    if let Some(path) = explicit {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        // 4. Environment variables (highest priority)
        // prefix_separator("_") lets GLORPI_LLM__OPENAI__TIMEOUT_SECS work.
        .add_source(
            Environment::with_prefix("GLORPI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_parse() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.defaults.provider.as_deref(), Some("anthropic"));
        assert_eq!(
            config.defaults.model.as_deref(),
            Some(glorpi_core::registry::DEFAULT_MODEL_ID)
        );
        assert_eq!(config.llm.deepseek.timeout_secs, Some(120));
        assert!(config.llm.openai.api_key.is_none());
    }

    #[test]
    fn test_invalid_default_provider() {
        let defaults = DefaultsConfig {
            provider: Some("mistral".to_string()),
            model: None,
        };
        assert!(defaults.provider().is_err());
    }
}

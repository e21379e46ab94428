//! Provider credentials and endpoints
//!
//! [`ProviderConfig`] is what an adapter is built from. [`LlmConfig`] is the
//! deserializable settings tree the application loads; [`LlmConfig::resolve`]
//! fills gaps from the conventional environment variables.

use crate::util::{mask_api_key, non_empty, non_empty_url};
use glorpi_core::ProviderId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// DeepSeek answers slowly under load
pub const DEEPSEEK_TIMEOUT: Duration = Duration::from_secs(120);

/// Resolved configuration for one adapter
#[derive(Clone, PartialEq)]
pub struct ProviderConfig {
    /// API key; `None` leaves the adapter unconfigured
    pub api_key: Option<String>,
    /// Base URL override; `None` uses the adapter default
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

// SECURITY: Custom Debug implementation to mask API key
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_deref().map(mask_api_key))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ProviderConfig {
    /// Configuration with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Configuration without credentials
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Credentials from the provider's conventional environment variables
    #[must_use]
    pub fn from_env(provider: ProviderId) -> Self {
        ProviderSettings::default().resolve(provider)
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// API key, empty string when absent
    #[must_use]
    pub fn api_key_or_empty(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    /// Base URL with trailing slashes removed, or `default`
    #[must_use]
    pub fn base_url_or(&self, default: &str) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
            .to_string()
    }
}

/// Environment variables holding a provider's key, in lookup order
#[must_use]
pub fn api_key_env_vars(provider: ProviderId) -> &'static [&'static str] {
    match provider {
        ProviderId::Anthropic => &["ANTHROPIC_API_KEY"],
        ProviderId::OpenAi => &["OPENAI_API_KEY"],
        ProviderId::Gemini => &["GOOGLE_API_KEY", "GEMINI_API_KEY"],
        ProviderId::DeepSeek => &["DEEPSEEK_API_KEY"],
        ProviderId::OpenAiCompatible => &["CUSTOM_OPENAI_API_KEY"],
    }
}

/// Environment variable overriding a provider's base URL
#[must_use]
pub fn base_url_env_var(provider: ProviderId) -> &'static str {
    match provider {
        ProviderId::Anthropic => "ANTHROPIC_BASE_URL",
        ProviderId::OpenAi => "OPENAI_BASE_URL",
        ProviderId::Gemini => "GEMINI_BASE_URL",
        ProviderId::DeepSeek => "DEEPSEEK_BASE_URL",
        ProviderId::OpenAiCompatible => "CUSTOM_OPENAI_BASE_URL",
    }
}

fn env_value(name: &str) -> Option<String> {
    non_empty(std::env::var(name).ok())
}

/// Settings for one provider as written in configuration files
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// API key; falls back to the environment
    pub api_key: Option<String>,
    /// Base URL; falls back to the environment, then the adapter default
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

// SECURITY: Custom Debug implementation to mask API key
impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_deref().map(mask_api_key))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ProviderSettings {
    /// Resolve into an adapter config, consulting the environment for
    /// anything left unset
    #[must_use]
    pub fn resolve(&self, provider: ProviderId) -> ProviderConfig {
        let api_key = non_empty(self.api_key.clone()).or_else(|| {
            api_key_env_vars(provider)
                .iter()
                .find_map(|name| env_value(name))
        });
        let base_url = non_empty_url(self.base_url.clone())
            .or_else(|| non_empty_url(env_value(base_url_env_var(provider))));
        let timeout = match (self.timeout_secs, provider) {
            (Some(secs), _) => Duration::from_secs(secs),
            (None, ProviderId::DeepSeek) => DEEPSEEK_TIMEOUT,
            (None, _) => DEFAULT_TIMEOUT,
        };
        ProviderConfig {
            api_key,
            base_url,
            timeout,
        }
    }
}

/// Settings for every provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Anthropic
    pub anthropic: ProviderSettings,
    /// OpenAI
    pub openai: ProviderSettings,
    /// Google Gemini
    pub gemini: ProviderSettings,
    /// DeepSeek
    pub deepseek: ProviderSettings,
    /// Custom OpenAI-compatible endpoint
    pub openai_compatible: ProviderSettings,
}

impl LlmConfig {
    /// Settings for one provider
    #[must_use]
    pub fn settings(&self, provider: ProviderId) -> &ProviderSettings {
        match provider {
            ProviderId::Anthropic => &self.anthropic,
            ProviderId::OpenAi => &self.openai,
            ProviderId::Gemini => &self.gemini,
            ProviderId::DeepSeek => &self.deepseek,
            ProviderId::OpenAiCompatible => &self.openai_compatible,
        }
    }

    /// Resolved adapter config for one provider
    #[must_use]
    pub fn resolve(&self, provider: ProviderId) -> ProviderConfig {
        self.settings(provider).resolve(provider)
    }
}

//! Provider registry and dispatch
//!
//! Holds one adapter per provider id. Lookup by an unknown id is the one
//! hard failure in this crate; everything past that point resolves to a
//! [`ProviderResponse`].

use crate::adapter::ProviderAdapter;
use crate::config::LlmConfig;
use crate::error::{Error, Result};
use crate::providers::anthropic::AnthropicAdapter;
use crate::providers::deepseek::DeepSeekAdapter;
use crate::providers::gemini::GeminiAdapter;
use crate::providers::openai::OpenAiAdapter;
use crate::providers::openai_compatible::OpenAiCompatibleAdapter;
use crate::types::{ProviderResponse, SendParams};
use chrono::{DateTime, Utc};
use glorpi_core::ProviderId;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Configured flag for one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatus {
    /// Provider id
    pub id: ProviderId,
    /// Display name
    pub display_name: &'static str,
    /// Whether credentials are present
    pub configured: bool,
}

/// Snapshot of every provider's configuration state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatusReport {
    /// Ids of configured providers
    pub configured: Vec<ProviderId>,
    /// Per-provider detail, in canonical order
    pub providers: Vec<ProviderStatus>,
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
}

/// Adapter lookup table
#[derive(Default)]
pub struct ProviderRegistry {
    adapters: HashMap<ProviderId, Arc<dyn ProviderAdapter>>,
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.registered())
            .finish()
    }
}

impl ProviderRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with all five adapters built from `config`
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Arc::new(AnthropicAdapter::new(
            config.resolve(ProviderId::Anthropic),
        )?));
        registry.register(Arc::new(OpenAiAdapter::new(
            config.resolve(ProviderId::OpenAi),
        )?));
        registry.register(Arc::new(GeminiAdapter::new(
            config.resolve(ProviderId::Gemini),
        )?));
        registry.register(Arc::new(DeepSeekAdapter::new(
            config.resolve(ProviderId::DeepSeek),
        )?));
        registry.register(Arc::new(OpenAiCompatibleAdapter::new(
            config.resolve(ProviderId::OpenAiCompatible),
        )?));

        info!(
            configured = ?registry.configured_providers(),
            "Provider registry initialized"
        );
        Ok(registry)
    }

    /// Registry configured purely from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(&LlmConfig::default())
    }

    /// Add or replace the adapter for its provider id
    pub fn register(&mut self, adapter: Arc<dyn ProviderAdapter>) {
        debug!(provider = %adapter.id(), "Registering adapter");
        self.adapters.insert(adapter.id(), adapter);
    }

    /// Registered ids in canonical order
    #[must_use]
    pub fn registered(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|id| self.adapters.contains_key(id))
            .collect()
    }

    /// Adapter for a typed id
    #[must_use]
    pub fn adapter(&self, provider: ProviderId) -> Option<Arc<dyn ProviderAdapter>> {
        self.adapters.get(&provider).cloned()
    }

    /// Adapter for a provider id string.
    ///
    /// # Errors
    /// [`Error::UnknownProvider`] when the id is not one of the known
    /// providers or has no registered adapter.
    pub fn get_adapter(&self, provider: &str) -> Result<Arc<dyn ProviderAdapter>> {
        let id: ProviderId = provider.parse()?;
        self.adapter(id)
            .ok_or_else(|| Error::UnknownProvider(provider.to_string()))
    }

    /// Ids of providers whose credentials are present
    #[must_use]
    pub fn configured_providers(&self) -> Vec<ProviderId> {
        self.registered()
            .into_iter()
            .filter(|id| self.adapters.get(id).is_some_and(|a| a.is_configured()))
            .collect()
    }

    /// Whether a provider has credentials; unknown ids are unconfigured
    #[must_use]
    pub fn is_provider_configured(&self, provider: &str) -> bool {
        self.get_adapter(provider)
            .map(|adapter| adapter.is_configured())
            .unwrap_or(false)
    }

    /// Configured flag for every registered provider
    #[must_use]
    pub fn status(&self) -> ProviderStatusReport {
        let providers: Vec<ProviderStatus> = self
            .registered()
            .into_iter()
            .filter_map(|id| self.adapters.get(&id))
            .map(|adapter| ProviderStatus {
                id: adapter.id(),
                display_name: adapter.display_name(),
                configured: adapter.is_configured(),
            })
            .collect();

        ProviderStatusReport {
            configured: providers
                .iter()
                .filter(|p| p.configured)
                .map(|p| p.id)
                .collect(),
            providers,
            timestamp: Utc::now(),
        }
    }

    /// Resolve the adapter and send.
    ///
    /// With `mock_unconfigured`, a provider without credentials answers with
    /// [`ProviderResponse::mock`] instead of a not-configured failure.
    ///
    /// # Errors
    /// Only [`Error::UnknownProvider`]; send failures are in the response.
    pub async fn send(
        &self,
        provider: &str,
        params: SendParams,
        mock_unconfigured: bool,
    ) -> Result<ProviderResponse> {
        let adapter = self.get_adapter(provider)?;
        if mock_unconfigured && !adapter.is_configured() {
            debug!(provider = %adapter.id(), "Provider not configured, returning mock response");
            return Ok(ProviderResponse::mock(adapter.id(), &params.messages));
        }
        Ok(adapter.send(params).await)
    }
}

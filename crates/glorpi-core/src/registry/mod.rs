//! Model Registry & Cost Calculator
//!
//! Static, read-only model catalogue plus the cost and context-window
//! arithmetic built on top of it. Lookups for unknown model ids fail soft:
//! they return zeroed results instead of errors.
//!
//! # Module Structure
//!
//! - `catalog`: built-in model entries
//! - `cost`: cost and context-window calculations

mod catalog;
mod cost;

#[cfg(test)]
mod tests;

pub use cost::{calculate_cost, context_window_usage, ContextWindowUsage, CostEstimate};

use crate::knobs::Knob;
use crate::provider::ProviderId;
use serde::Serialize;
use std::collections::HashMap;

/// Static registry entry for a model
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    /// Provider-side model identifier
    pub id: &'static str,
    /// Provider serving the model
    pub provider: ProviderId,
    /// Human readable name
    pub display_name: &'static str,
    /// Context window in tokens
    pub context_window: u32,
    /// USD per 1M input tokens
    pub input_price_per_million: f64,
    /// USD per 1M output tokens
    pub output_price_per_million: f64,
    /// Knobs the model honors
    pub supported_knobs: &'static [Knob],
    /// Capability tags (vision, reasoning, ...)
    pub capabilities: &'static [&'static str],
    /// Default model for its provider
    pub is_default: bool,
}

impl ModelConfig {
    /// Whether the model honors `knob`
    #[must_use]
    pub fn supports(&self, knob: Knob) -> bool {
        self.supported_knobs.contains(&knob)
    }

    /// Whether the model carries a capability tag
    #[must_use]
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// Provider entry in the catalogue
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    /// Provider id
    pub id: ProviderId,
    /// Human readable name
    pub display_name: &'static str,
    /// Whether the provider is offered by default
    pub enabled: bool,
    /// Models served by the provider, in catalogue order
    pub models: Vec<&'static ModelConfig>,
}

/// Immutable index over the built-in catalogue
#[derive(Debug)]
pub struct ModelRegistry {
    models: &'static [ModelConfig],
    by_id: HashMap<&'static str, usize>,
}

/// Model returned by [`ModelRegistry::default_model`]
pub const DEFAULT_MODEL_ID: &str = "claude-sonnet-4-20250514";

lazy_static::lazy_static! {
    static ref BUILTIN: ModelRegistry = ModelRegistry::new(catalog::MODELS);
}

impl ModelRegistry {
    fn new(models: &'static [ModelConfig]) -> Self {
        let by_id = models
            .iter()
            .enumerate()
            .map(|(idx, model)| (model.id, idx))
            .collect();
        Self { models, by_id }
    }

    /// The built-in registry
    #[must_use]
    pub fn builtin() -> &'static ModelRegistry {
        &BUILTIN
    }

    /// Every model, in catalogue order
    #[must_use]
    pub fn models(&self) -> &'static [ModelConfig] {
        self.models
    }

    /// Look up a model by id
    #[must_use]
    pub fn get(&self, model_id: &str) -> Option<&'static ModelConfig> {
        let models = self.models;
        self.by_id.get(model_id).map(|&idx| &models[idx])
    }

    /// Models served by `provider`
    #[must_use]
    pub fn by_provider(&self, provider: ProviderId) -> Vec<&'static ModelConfig> {
        self.models.iter().filter(|m| m.provider == provider).collect()
    }

    /// Application-wide default model
    #[must_use]
    pub fn default_model(&self) -> &'static ModelConfig {
        let models = self.models;
        self.get(DEFAULT_MODEL_ID).unwrap_or(&models[0])
    }

    /// Default model for a provider: the flagged one, else the first listed
    #[must_use]
    pub fn default_for(&self, provider: ProviderId) -> Option<&'static ModelConfig> {
        let models = self.by_provider(provider);
        models
            .iter()
            .find(|m| m.is_default)
            .or_else(|| models.first())
            .copied()
    }

    /// Provider catalogue. OpenAI-compatible endpoints are opt-in and list no
    /// models since any model id may be sent to them.
    #[must_use]
    pub fn providers(&self) -> Vec<ProviderInfo> {
        ProviderId::ALL
            .into_iter()
            .map(|id| {
                let enabled = id != ProviderId::OpenAiCompatible;
                ProviderInfo {
                    id,
                    display_name: id.display_name(),
                    enabled,
                    models: if enabled { self.by_provider(id) } else { Vec::new() },
                }
            })
            .collect()
    }
}

/// Look up a model in the built-in registry
#[must_use]
pub fn get_model(model_id: &str) -> Option<&'static ModelConfig> {
    ModelRegistry::builtin().get(model_id)
}

/// Models served by `provider` in the built-in registry
#[must_use]
pub fn models_by_provider(provider: ProviderId) -> Vec<&'static ModelConfig> {
    ModelRegistry::builtin().by_provider(provider)
}

/// Application-wide default model
#[must_use]
pub fn default_model() -> &'static ModelConfig {
    ModelRegistry::builtin().default_model()
}

/// Default model for a provider
#[must_use]
pub fn default_model_for(provider: ProviderId) -> Option<&'static ModelConfig> {
    ModelRegistry::builtin().default_for(provider)
}

/// Provider catalogue of the built-in registry
#[must_use]
pub fn providers() -> Vec<ProviderInfo> {
    ModelRegistry::builtin().providers()
}

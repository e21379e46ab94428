//! Provider adapter contract

use crate::types::{BuildPayloadParams, ProviderRequest, ProviderResponse, SendParams};
use glorpi_core::{get_model, ModelKnobs, ProviderId};

/// Translation layer between normalized messages/knobs and one provider's
/// wire format.
///
/// `send` never fails: every outcome, including cancellation and missing
/// credentials, comes back as a [`ProviderResponse`].
#[async_trait::async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Provider id
    fn id(&self) -> ProviderId;

    /// Human-readable provider name
    fn display_name(&self) -> &'static str {
        self.id().display_name()
    }

    /// Whether the credentials needed to send are present
    fn is_configured(&self) -> bool;

    /// Build the HTTP request without sending it
    fn build_payload(&self, params: BuildPayloadParams<'_>) -> ProviderRequest;

    /// Send one request and normalize the outcome
    async fn send(&self, params: SendParams) -> ProviderResponse;
}

/// Knobs the model accepts. Models missing from the registry keep them all.
pub(crate) fn effective_knobs(model: &str, knobs: &ModelKnobs) -> ModelKnobs {
    match get_model(model) {
        Some(config) => knobs.retain_supported(config.supported_knobs),
        None => knobs.clone(),
    }
}

//! Custom OpenAI-compatible endpoint
//!
//! Any server speaking chat completions (vLLM, LM Studio, proxies). Unlike
//! the hosted providers it needs both a key and a base URL to be usable.

use super::chat::{build_chat_body, chat_request, parse_chat_response, ChatFeatures};
use crate::adapter::{effective_knobs, ProviderAdapter};
use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::http::{build_client, execute, ErrorDialect};
use crate::types::{BuildPayloadParams, ProviderRequest, ProviderResponse, SendParams};
use glorpi_core::ProviderId;
use reqwest::Client;
use tracing::instrument;

/// Used for payload construction when no base URL is set
pub const FALLBACK_BASE_URL: &str = super::openai::DEFAULT_BASE_URL;

const DIALECT: ErrorDialect = ErrorDialect {
    provider: ProviderId::OpenAiCompatible,
    fallback_message: "API error",
    code_field: "code",
};

/// OpenAI-compatible adapter
pub struct OpenAiCompatibleAdapter {
    client: Client,
    config: ProviderConfig,
}

impl OpenAiCompatibleAdapter {
    /// Create a new adapter
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = build_client(config.timeout)?;
        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ProviderConfig::from_env(ProviderId::OpenAiCompatible))
    }
}

#[async_trait::async_trait]
impl ProviderAdapter for OpenAiCompatibleAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAiCompatible
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some() && self.config.base_url.is_some()
    }

    fn build_payload(&self, params: BuildPayloadParams<'_>) -> ProviderRequest {
        let knobs = effective_knobs(params.model, params.knobs);
        let body = build_chat_body(params, &knobs, ChatFeatures::BASIC);
        chat_request(
            &self.config.base_url_or(FALLBACK_BASE_URL),
            self.config.api_key_or_empty(),
            body,
        )
    }

    #[instrument(skip(self, params), fields(provider = "openai_compatible", model = %params.model))]
    async fn send(&self, params: SendParams) -> ProviderResponse {
        if !self.is_configured() {
            return ProviderResponse::failed(&Error::NotConfigured(
                "Custom OpenAI-compatible endpoint not configured".to_string(),
            ));
        }
        let request = self.build_payload(params.payload_params());
        execute(
            &self.client,
            request,
            DIALECT,
            self.config.api_key_or_empty(),
            &params.cancel,
            parse_chat_response,
        )
        .await
    }
}

//! DeepSeek - OpenAI-compatible API
//!
//! Same wire shape as OpenAI without JSON mode or reasoning effort.

use super::chat::{build_chat_body, chat_request, parse_chat_response, ChatFeatures};
use crate::adapter::{effective_knobs, ProviderAdapter};
use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::http::{build_client, execute, ErrorDialect};
use crate::types::{BuildPayloadParams, ProviderRequest, ProviderResponse, SendParams};
use glorpi_core::ProviderId;
use reqwest::Client;
use tracing::instrument;

/// DeepSeek API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";

const DIALECT: ErrorDialect = ErrorDialect {
    provider: ProviderId::DeepSeek,
    fallback_message: "DeepSeek API error",
    code_field: "code",
};

/// DeepSeek adapter
pub struct DeepSeekAdapter {
    client: Client,
    config: ProviderConfig,
}

impl DeepSeekAdapter {
    /// Create a new adapter
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = build_client(config.timeout)?;
        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ProviderConfig::from_env(ProviderId::DeepSeek))
    }
}

#[async_trait::async_trait]
impl ProviderAdapter for DeepSeekAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::DeepSeek
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn build_payload(&self, params: BuildPayloadParams<'_>) -> ProviderRequest {
        let knobs = effective_knobs(params.model, params.knobs);
        let body = build_chat_body(params, &knobs, ChatFeatures::BASIC);
        chat_request(
            &self.config.base_url_or(DEFAULT_BASE_URL),
            self.config.api_key_or_empty(),
            body,
        )
    }

    #[instrument(skip(self, params), fields(provider = "deepseek", model = %params.model))]
    async fn send(&self, params: SendParams) -> ProviderResponse {
        if !self.is_configured() {
            return ProviderResponse::failed(&Error::NotConfigured(
                "DeepSeek API key not configured".to_string(),
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

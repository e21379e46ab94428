use super::convert::convert_messages;
use super::types::{AnthropicRequest, API_VERSION, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS};
use crate::adapter::{effective_knobs, ProviderAdapter};
use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::http::{build_client, execute, str_at, u32_at, ErrorDialect};
use crate::providers::to_json_body;
use crate::types::{
    BuildPayloadParams, ProviderRequest, ProviderResponse, SendParams, Usage,
};
use glorpi_core::ProviderId;
use reqwest::Client;
use serde_json::Value;
use tracing::instrument;

const DIALECT: ErrorDialect = ErrorDialect {
    provider: ProviderId::Anthropic,
    fallback_message: "Anthropic API error",
    code_field: "type",
};

/// Anthropic Claude adapter
pub struct AnthropicAdapter {
    pub(crate) client: Client,
    pub(crate) config: ProviderConfig,
}

impl AnthropicAdapter {
    /// Create a new adapter
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = build_client(config.timeout)?;
        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ProviderConfig::from_env(ProviderId::Anthropic))
    }
}

/// Completion from a Messages API body
pub(crate) fn parse_response(body: &Value) -> ProviderResponse {
    let input_tokens = u32_at(body, "/usage/input_tokens");
    let output_tokens = u32_at(body, "/usage/output_tokens");
    ProviderResponse::completed(
        str_at(body, "/content/0/text"),
        Usage {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens.saturating_add(output_tokens),
        },
    )
}

#[async_trait::async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn build_payload(&self, params: BuildPayloadParams<'_>) -> ProviderRequest {
        let knobs = effective_knobs(params.model, params.knobs);
        let (system, messages) = convert_messages(params.messages);

        let body = to_json_body(&AnthropicRequest {
            model: params.model,
            messages,
            max_tokens: knobs
                .max_output_tokens
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_TOKENS),
            system,
            temperature: knobs.temperature,
            top_p: knobs.top_p,
        });

        let url = format!("{}/v1/messages", self.config.base_url_or(DEFAULT_BASE_URL));
        ProviderRequest::post(url, body)
            .with_header("x-api-key", self.config.api_key_or_empty())
            .with_header("anthropic-version", API_VERSION)
    }

    #[instrument(skip(self, params), fields(provider = "anthropic", model = %params.model))]
    async fn send(&self, params: SendParams) -> ProviderResponse {
        if !self.is_configured() {
            return ProviderResponse::failed(&Error::NotConfigured(
                "Anthropic API key not configured".to_string(),
            ));
        }
        let request = self.build_payload(params.payload_params());
        execute(
            &self.client,
            request,
            DIALECT,
            self.config.api_key_or_empty(),
            &params.cancel,
            parse_response,
        )
        .await
    }
}

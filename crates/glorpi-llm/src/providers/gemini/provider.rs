use super::convert::convert_messages;
use super::types::{
    GeminiRequest, GenerationConfig, Part, SystemInstruction, DEFAULT_BASE_URL,
    DEFAULT_MAX_OUTPUT_TOKENS,
};
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
    provider: ProviderId::Gemini,
    fallback_message: "Gemini API error",
    code_field: "code",
};

/// Google Gemini adapter
pub struct GeminiAdapter {
    client: Client,
    config: ProviderConfig,
}

impl GeminiAdapter {
    /// Create a new adapter
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = build_client(config.timeout)?;
        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ProviderConfig::from_env(ProviderId::Gemini))
    }
}

/// Completion from a generateContent body
pub(crate) fn parse_response(body: &Value) -> ProviderResponse {
    ProviderResponse::completed(
        str_at(body, "/candidates/0/content/parts/0/text"),
        Usage {
            input_tokens: u32_at(body, "/usageMetadata/promptTokenCount"),
            output_tokens: u32_at(body, "/usageMetadata/candidatesTokenCount"),
            total_tokens: u32_at(body, "/usageMetadata/totalTokenCount"),
        },
    )
}

#[async_trait::async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn build_payload(&self, params: BuildPayloadParams<'_>) -> ProviderRequest {
        let knobs = effective_knobs(params.model, params.knobs);
        let converted = convert_messages(params.messages);

        let body = to_json_body(&GeminiRequest {
            contents: converted.contents,
            system_instruction: converted.system_instruction.map(|text| SystemInstruction {
                parts: vec![Part { text }],
            }),
            generation_config: GenerationConfig {
                max_output_tokens: knobs
                    .max_output_tokens
                    .filter(|n| *n > 0)
                    .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
                temperature: knobs.temperature,
                top_p: knobs.top_p,
            },
        });

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url_or(DEFAULT_BASE_URL),
            params.model,
            self.config.api_key_or_empty()
        );
        ProviderRequest::post(url, body)
    }

    #[instrument(skip(self, params), fields(provider = "gemini", model = %params.model))]
    async fn send(&self, params: SendParams) -> ProviderResponse {
        if !self.is_configured() {
            return ProviderResponse::failed(&Error::NotConfigured(
                "Google API key not configured".to_string(),
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

//! OpenAI - chat completions
//!
//! All messages, system included, travel inline. JSON mode and
//! `reasoning_effort` (o1 family only) are the OpenAI-specific extras.

use super::chat::{build_chat_body, chat_request, parse_chat_response, ChatFeatures};
use crate::adapter::{effective_knobs, ProviderAdapter};
use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::http::{build_client, execute, ErrorDialect};
use crate::types::{BuildPayloadParams, ProviderRequest, ProviderResponse, SendParams};
use glorpi_core::ProviderId;
use reqwest::Client;
use tracing::instrument;

/// OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const DIALECT: ErrorDialect = ErrorDialect {
    provider: ProviderId::OpenAi,
    fallback_message: "OpenAI API error",
    code_field: "code",
};

/// OpenAI adapter
pub struct OpenAiAdapter {
    client: Client,
    config: ProviderConfig,
}

impl OpenAiAdapter {
    /// Create a new adapter
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = build_client(config.timeout)?;
        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ProviderConfig::from_env(ProviderId::OpenAi))
    }

    fn base_url(&self) -> String {
        self.config.base_url_or(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn build_payload(&self, params: BuildPayloadParams<'_>) -> ProviderRequest {
        let knobs = effective_knobs(params.model, params.knobs);
        let body = build_chat_body(params, &knobs, ChatFeatures::OPENAI);
        chat_request(&self.base_url(), self.config.api_key_or_empty(), body)
    }

    #[instrument(skip(self, params), fields(provider = "openai", model = %params.model))]
    async fn send(&self, params: SendParams) -> ProviderResponse {
        if !self.is_configured() {
            return ProviderResponse::failed(&Error::NotConfigured(
                "OpenAI API key not configured".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use glorpi_core::{Message, ModelKnobs, ReasoningEffort, ResponseFormat};

    fn adapter() -> OpenAiAdapter {
        OpenAiAdapter::new(ProviderConfig::new("sk-test-1234567890")).unwrap()
    }

    #[test]
    fn test_system_message_stays_inline() {
        let messages = vec![Message::system("S"), Message::user("U")];
        let knobs = ModelKnobs::default();
        let request = adapter().build_payload(BuildPayloadParams {
            model: "gpt-4o",
            messages: &messages,
            knobs: &knobs,
        });

        assert_eq!(request.url, "https://api.openai.com/v1/chat/completions");
        assert_eq!(request.method, "POST");
        assert_eq!(request.header("authorization"), Some("Bearer sk-test-1234567890"));
        let sent = request.body["messages"].as_array().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0]["role"], "system");
        assert_eq!(sent[1]["content"], "U");
    }

    #[test]
    fn test_json_mode_on_supported_model() {
        let messages = vec![Message::user("U")];
        let knobs = ModelKnobs::new()
            .with_response_format(ResponseFormat::Json)
            .with_max_output_tokens(256)
            .with_top_p(0.9);
        let request = adapter().build_payload(BuildPayloadParams {
            model: "gpt-4o-mini",
            messages: &messages,
            knobs: &knobs,
        });

        assert_eq!(request.body["response_format"]["type"], "json_object");
        assert_eq!(request.body["max_tokens"], 256);
        assert_eq!(request.body["top_p"], 0.9);
    }

    #[test]
    fn test_reasoning_model_drops_sampling_knobs() {
        let messages = vec![Message::user("U")];
        let knobs = ModelKnobs::new()
            .with_temperature(0.7)
            .with_reasoning_effort(ReasoningEffort::High);
        let request = adapter().build_payload(BuildPayloadParams {
            model: "o1",
            messages: &messages,
            knobs: &knobs,
        });

        assert!(request.body.get("temperature").is_none());
        assert_eq!(request.body["reasoning_effort"], "high");
    }

    #[test]
    fn test_configured_needs_key() {
        assert!(adapter().is_configured());
        let unconfigured = OpenAiAdapter::new(ProviderConfig::unconfigured()).unwrap();
        assert!(!unconfigured.is_configured());
        assert_eq!(unconfigured.display_name(), "OpenAI");
    }

    #[tokio::test]
    async fn test_send_unconfigured_fails_without_network() {
        let unconfigured = OpenAiAdapter::new(ProviderConfig::unconfigured()).unwrap();
        let response = unconfigured
            .send(SendParams::new("gpt-4o", vec![Message::user("hi")]))
            .await;
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("OpenAI API key not configured"));
        assert_eq!(response.error_kind, Some(crate::ErrorKind::NotConfigured));
    }
}

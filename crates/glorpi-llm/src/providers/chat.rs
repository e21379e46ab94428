//! OpenAI chat-completions wire shape
//!
//! Shared by OpenAI, DeepSeek and any OpenAI-compatible endpoint: messages go
//! inline (system included) and auth is a Bearer token.

use super::to_json_body;
use crate::http::{str_at, u32_at};
use crate::types::{BuildPayloadParams, ProviderRequest, ProviderResponse, Usage};
use glorpi_core::{Message, ModelKnobs, ResponseFormat};
use serde::Serialize;
use serde_json::Value;

/// Optional request fields a given provider understands
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ChatFeatures {
    /// `response_format: {type: "json_object"}`
    pub json_mode: bool,
    /// `reasoning_effort` for o1-family models
    pub reasoning_effort: bool,
}

impl ChatFeatures {
    /// Full OpenAI feature set
    pub(crate) const OPENAI: Self = Self {
        json_mode: true,
        reasoning_effort: true,
    };

    /// Plain chat completions
    pub(crate) const BASIC: Self = Self {
        json_mode: false,
        reasoning_effort: false,
    };
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ChatResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct ChatResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Chat-completions body for already-gated knobs
pub(crate) fn build_chat_body(
    params: BuildPayloadParams<'_>,
    knobs: &ModelKnobs,
    features: ChatFeatures,
) -> Value {
    let json_mode =
        features.json_mode && knobs.response_format == Some(ResponseFormat::Json);
    let reasoning_effort = knobs
        .reasoning_effort
        .filter(|_| features.reasoning_effort && params.model.starts_with("o1"))
        .map(|effort| effort.as_str());

    to_json_body(&ChatRequest {
        model: params.model,
        messages: params.messages,
        max_tokens: knobs.max_output_tokens.filter(|n| *n > 0),
        temperature: knobs.temperature,
        top_p: knobs.top_p,
        response_format: json_mode.then_some(ChatResponseFormat {
            kind: "json_object",
        }),
        reasoning_effort,
    })
}

/// POST `{base}/chat/completions` with Bearer auth
pub(crate) fn chat_request(base_url: &str, api_key: &str, body: Value) -> ProviderRequest {
    ProviderRequest::post(format!("{base_url}/chat/completions"), body)
        .with_header("Authorization", format!("Bearer {api_key}"))
}

/// Completion from a chat-completions body
pub(crate) fn parse_chat_response(body: &Value) -> ProviderResponse {
    let usage = Usage {
        input_tokens: u32_at(body, "/usage/prompt_tokens"),
        output_tokens: u32_at(body, "/usage/completion_tokens"),
        total_tokens: u32_at(body, "/usage/total_tokens"),
    };
    ProviderResponse::completed(str_at(body, "/choices/0/message/content"), usage)
}

//! Request and response types shared by every adapter

use crate::error::{Error, ErrorKind};
use crate::util::{mask_api_key, mask_url_key};
use glorpi_core::{Message, ModelKnobs, ProviderId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tokio_util::sync::CancellationToken;

/// Headers whose values are credentials
const SECRET_HEADERS: &[&str] = &["authorization", "x-api-key", "x-goog-api-key"];

/// Input to [`crate::ProviderAdapter::build_payload`]
#[derive(Debug, Clone, Copy)]
pub struct BuildPayloadParams<'a> {
    /// Provider-side model id
    pub model: &'a str,
    /// Normalized conversation
    pub messages: &'a [Message],
    /// Generation parameters; every field optional
    pub knobs: &'a ModelKnobs,
}

/// Input to [`crate::ProviderAdapter::send`]
#[derive(Debug, Clone)]
pub struct SendParams {
    /// Provider-side model id
    pub model: String,
    /// Normalized conversation
    pub messages: Vec<Message>,
    /// Generation parameters
    pub knobs: ModelKnobs,
    /// Cooperative cancellation signal
    pub cancel: CancellationToken,
}

impl SendParams {
    /// Params with empty knobs and a fresh (never cancelled) token
    #[must_use]
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            knobs: ModelKnobs::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Set the knobs
    #[must_use]
    pub fn with_knobs(mut self, knobs: ModelKnobs) -> Self {
        self.knobs = knobs;
        self
    }

    /// Use a caller-owned cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Borrow as payload params
    #[must_use]
    pub fn payload_params(&self) -> BuildPayloadParams<'_> {
        BuildPayloadParams {
            model: &self.model,
            messages: &self.messages,
            knobs: &self.knobs,
        }
    }
}

/// A fully built HTTP request, ready to send
#[derive(Clone, PartialEq, Serialize)]
pub struct ProviderRequest {
    /// Absolute URL (may embed a `key=` query parameter)
    pub url: String,
    /// HTTP method
    pub method: String,
    /// Request headers
    pub headers: BTreeMap<String, String>,
    /// JSON body
    pub body: serde_json::Value,
}

impl ProviderRequest {
    /// JSON POST request
    #[must_use]
    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            url: url.into(),
            method: "POST".to_string(),
            headers,
            body,
        }
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_string(), value.into());
        self
    }

    /// Header value by case-insensitive name
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Copy with credentials masked, for display
    #[must_use]
    pub fn redacted(&self) -> Self {
        let headers = self
            .headers
            .iter()
            .map(|(name, value)| {
                let value = if SECRET_HEADERS.contains(&name.to_ascii_lowercase().as_str()) {
                    mask_header_value(value)
                } else {
                    value.clone()
                };
                (name.clone(), value)
            })
            .collect();
        Self {
            url: mask_url_key(&self.url),
            method: self.method.clone(),
            headers,
            body: self.body.clone(),
        }
    }
}

fn mask_header_value(value: &str) -> String {
    match value.strip_prefix("Bearer ") {
        Some(token) => format!("Bearer {}", mask_api_key(token)),
        None => mask_api_key(value),
    }
}

// SECURITY: Custom Debug implementation to mask credentials
impl fmt::Debug for ProviderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = self.redacted();
        f.debug_struct("ProviderRequest")
            .field("url", &redacted.url)
            .field("method", &redacted.method)
            .field("headers", &redacted.headers)
            .field("body", &redacted.body)
            .finish()
    }
}

/// Token usage reported by a provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    /// Prompt tokens
    pub input_tokens: u32,
    /// Completion tokens
    pub output_tokens: u32,
    /// Total as reported (or summed when the provider omits it)
    pub total_tokens: u32,
}

/// Normalized outcome of a send. Every failure is a value, never a panic or
/// a propagated error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResponse {
    /// Whether the provider returned a completion
    pub success: bool,
    /// Completion text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Token usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// Failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Provider error code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// HTTP status, when a response arrived
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Wall time of the HTTP exchange
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    /// Simulated response for an unconfigured provider
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub mock: bool,
    /// Raw provider body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

impl ProviderResponse {
    /// Successful completion
    #[must_use]
    pub fn completed(content: impl Into<String>, usage: Usage) -> Self {
        Self {
            success: true,
            content: Some(content.into()),
            usage: Some(usage),
            ..Default::default()
        }
    }

    /// Failure built from an error
    #[must_use]
    pub fn failed(err: &Error) -> Self {
        let (error_code, status) = match err {
            Error::Api { code, status, .. } => (Some(code.clone()), Some(*status)),
            _ => (None, None),
        };
        Self {
            success: false,
            error: Some(err.user_message()),
            error_kind: Some(err.kind()),
            error_code,
            status,
            ..Default::default()
        }
    }

    /// Simulated success for a provider without credentials
    #[must_use]
    pub fn mock(provider: ProviderId, messages: &[Message]) -> Self {
        let serialized_len = serde_json::to_string(messages)
            .map(|s| s.encode_utf16().count())
            .unwrap_or_default();
        let input_tokens = u32::try_from(serialized_len.div_ceil(4)).unwrap_or(u32::MAX);
        let output_tokens = 50;
        let content = format!(
            "[Mock Response - {provider} not configured]\n\nThis is a simulated response. To get real responses, configure your {} API key.\n\nYour prompt was received with {} message(s).",
            provider.as_str().to_uppercase(),
            messages.len()
        );
        Self {
            mock: true,
            ..Self::completed(
                content,
                Usage {
                    input_tokens,
                    output_tokens,
                    total_tokens: input_tokens.saturating_add(output_tokens),
                },
            )
        }
    }

    /// Attach the measured latency
    #[must_use]
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }

    /// Attach the raw provider body
    #[must_use]
    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = Some(raw);
        self
    }

    /// Whether the caller cancelled the request
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.error_kind == Some(ErrorKind::Cancelled)
    }
}

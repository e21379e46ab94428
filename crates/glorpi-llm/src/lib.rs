//! Glorpi LLM - provider adapters and dispatch
//!
//! This crate turns normalized messages and knobs into provider requests:
//! - Adapter: the `ProviderAdapter` contract
//! - Anthropic: Claude Messages API
//! - OpenAI: chat completions with JSON mode and reasoning effort
//! - Gemini: generateContent with role merging
//! - DeepSeek: OpenAI-compatible, low cost
//! - OpenAI-compatible: any custom chat-completions endpoint
//! - Registry: adapter lookup, provider status, mock responses
//!
//! Sending never returns an error. Failures, including cancellation, come
//! back as a `ProviderResponse` with `success == false`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod adapter;
pub mod config;
pub mod error;
pub(crate) mod http;
pub mod providers;
pub mod registry;
pub mod types;
pub mod util;

pub use adapter::ProviderAdapter;
pub use config::{LlmConfig, ProviderConfig, ProviderSettings};
pub use error::{Error, ErrorKind, Result};
pub use registry::{ProviderRegistry, ProviderStatus, ProviderStatusReport};
pub use types::{
    BuildPayloadParams, ProviderRequest, ProviderResponse, SendParams, Usage,
};

// Re-export adapters
pub use providers::anthropic::AnthropicAdapter;
pub use providers::deepseek::DeepSeekAdapter;
pub use providers::gemini::GeminiAdapter;
pub use providers::openai::OpenAiAdapter;
pub use providers::openai_compatible::OpenAiCompatibleAdapter;

// Cancellation handle callers pass through `SendParams`
pub use tokio_util::sync::CancellationToken;

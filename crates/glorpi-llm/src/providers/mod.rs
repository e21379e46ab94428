//! Provider adapter implementations

/// Anthropic provider
pub mod anthropic;
/// OpenAI chat-completions shape shared by several providers
pub(crate) mod chat;
/// DeepSeek provider
pub mod deepseek;
/// Google Gemini provider
pub mod gemini;
/// OpenAI provider
pub mod openai;
/// Custom OpenAI-compatible endpoint
pub mod openai_compatible;

use serde::Serialize;
use serde_json::Value;

/// Serialize a request body. Wire types are plain data, so this cannot fail
/// in practice; a failure degrades to `null` rather than a panic.
pub(crate) fn to_json_body<T: Serialize>(payload: &T) -> Value {
    serde_json::to_value(payload).unwrap_or(Value::Null)
}

//! Anthropic - Claude Messages API
//!
//! The system prompt lives in a top-level `system` field and `max_tokens`
//! is mandatory.

/// Message conversion
pub(crate) mod convert;
/// Adapter implementation
pub mod provider;
/// Wire types
pub(crate) mod types;

#[cfg(test)]
mod tests;

pub use provider::AnthropicAdapter;
pub use types::{API_VERSION, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS};

//! Google Gemini - generateContent API
//!
//! Roles become `user`/`model`, the system prompt travels as
//! `systemInstruction` and the API key goes in the query string.

/// Message conversion
pub(crate) mod convert;
/// Adapter implementation
pub mod provider;
/// Wire types
pub(crate) mod types;

#[cfg(test)]
mod tests;

pub use provider::GeminiAdapter;
pub use types::{DEFAULT_BASE_URL, DEFAULT_MAX_OUTPUT_TOKENS};

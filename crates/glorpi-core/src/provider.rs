//! Provider identifiers
//!
//! The fixed set of LLM providers the studio can talk to, together with the
//! per-provider constants the estimator relies on.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a supported LLM provider
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// Anthropic (Claude)
    #[default]
    Anthropic,
    /// OpenAI (GPT, o-series)
    #[serde(rename = "openai")]
    OpenAi,
    /// Google Gemini
    Gemini,
    /// DeepSeek
    #[serde(rename = "deepseek")]
    DeepSeek,
    /// Any endpoint speaking the OpenAI chat-completions dialect
    #[serde(rename = "openai_compatible")]
    OpenAiCompatible,
}

impl ProviderId {
    /// All providers, in display order
    pub const ALL: [ProviderId; 5] = [
        ProviderId::Anthropic,
        ProviderId::OpenAi,
        ProviderId::Gemini,
        ProviderId::DeepSeek,
        ProviderId::OpenAiCompatible,
    ];

    /// Wire identifier (`"anthropic"`, `"openai_compatible"`, ...)
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::DeepSeek => "deepseek",
            Self::OpenAiCompatible => "openai_compatible",
        }
    }

    /// Human-readable provider name
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Anthropic => "Anthropic",
            Self::OpenAi => "OpenAI",
            Self::Gemini => "Google Gemini",
            Self::DeepSeek => "DeepSeek",
            Self::OpenAiCompatible => "OpenAI Compatible",
        }
    }

    /// Average characters per token observed for this provider's tokenizer family
    #[must_use]
    pub fn chars_per_token(&self) -> f64 {
        match self {
            Self::Anthropic => 3.5,
            Self::OpenAi | Self::Gemini | Self::OpenAiCompatible => 4.0,
            Self::DeepSeek => 3.8,
        }
    }

    /// Tokens charged for wrapping a single message on the wire
    #[must_use]
    pub fn message_overhead(&self) -> u32 {
        match self {
            Self::Gemini => 3,
            _ => 4,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Error::UnknownProvider(s.to_string()))
    }
}

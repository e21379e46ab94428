//! Heuristic token estimation
//!
//! No tokenizer is involved. Counts are derived from character length using a
//! per-provider density constant, then nudged by a few additive corrections
//! for characters that tend to tokenize on their own.

use crate::block::PromptBlock;
use crate::message::Message;
use crate::provider::ProviderId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

lazy_static::lazy_static! {
    static ref SPECIAL_CHAR: Regex = Regex::new(r#"[{}\[\]().,;:!?@#$%^&*+=<>"/\\|`~-]"#)
        .expect("special character pattern is a compile-time constant");
    static ref CODE_FENCE: Regex = Regex::new(r"(?s)```.*?```")
        .expect("code fence pattern is a compile-time constant");
    static ref DIGIT_RUN: Regex = Regex::new(r"[0-9]+")
        .expect("digit pattern is a compile-time constant");
    static ref WHITESPACE: Regex = Regex::new(r"\s")
        .expect("whitespace pattern is a compile-time constant");
}

/// Extra tokens per punctuation/operator character
const SPECIAL_CHAR_WEIGHT: f64 = 0.3;
/// Extra tokens per fenced code block
const CODE_FENCE_WEIGHT: f64 = 3.0;
/// Extra tokens per digit run
const DIGIT_RUN_WEIGHT: f64 = 0.2;
/// Whitespace fraction above which the dense-whitespace discount applies
const WHITESPACE_RATIO_THRESHOLD: f64 = 0.2;
const WHITESPACE_DISCOUNT: f64 = 0.95;

/// Start/end tokens charged once per conversation
const CONVERSATION_OVERHEAD: u32 = 3;
/// Separator tokens charged per enabled block when blocks are combined
const BLOCK_SEPARATOR_TOKENS: u32 = 2;
/// Placeholder ratio of output to input tokens
const DEFAULT_OUTPUT_RATIO: f64 = 0.3;

const MEDIUM_CONFIDENCE_ABOVE: u32 = 10_000;
const LOW_CONFIDENCE_ABOVE: u32 = 50_000;

/// Length as the browser measures it (UTF-16 code units)
pub(crate) fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Estimate tokens for a string
#[must_use]
pub fn estimate_tokens_for_text(text: &str, provider: ProviderId) -> u32 {
    if text.is_empty() {
        return 0;
    }

    let length = text_length(text) as f64;
    let special_chars = SPECIAL_CHAR.find_iter(text).count() as f64;
    let code_blocks = CODE_FENCE.find_iter(text).count() as f64;
    let numbers = DIGIT_RUN.find_iter(text).count() as f64;

    let mut tokens = (length / provider.chars_per_token()).ceil();
    tokens += special_chars * SPECIAL_CHAR_WEIGHT;
    tokens += code_blocks * CODE_FENCE_WEIGHT;
    tokens += numbers * DIGIT_RUN_WEIGHT;

    let whitespace_ratio = WHITESPACE.find_iter(text).count() as f64 / length;
    if whitespace_ratio > WHITESPACE_RATIO_THRESHOLD {
        tokens *= WHITESPACE_DISCOUNT;
    }

    tokens.ceil() as u32
}

/// Estimate tokens for a single message, including role and framing overhead
#[must_use]
pub fn estimate_tokens_for_message(message: &Message, provider: ProviderId) -> u32 {
    estimate_tokens_for_text(&message.content, provider)
        + message.role.marker_tokens()
        + provider.message_overhead()
}

/// Estimate tokens for a whole conversation
#[must_use]
pub fn estimate_tokens_for_messages(messages: &[Message], provider: ProviderId) -> u32 {
    messages
        .iter()
        .map(|m| estimate_tokens_for_message(m, provider))
        .sum::<u32>()
        + CONVERSATION_OVERHEAD
}

/// Estimate tokens for a block; disabled blocks cost nothing
#[must_use]
pub fn estimate_tokens_for_block(block: &PromptBlock, provider: ProviderId) -> u32 {
    if !block.enabled {
        return 0;
    }

    estimate_tokens_for_text(&block.title, provider)
        + estimate_tokens_for_text(&block.content, provider)
        + block.block_type.overhead_tokens()
}

/// How much trust to place in an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Small prompt, heuristic is close
    High,
    /// Over 10k input tokens
    Medium,
    /// Over 50k input tokens
    Low,
}

impl Confidence {
    /// Confidence band for an input size
    #[must_use]
    pub fn for_input_tokens(input_tokens: u32) -> Self {
        if input_tokens > LOW_CONFIDENCE_ABOVE {
            Self::Low
        } else if input_tokens > MEDIUM_CONFIDENCE_ABOVE {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Result of estimating a full prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenEstimate {
    /// Estimated prompt tokens
    pub input_tokens: u32,
    /// Estimated completion tokens
    pub output_tokens: u32,
    /// `input_tokens + output_tokens`
    pub total_tokens: u32,
    /// Confidence band, derived from `input_tokens` only
    pub confidence: Confidence,
    /// Per-block token counts keyed by block id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<BTreeMap<String, u32>>,
}

impl TokenEstimate {
    /// Estimate from an input count using the default output placeholder
    #[must_use]
    pub fn from_input(input_tokens: u32) -> Self {
        let output_tokens = (f64::from(input_tokens) * DEFAULT_OUTPUT_RATIO).ceil() as u32;
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
            confidence: Confidence::for_input_tokens(input_tokens),
            breakdown: None,
        }
    }

    /// Replace the output placeholder with a caller-chosen value
    #[must_use]
    pub fn with_output_tokens(mut self, output_tokens: u32) -> Self {
        self.output_tokens = output_tokens;
        self.total_tokens = self.input_tokens + output_tokens;
        self
    }
}

/// Estimate tokens for an ordered block list
#[must_use]
pub fn estimate_prompt_tokens(blocks: &[PromptBlock], provider: ProviderId) -> TokenEstimate {
    let mut breakdown = BTreeMap::new();
    let mut input_tokens = 0;
    let mut enabled_count = 0;

    for block in blocks.iter().filter(|b| b.enabled) {
        let block_tokens = estimate_tokens_for_block(block, provider);
        breakdown.insert(block.id.clone(), block_tokens);
        input_tokens += block_tokens;
        enabled_count += 1;
    }

    input_tokens += enabled_count * BLOCK_SEPARATOR_TOKENS;

    TokenEstimate {
        breakdown: Some(breakdown),
        ..TokenEstimate::from_input(input_tokens)
    }
}

/// Expected verbosity of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Terse answers
    Minimal,
    /// Typical answers
    Standard,
    /// Long-form answers
    Detailed,
    /// As long as the input
    Comprehensive,
}

impl Verbosity {
    fn output_ratio(self) -> f64 {
        match self {
            Self::Minimal => 0.1,
            Self::Standard => 0.3,
            Self::Detailed => 0.6,
            Self::Comprehensive => 1.0,
        }
    }
}

/// Output estimate for a verbosity preset, clamped to 100..=32000
#[must_use]
pub fn estimate_output_tokens(input_tokens: u32, verbosity: Verbosity) -> u32 {
    let base = f64::from(input_tokens) * verbosity.output_ratio();
    base.clamp(100.0, 32_000.0).ceil() as u32
}

/// Compact display form: `1.5M`, `12.3K`, `950`
#[must_use]
pub fn format_token_count(tokens: u32) -> String {
    if tokens >= 1_000_000 {
        format!("{:.1}M", f64::from(tokens) / 1_000_000.0)
    } else if tokens >= 1_000 {
        format!("{:.1}K", f64::from(tokens) / 1_000.0)
    } else {
        tokens.to_string()
    }
}

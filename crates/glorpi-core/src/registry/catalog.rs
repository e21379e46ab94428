//! Built-in model catalogue
//!
//! Prices are USD per 1M tokens.

use super::ModelConfig;
use crate::knobs::Knob;
use crate::provider::ProviderId;

const CLAUDE_KNOBS: &[Knob] = &[Knob::Temperature, Knob::TopP, Knob::MaxOutputTokens];
const GPT_KNOBS: &[Knob] = &[
    Knob::Temperature,
    Knob::TopP,
    Knob::MaxOutputTokens,
    Knob::ResponseFormat,
];
const REASONING_KNOBS: &[Knob] = &[Knob::MaxOutputTokens, Knob::ReasoningEffort];
const GEMINI_KNOBS: &[Knob] = &[Knob::Temperature, Knob::TopP, Knob::MaxOutputTokens];

pub(super) static MODELS: &[ModelConfig] = &[
    // Anthropic
    ModelConfig {
        id: "claude-sonnet-4-20250514",
        provider: ProviderId::Anthropic,
        display_name: "Claude Sonnet 4",
        context_window: 200_000,
        input_price_per_million: 3.0,
        output_price_per_million: 15.0,
        supported_knobs: CLAUDE_KNOBS,
        capabilities: &["vision", "function_calling", "streaming", "extended_thinking"],
        is_default: true,
    },
    ModelConfig {
        id: "claude-opus-4-20250514",
        provider: ProviderId::Anthropic,
        display_name: "Claude Opus 4",
        context_window: 200_000,
        input_price_per_million: 15.0,
        output_price_per_million: 75.0,
        supported_knobs: CLAUDE_KNOBS,
        capabilities: &["vision", "function_calling", "streaming", "extended_thinking"],
        is_default: false,
    },
    ModelConfig {
        id: "claude-3-5-haiku-20241022",
        provider: ProviderId::Anthropic,
        display_name: "Claude 3.5 Haiku",
        context_window: 200_000,
        input_price_per_million: 0.80,
        output_price_per_million: 4.0,
        supported_knobs: CLAUDE_KNOBS,
        capabilities: &["vision", "function_calling", "streaming"],
        is_default: false,
    },
    // OpenAI
    ModelConfig {
        id: "gpt-4o",
        provider: ProviderId::OpenAi,
        display_name: "GPT-4o",
        context_window: 128_000,
        input_price_per_million: 2.5,
        output_price_per_million: 10.0,
        supported_knobs: GPT_KNOBS,
        capabilities: &["vision", "function_calling", "streaming", "json_mode"],
        is_default: false,
    },
    ModelConfig {
        id: "gpt-4o-mini",
        provider: ProviderId::OpenAi,
        display_name: "GPT-4o Mini",
        context_window: 128_000,
        input_price_per_million: 0.15,
        output_price_per_million: 0.6,
        supported_knobs: GPT_KNOBS,
        capabilities: &["vision", "function_calling", "streaming", "json_mode"],
        is_default: false,
    },
    ModelConfig {
        id: "o1",
        provider: ProviderId::OpenAi,
        display_name: "o1",
        context_window: 200_000,
        input_price_per_million: 15.0,
        output_price_per_million: 60.0,
        supported_knobs: REASONING_KNOBS,
        capabilities: &["reasoning", "streaming", "vision"],
        is_default: false,
    },
    ModelConfig {
        id: "o3-mini",
        provider: ProviderId::OpenAi,
        display_name: "o3-mini",
        context_window: 200_000,
        input_price_per_million: 1.10,
        output_price_per_million: 4.40,
        supported_knobs: REASONING_KNOBS,
        capabilities: &["reasoning", "streaming"],
        is_default: false,
    },
    ModelConfig {
        id: "o1-mini",
        provider: ProviderId::OpenAi,
        display_name: "o1-mini",
        context_window: 128_000,
        input_price_per_million: 1.10,
        output_price_per_million: 4.40,
        supported_knobs: REASONING_KNOBS,
        capabilities: &["reasoning", "streaming"],
        is_default: false,
    },
    // Google Gemini
    ModelConfig {
        id: "gemini-2.5-pro-preview-05-06",
        provider: ProviderId::Gemini,
        display_name: "Gemini 2.5 Pro",
        context_window: 1_000_000,
        input_price_per_million: 1.25,
        output_price_per_million: 10.0,
        supported_knobs: GEMINI_KNOBS,
        capabilities: &["vision", "function_calling", "streaming", "thinking", "long_context"],
        is_default: false,
    },
    ModelConfig {
        id: "gemini-2.0-flash",
        provider: ProviderId::Gemini,
        display_name: "Gemini 2.0 Flash",
        context_window: 1_000_000,
        input_price_per_million: 0.10,
        output_price_per_million: 0.40,
        supported_knobs: GEMINI_KNOBS,
        capabilities: &["vision", "function_calling", "streaming", "thinking"],
        is_default: false,
    },
    ModelConfig {
        id: "gemini-2.0-flash-lite",
        provider: ProviderId::Gemini,
        display_name: "Gemini 2.0 Flash Lite",
        context_window: 1_000_000,
        input_price_per_million: 0.075,
        output_price_per_million: 0.30,
        supported_knobs: GEMINI_KNOBS,
        capabilities: &["vision", "function_calling", "streaming"],
        is_default: false,
    },
    ModelConfig {
        id: "gemini-1.5-pro",
        provider: ProviderId::Gemini,
        display_name: "Gemini 1.5 Pro",
        context_window: 2_000_000,
        input_price_per_million: 1.25,
        output_price_per_million: 5.0,
        supported_knobs: GEMINI_KNOBS,
        capabilities: &["vision", "function_calling", "streaming", "long_context"],
        is_default: false,
    },
    // DeepSeek
    ModelConfig {
        id: "deepseek-chat",
        provider: ProviderId::DeepSeek,
        display_name: "DeepSeek V3",
        context_window: 64_000,
        input_price_per_million: 0.27,
        output_price_per_million: 1.10,
        supported_knobs: &[Knob::Temperature, Knob::TopP, Knob::MaxOutputTokens],
        capabilities: &["function_calling", "streaming"],
        is_default: false,
    },
    ModelConfig {
        id: "deepseek-reasoner",
        provider: ProviderId::DeepSeek,
        display_name: "DeepSeek R1",
        context_window: 64_000,
        input_price_per_million: 0.55,
        output_price_per_million: 2.19,
        supported_knobs: &[Knob::Temperature, Knob::MaxOutputTokens],
        capabilities: &["reasoning", "streaming"],
        is_default: false,
    },
];

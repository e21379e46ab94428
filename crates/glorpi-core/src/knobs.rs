//! Generation parameters ("knobs")
//!
//! Every knob is optional. A model only honors the subset named in its
//! registry entry; adapters drop the rest silently.

use serde::{Deserialize, Serialize};

/// Name of a generation parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Knob {
    /// Sampling temperature (0-2)
    Temperature,
    /// Nucleus sampling (0-1)
    TopP,
    /// Output token cap
    MaxOutputTokens,
    /// Reasoning depth for reasoning models
    ReasoningEffort,
    /// Tool selection policy
    ToolChoice,
    /// Response encoding
    ResponseFormat,
}

impl Knob {
    /// Knob name as used in registry entries
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::TopP => "topP",
            Self::MaxOutputTokens => "maxOutputTokens",
            Self::ReasoningEffort => "reasoningEffort",
            Self::ToolChoice => "toolChoice",
            Self::ResponseFormat => "responseFormat",
        }
    }
}

/// Reasoning effort level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
}

impl ReasoningEffort {
    /// Wire value
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Tool choice strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// Let the model decide
    Auto,
    /// Force a tool call
    Required,
    /// Disable tools
    None,
}

/// Response encoding requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Plain text
    Text,
    /// JSON object
    Json,
    /// Markdown
    Markdown,
}

/// Generation parameters for a single request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelKnobs {
    /// Sampling temperature (0-2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling (0-1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Output token cap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Reasoning effort (reasoning models only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,
    /// Tool choice strategy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
    /// Response encoding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    /// Unrecognized knobs, kept so documents round-trip
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ModelKnobs {
    /// Empty knob set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set top-p
    #[must_use]
    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set max output tokens
    #[must_use]
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Set reasoning effort
    #[must_use]
    pub fn with_reasoning_effort(mut self, effort: ReasoningEffort) -> Self {
        self.reasoning_effort = Some(effort);
        self
    }

    /// Set tool choice
    #[must_use]
    pub fn with_tool_choice(mut self, choice: ToolChoice) -> Self {
        self.tool_choice = Some(choice);
        self
    }

    /// Set response format
    #[must_use]
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    /// Whether a knob carries a value
    #[must_use]
    pub fn is_set(&self, knob: Knob) -> bool {
        match knob {
            Knob::Temperature => self.temperature.is_some(),
            Knob::TopP => self.top_p.is_some(),
            Knob::MaxOutputTokens => self.max_output_tokens.is_some(),
            Knob::ReasoningEffort => self.reasoning_effort.is_some(),
            Knob::ToolChoice => self.tool_choice.is_some(),
            Knob::ResponseFormat => self.response_format.is_some(),
        }
    }

    /// Knobs that carry a value
    #[must_use]
    pub fn set_knobs(&self) -> Vec<Knob> {
        [
            Knob::Temperature,
            Knob::TopP,
            Knob::MaxOutputTokens,
            Knob::ReasoningEffort,
            Knob::ToolChoice,
            Knob::ResponseFormat,
        ]
        .into_iter()
        .filter(|k| self.is_set(*k))
        .collect()
    }

    /// Copy keeping only the knobs listed in `supported`
    #[must_use]
    pub fn retain_supported(&self, supported: &[Knob]) -> Self {
        let keep = |knob: Knob| supported.contains(&knob);
        Self {
            temperature: self.temperature.filter(|_| keep(Knob::Temperature)),
            top_p: self.top_p.filter(|_| keep(Knob::TopP)),
            max_output_tokens: self
                .max_output_tokens
                .filter(|_| keep(Knob::MaxOutputTokens)),
            reasoning_effort: self
                .reasoning_effort
                .filter(|_| keep(Knob::ReasoningEffort)),
            tool_choice: self.tool_choice.filter(|_| keep(Knob::ToolChoice)),
            response_format: self.response_format.filter(|_| keep(Knob::ResponseFormat)),
            extra: serde_json::Map::new(),
        }
    }
}

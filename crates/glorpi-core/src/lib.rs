//! Glorpi Core - prompt studio engine
//!
//! This crate provides the pure, synchronous half of Glorpi:
//! - Block: typed prompt blocks and fix patches
//! - Token: heuristic per-provider token estimation
//! - Registry: static model catalogue, cost and context-window usage
//! - Validation: preflight rules, severities and auto-fixes
//! - Assemble: block list to normalized messages
//! - Project: saved project documents
//!
//! Nothing here performs I/O; every function is safe to call repeatedly
//! from any thread.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assemble;
pub mod block;
pub mod error;
pub mod knobs;
pub mod message;
pub mod project;
pub mod provider;
pub mod registry;
pub mod token;
pub mod validation;

pub use assemble::blocks_to_messages;
pub use block::{BlockPatch, BlockType, PromptBlock};
pub use error::{Error, Result};
pub use knobs::{Knob, ModelKnobs, ReasoningEffort, ResponseFormat, ToolChoice};
pub use message::{Message, MessageRole};
pub use project::Project;
pub use provider::ProviderId;
pub use registry::{
    calculate_cost, context_window_usage, default_model, default_model_for, get_model,
    models_by_provider, providers, ContextWindowUsage, CostEstimate, ModelConfig, ModelRegistry,
    ProviderInfo,
};
pub use token::{
    estimate_output_tokens, estimate_prompt_tokens, estimate_tokens_for_block,
    estimate_tokens_for_message, estimate_tokens_for_messages, estimate_tokens_for_text,
    format_token_count, Confidence, TokenEstimate, Verbosity,
};
pub use validation::{
    apply_fix, get_suggested_fix, is_prompt_valid, validate_prompt, Severity, ValidationIssue,
    ValidationRule, Validator,
};

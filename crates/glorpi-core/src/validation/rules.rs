//! Built-in validation rules
//!
//! Every rule is a pure predicate over the whole block list and reports at
//! most one issue: the first offending block wins.

use super::issue::{Severity, ValidationIssue};
use super::patterns::{BRACE_SPAN, CONFLICT_PAIRS, INJECTION_PATTERNS, LEAKY_PATTERNS};
use crate::block::{BlockType, PromptBlock};
use crate::token::text_length;
use regex::Regex;

/// Oversized-prompt threshold in estimated tokens
const TOKEN_WARNING_THRESHOLD: u64 = 100_000;
/// Characters per token for the oversized-prompt estimate
const TOKEN_WARNING_CHARS_PER_TOKEN: f64 = 3.5;

/// A single independent check
pub trait ValidationRule: Send + Sync {
    /// Stable rule identifier
    fn id(&self) -> &'static str;

    /// Human readable rule name
    fn name(&self) -> &'static str;

    /// Inspect the block list; `None` when the rule is satisfied
    fn check(&self, blocks: &[PromptBlock]) -> Option<ValidationIssue>;
}

fn enabled(blocks: &[PromptBlock]) -> impl Iterator<Item = &PromptBlock> {
    blocks.iter().filter(|b| b.enabled)
}

fn first_match<'a>(
    blocks: &'a [PromptBlock],
    patterns: &[Regex],
) -> Option<&'a PromptBlock> {
    enabled(blocks).find(|b| patterns.iter().any(|p| p.is_match(&b.content)))
}

fn enabled_content(blocks: &[PromptBlock], separator: &str) -> String {
    enabled(blocks)
        .map(|b| b.content.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

fn any_enabled(blocks: &[PromptBlock], pred: impl Fn(&PromptBlock) -> bool) -> bool {
    enabled(blocks).any(pred)
}

/// `1234567` -> `"1,234,567"`
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ============================================================================
// Rules
// ============================================================================

/// Phrases that try to override the system behavior
#[derive(Debug, Default)]
pub struct InjectionRule;

impl ValidationRule for InjectionRule {
    fn id(&self) -> &'static str {
        "injection-check"
    }

    fn name(&self) -> &'static str {
        "Prompt Injection Detection"
    }

    fn check(&self, blocks: &[PromptBlock]) -> Option<ValidationIssue> {
        let block = first_match(blocks, &INJECTION_PATTERNS)?;
        Some(
            ValidationIssue::new(
                format!("injection-{}", block.id),
                Severity::Error,
                "Potential Prompt Injection Detected",
                format!(
                    "Block \"{}\" contains patterns that may indicate prompt injection attempts.",
                    block.title
                ),
            )
            .for_block(&block.id)
            .suggest("Review and remove any instructions that attempt to override system behavior."),
        )
    }
}

/// Content that invites the model to disclose its instructions
#[derive(Debug, Default)]
pub struct LeakySystemRule;

impl ValidationRule for LeakySystemRule {
    fn id(&self) -> &'static str {
        "leaky-system-check"
    }

    fn name(&self) -> &'static str {
        "Leaky System Pattern Detection"
    }

    fn check(&self, blocks: &[PromptBlock]) -> Option<ValidationIssue> {
        let block = first_match(blocks, &LEAKY_PATTERNS)?;
        Some(
            ValidationIssue::new(
                format!("leaky-{}", block.id),
                Severity::Warning,
                "System Prompt Leak Risk",
                format!(
                    "Block \"{}\" may allow extraction of system instructions.",
                    block.title
                ),
            )
            .for_block(&block.id)
            .suggest("Add explicit instructions to refuse requests for system prompt disclosure.")
            .fixable(),
        )
    }
}

/// No enabled system block
#[derive(Debug, Default)]
pub struct MissingSystemRule;

impl ValidationRule for MissingSystemRule {
    fn id(&self) -> &'static str {
        "missing-system"
    }

    fn name(&self) -> &'static str {
        "System Block Check"
    }

    fn check(&self, blocks: &[PromptBlock]) -> Option<ValidationIssue> {
        if any_enabled(blocks, |b| b.block_type == BlockType::System) {
            return None;
        }
        Some(
            ValidationIssue::new(
                "missing-system",
                Severity::Warning,
                "No System Block Defined",
                "Your prompt lacks a system block. This may result in inconsistent model behavior.",
            )
            .suggest("Add a system block to establish base behavior and constraints.")
            .fixable(),
        )
    }
}

/// No goal block and no "your task" phrasing
#[derive(Debug, Default)]
pub struct MissingGoalRule;

impl ValidationRule for MissingGoalRule {
    fn id(&self) -> &'static str {
        "missing-goal"
    }

    fn name(&self) -> &'static str {
        "Goal Block Check"
    }

    fn check(&self, blocks: &[PromptBlock]) -> Option<ValidationIssue> {
        let has_goal = any_enabled(blocks, |b| {
            b.block_type == BlockType::Goal || b.content.to_lowercase().contains("your task")
        });
        if has_goal {
            return None;
        }
        Some(
            ValidationIssue::new(
                "missing-goal",
                Severity::Info,
                "No Clear Goal Defined",
                "Consider adding a dedicated goal block to clarify the intended task.",
            )
            .suggest("Add a goal block with specific objectives.")
            .fixable(),
        )
    }
}

/// Enabled block whose content is blank
#[derive(Debug, Default)]
pub struct EmptyBlockRule;

impl ValidationRule for EmptyBlockRule {
    fn id(&self) -> &'static str {
        "empty-blocks"
    }

    fn name(&self) -> &'static str {
        "Empty Block Check"
    }

    fn check(&self, blocks: &[PromptBlock]) -> Option<ValidationIssue> {
        let block = enabled(blocks).find(|b| b.content.trim().is_empty())?;
        Some(
            ValidationIssue::new(
                format!("empty-{}", block.id),
                Severity::Warning,
                "Empty Block Detected",
                format!("Block \"{}\" is enabled but has no content.", block.title),
            )
            .for_block(&block.id)
            .suggest("Either add content or disable this block."),
        )
    }
}

/// Quoted brace spans that do not parse and are not templates
#[derive(Debug, Default)]
pub struct JsonValidityRule;

impl JsonValidityRule {
    fn is_malformed(span: &str) -> bool {
        let looks_like_json = span.contains('"') || span.contains('\'');
        let is_template = span.contains("{{") || span.contains("${");
        looks_like_json
            && !is_template
            && serde_json::from_str::<serde_json::Value>(span).is_err()
    }
}

impl ValidationRule for JsonValidityRule {
    fn id(&self) -> &'static str {
        "json-validity"
    }

    fn name(&self) -> &'static str {
        "JSON Syntax Check"
    }

    fn check(&self, blocks: &[PromptBlock]) -> Option<ValidationIssue> {
        let block = enabled(blocks).find(|b| {
            BRACE_SPAN
                .find_iter(&b.content)
                .any(|m| Self::is_malformed(m.as_str()))
        })?;
        Some(
            ValidationIssue::new(
                format!("json-{}", block.id),
                Severity::Warning,
                "Potentially Invalid JSON",
                format!(
                    "Block \"{}\" contains JSON-like content that may be malformed.",
                    block.title
                ),
            )
            .for_block(&block.id)
            .suggest("Verify JSON syntax is correct or mark as template with placeholders."),
        )
    }
}

/// Both sides of a contradictory instruction pair present
#[derive(Debug, Default)]
pub struct ConflictingInstructionsRule;

impl ValidationRule for ConflictingInstructionsRule {
    fn id(&self) -> &'static str {
        "conflicting-instructions"
    }

    fn name(&self) -> &'static str {
        "Conflicting Instructions Check"
    }

    fn check(&self, blocks: &[PromptBlock]) -> Option<ValidationIssue> {
        let all_content = enabled_content(blocks, " ");
        if !CONFLICT_PAIRS.iter().any(|pair| pair.matches(&all_content)) {
            return None;
        }
        Some(
            ValidationIssue::new(
                "conflict-detected",
                Severity::Warning,
                "Potentially Conflicting Instructions",
                "Your prompt contains instructions that may conflict with each other.",
            )
            .suggest("Review your blocks for contradictory requirements and resolve ambiguities."),
        )
    }
}

/// Prompt too large for many context windows
#[derive(Debug, Default)]
pub struct TokenLimitRule;

impl ValidationRule for TokenLimitRule {
    fn id(&self) -> &'static str {
        "token-warning"
    }

    fn name(&self) -> &'static str {
        "Token Limit Check"
    }

    fn check(&self, blocks: &[PromptBlock]) -> Option<ValidationIssue> {
        let length = text_length(&enabled_content(blocks, ""));
        let estimated = (length as f64 / TOKEN_WARNING_CHARS_PER_TOKEN).ceil() as u64;
        if estimated <= TOKEN_WARNING_THRESHOLD {
            return None;
        }
        Some(
            ValidationIssue::new(
                "token-warning",
                Severity::Warning,
                "Very Large Prompt",
                format!(
                    "Your prompt is estimated at {} tokens. This may exceed some model limits.",
                    group_thousands(estimated)
                ),
            )
            .suggest("Consider splitting into smaller prompts or removing less critical sections."),
        )
    }
}

/// No output format block and no format phrasing
#[derive(Debug, Default)]
pub struct OutputFormatRule;

impl ValidationRule for OutputFormatRule {
    fn id(&self) -> &'static str {
        "output-format-check"
    }

    fn name(&self) -> &'static str {
        "Output Format Specification"
    }

    fn check(&self, blocks: &[PromptBlock]) -> Option<ValidationIssue> {
        let has_format = any_enabled(blocks, |b| {
            if b.block_type == BlockType::OutputFormat {
                return true;
            }
            let content = b.content.to_lowercase();
            ["output format", "respond in", "response format"]
                .iter()
                .any(|phrase| content.contains(phrase))
        });
        if has_format {
            return None;
        }
        Some(
            ValidationIssue::new(
                "no-output-format",
                Severity::Info,
                "No Output Format Specified",
                "Consider specifying an output format for more predictable responses.",
            )
            .suggest("Add an output format block to define the expected response structure.")
            .fixable(),
        )
    }
}

/// The built-in rules in evaluation order
#[must_use]
pub fn default_rules() -> Vec<Box<dyn ValidationRule>> {
    vec![
        Box::new(InjectionRule),
        Box::new(LeakySystemRule),
        Box::new(MissingSystemRule),
        Box::new(MissingGoalRule),
        Box::new(EmptyBlockRule),
        Box::new(JsonValidityRule),
        Box::new(ConflictingInstructionsRule),
        Box::new(TokenLimitRule),
        Box::new(OutputFormatRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(100_001), "100,001");
        assert_eq!(group_thousands(12_345_678), "12,345,678");
    }

    #[test]
    fn test_json_span_classification() {
        assert!(JsonValidityRule::is_malformed(r#"{"name": }"#));
        assert!(JsonValidityRule::is_malformed("{'single': 'quotes'}"));
        assert!(!JsonValidityRule::is_malformed(r#"{"name": "ok"}"#));
        assert!(!JsonValidityRule::is_malformed("{no quotes at all"));
        assert!(!JsonValidityRule::is_malformed(r#"{{"user": name}"#));
        assert!(!JsonValidityRule::is_malformed(r#"{"v": ${value}"#));
    }

    #[test]
    fn test_rule_ids_are_unique() {
        let rules = default_rules();
        let mut ids: Vec<_> = rules.iter().map(|r| r.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), rules.len());
    }
}

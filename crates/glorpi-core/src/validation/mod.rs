//! Validation Engine - preflight checks over a block list
//!
//! Runs a fixed, ordered set of independent rules and returns their issues
//! sorted by severity. Issues are data: nothing here fails.
//!
//! # Module Structure
//!
//! - `issue`: issue and severity types
//! - `patterns`: detection regexes
//! - `rules`: the built-in rules
//! - `fix`: suggested fixes and their application

mod fix;
mod issue;
mod patterns;
mod rules;

#[cfg(test)]
mod tests;

pub use fix::{apply_fix, get_suggested_fix};
pub use issue::{Severity, ValidationIssue};
pub use rules::{
    default_rules, ConflictingInstructionsRule, EmptyBlockRule, InjectionRule, JsonValidityRule,
    LeakySystemRule, MissingGoalRule, MissingSystemRule, OutputFormatRule, TokenLimitRule,
    ValidationRule,
};

use crate::block::PromptBlock;
use tracing::debug;

/// Ordered rule set
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// Validator with the built-in rules
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Append a rule; it runs after the existing ones
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Ids of the configured rules, in evaluation order
    #[must_use]
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Run every rule and sort the issues by severity (stable)
    #[must_use]
    pub fn validate(&self, blocks: &[PromptBlock]) -> Vec<ValidationIssue> {
        let mut issues: Vec<_> = self.rules.iter().filter_map(|r| r.check(blocks)).collect();
        issues.sort_by_key(|i| i.severity);

        debug!(
            blocks = blocks.len(),
            errors = issues.iter().filter(|i| i.severity == Severity::Error).count(),
            warnings = issues.iter().filter(|i| i.severity == Severity::Warning).count(),
            infos = issues.iter().filter(|i| i.severity == Severity::Info).count(),
            "Validated prompt"
        );

        issues
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("rules", &self.rule_ids())
            .finish()
    }
}

lazy_static::lazy_static! {
    static ref DEFAULT_VALIDATOR: Validator = Validator::new();
}

/// Validate with the built-in rules
#[must_use]
pub fn validate_prompt(blocks: &[PromptBlock]) -> Vec<ValidationIssue> {
    DEFAULT_VALIDATOR.validate(blocks)
}

/// True iff validation reports no error-severity issue
#[must_use]
pub fn is_prompt_valid(blocks: &[PromptBlock]) -> bool {
    !validate_prompt(blocks)
        .iter()
        .any(|i| i.severity == Severity::Error)
}

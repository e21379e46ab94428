//! Validation issue types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Issue severity. Orders `Error < Warning < Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Should block sending
    Error,
    /// Likely problem
    Warning,
    /// Suggestion
    Info,
}

impl Severity {
    /// Lowercase name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding of the validation pass.
///
/// Issues are recomputed from scratch on every run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Issue id, e.g. `missing-system` or `injection-<block id>`
    pub id: String,
    /// Severity
    pub severity: Severity,
    /// Short headline
    pub title: String,
    /// Longer explanation
    pub description: String,
    /// Block the issue is scoped to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    /// What the user could do about it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Whether a suggested fix exists
    #[serde(default)]
    pub auto_fixable: bool,
}

impl ValidationIssue {
    pub(crate) fn new(
        id: impl Into<String>,
        severity: Severity,
        title: &str,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            title: title.to_string(),
            description: description.into(),
            block_id: None,
            suggestion: None,
            auto_fixable: false,
        }
    }

    pub(crate) fn for_block(mut self, block_id: &str) -> Self {
        self.block_id = Some(block_id.to_string());
        self
    }

    pub(crate) fn suggest(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }

    pub(crate) fn fixable(mut self) -> Self {
        self.auto_fixable = true;
        self
    }

    /// Whether the issue concerns a single block rather than the whole list
    #[must_use]
    pub fn is_block_scoped(&self) -> bool {
        self.block_id.is_some()
    }
}

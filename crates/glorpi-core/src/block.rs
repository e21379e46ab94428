//! Prompt blocks
//!
//! A prompt is an ordered list of titled, typed blocks. Order is meaningful:
//! it decides the order blocks are merged into the assembled messages.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Kind of content a block holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// Base behavior of the assistant
    System,
    /// Persona the model should adopt
    Role,
    /// Task objective
    Goal,
    /// Hard rules and limits
    Constraints,
    /// Expected shape of the response
    OutputFormat,
    /// Few-shot examples
    Examples,
    /// Tool descriptions
    Tools,
    /// How the output will be judged
    Evaluation,
    /// Runtime environment description
    Environment,
    /// Visual style guidance
    UiAesthetic,
    /// Accessibility requirements
    Accessibility,
    /// Testing requirements
    Testing,
    /// Deployment notes
    Deployment,
    /// Anything else, including unrecognized tags
    Custom,
}

impl BlockType {
    /// Every block type
    pub const ALL: [BlockType; 14] = [
        BlockType::System,
        BlockType::Role,
        BlockType::Goal,
        BlockType::Constraints,
        BlockType::OutputFormat,
        BlockType::Examples,
        BlockType::Tools,
        BlockType::Evaluation,
        BlockType::Environment,
        BlockType::UiAesthetic,
        BlockType::Accessibility,
        BlockType::Testing,
        BlockType::Deployment,
        BlockType::Custom,
    ];

    /// Wire tag of this block type
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Role => "role",
            Self::Goal => "goal",
            Self::Constraints => "constraints",
            Self::OutputFormat => "output_format",
            Self::Examples => "examples",
            Self::Tools => "tools",
            Self::Evaluation => "evaluation",
            Self::Environment => "environment",
            Self::UiAesthetic => "ui_aesthetic",
            Self::Accessibility => "accessibility",
            Self::Testing => "testing",
            Self::Deployment => "deployment",
            Self::Custom => "custom",
        }
    }

    /// Parse a wire tag; unknown tags collapse to [`BlockType::Custom`]
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .unwrap_or(Self::Custom)
    }

    /// Whether blocks of this type fold into the single system message
    #[must_use]
    pub fn is_system_class(&self) -> bool {
        matches!(
            self,
            Self::System | Self::Role | Self::Constraints | Self::Environment
        )
    }

    /// Formatting overhead (headers, delimiters) charged per block of this type
    #[must_use]
    pub fn overhead_tokens(&self) -> u32 {
        match self {
            Self::Examples => 8,
            Self::Tools => 6,
            Self::System | Self::OutputFormat => 5,
            Self::Constraints | Self::Evaluation | Self::Testing => 4,
            Self::Role
            | Self::Goal
            | Self::Environment
            | Self::UiAesthetic
            | Self::Accessibility
            | Self::Deployment => 3,
            Self::Custom => 2,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BlockType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BlockType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

fn default_true() -> bool {
    true
}

/// A titled, typed unit of prompt content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptBlock {
    /// Identifier, unique within a block list
    pub id: String,
    /// Block type
    #[serde(rename = "type")]
    pub block_type: BlockType,
    /// Heading shown above the content
    #[serde(default)]
    pub title: String,
    /// Free text content
    #[serde(default)]
    pub content: String,
    /// Disabled blocks are ignored by every computation
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Editor lock
    #[serde(default)]
    pub locked: bool,
    /// Editor collapse state
    #[serde(default)]
    pub collapsed: bool,
    /// Arbitrary editor metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    /// Cached token count, if the editor computed one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u32>,
}

impl PromptBlock {
    /// Create an enabled, unlocked block
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        block_type: BlockType,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            block_type,
            title: title.into(),
            content: content.into(),
            enabled: true,
            locked: false,
            collapsed: false,
            metadata: None,
            token_count: None,
        }
    }

    /// Set the enabled flag
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Shorthand for `with_enabled(false)`
    #[must_use]
    pub fn disabled(self) -> Self {
        self.with_enabled(false)
    }
}

/// Partial block used to describe a fix.
///
/// Applied either on top of an existing block (block-scoped issues) or turned
/// into a brand-new block (list-scoped issues).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPatch {
    /// Replacement block type
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub block_type: Option<BlockType>,
    /// Replacement title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replacement content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Replacement enabled flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Replacement lock flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    /// Replacement collapse state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

impl BlockPatch {
    /// Copy of `block` with every field present in the patch overwritten
    #[must_use]
    pub fn apply_to(&self, block: &PromptBlock) -> PromptBlock {
        let mut patched = block.clone();
        if let Some(block_type) = self.block_type {
            patched.block_type = block_type;
        }
        if let Some(title) = &self.title {
            patched.title.clone_from(title);
        }
        if let Some(content) = &self.content {
            patched.content.clone_from(content);
        }
        if let Some(enabled) = self.enabled {
            patched.enabled = enabled;
        }
        if let Some(locked) = self.locked {
            patched.locked = locked;
        }
        if let Some(collapsed) = self.collapsed {
            patched.collapsed = collapsed;
        }
        // Content changed, any cached count is stale.
        patched.token_count = None;
        patched
    }

    /// Materialize the patch as a new block
    #[must_use]
    pub fn into_block(self, id: impl Into<String>) -> PromptBlock {
        PromptBlock {
            id: id.into(),
            block_type: self.block_type.unwrap_or(BlockType::Custom),
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            enabled: self.enabled.unwrap_or(true),
            locked: self.locked.unwrap_or(false),
            collapsed: self.collapsed.unwrap_or(false),
            metadata: None,
            token_count: None,
        }
    }
}

//! Project documents
//!
//! A project is the JSON document the editor saves: a block list plus the
//! selected provider, model and knobs. Fields this crate does not use
//! (timestamps, snapshots) are ignored on read.

use crate::block::PromptBlock;
use crate::error::{Error, Result};
use crate::knobs::ModelKnobs;
use crate::provider::ProviderId;
use serde::{Deserialize, Serialize};

/// Saved prompt project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ordered blocks
    #[serde(default)]
    pub blocks: Vec<PromptBlock>,
    /// Provider chosen in the editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_provider: Option<String>,
    /// Model chosen in the editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_model: Option<String>,
    /// Generation parameters
    #[serde(default)]
    pub knobs: ModelKnobs,
}

impl Project {
    /// Project holding only `blocks`
    #[must_use]
    pub fn from_blocks(blocks: Vec<PromptBlock>) -> Self {
        Self {
            blocks,
            ..Default::default()
        }
    }

    /// Parse a project document. A bare JSON array is read as a block list.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| Error::InvalidProject(e.to_string()))?;

        if value.is_array() {
            let blocks =
                serde_json::from_value(value).map_err(|e| Error::InvalidProject(e.to_string()))?;
            return Ok(Self::from_blocks(blocks));
        }

        serde_json::from_value(value).map_err(|e| Error::InvalidProject(e.to_string()))
    }

    /// Selected provider, if one is set
    pub fn provider(&self) -> Result<Option<ProviderId>> {
        self.selected_provider
            .as_deref()
            .map(str::parse)
            .transpose()
    }
}

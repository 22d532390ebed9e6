//! Common metadata shared across all rule kinds.

use serde::{Deserialize, Serialize};

/// Shared metadata for all rule kinds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CommonMetadata {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl CommonMetadata {
    /// Metadata for a compiled-in default document.
    pub fn builtin(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            tags: None,
            enabled: true,
        }
    }
}

fn default_true() -> bool {
    true
}

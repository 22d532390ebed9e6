//! Document header, read before the kind-specific body.

use serde::{Deserialize, Serialize};

use super::{CommonMetadata, RuleDocument, RuleKind};
use crate::loader::RuleError;

/// Only schema version understood by this crate.
pub const API_VERSION: &str = "v1";

/// `apiVersion`, `kind` and `metadata` of a rule document. Everything else
/// (the `spec`) is ignored until the kind is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEnvelope {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
}

impl RuleEnvelope {
    pub fn rule_kind(&self) -> Result<RuleKind, RuleError> {
        self.kind
            .parse()
            .map_err(|_| RuleError::UnknownKind(self.kind.clone()))
    }

    /// Check the header, then deserialize `document` (the whole YAML tree
    /// this header was read from) as the kind it names.
    pub fn into_document(self, document: serde_yaml::Value) -> Result<RuleDocument, RuleError> {
        if self.api_version != API_VERSION {
            return Err(RuleError::ApiVersion(self.api_version));
        }
        if self.metadata.id.trim().is_empty() {
            return Err(RuleError::Validation(
                "rule metadata.id must not be empty".to_string(),
            ));
        }

        let kind = self.rule_kind()?;
        let id = self.metadata.id;
        let schema = |e: serde_yaml::Error| RuleError::Schema {
            id: id.clone(),
            kind,
            reason: e.to_string(),
        };

        Ok(match kind {
            RuleKind::TierConfig => RuleDocument::TierConfig(serde_yaml::from_value(document).map_err(schema)?),
            RuleKind::NarrativeConfig => {
                RuleDocument::NarrativeConfig(serde_yaml::from_value(document).map_err(schema)?)
            }
            RuleKind::NarrativeTemplates => {
                RuleDocument::NarrativeTemplates(serde_yaml::from_value(document).map_err(schema)?)
            }
        })
    }
}

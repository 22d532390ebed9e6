//! Multi-kind rule document container and accessors.

use super::{CommonMetadata, RuleKind};
use crate::narrative_config::NarrativeConfigRule;
use crate::template_config::NarrativeTemplatesRule;
use crate::tier_config::TierConfigRule;

/// A fully deserialized rule of any supported kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleDocument {
    /// Tier config -- percentile breakpoints for the six rarity tiers.
    TierConfig(TierConfigRule),
    /// Narrative config -- trend multipliers, category thresholds, milestones.
    NarrativeConfig(NarrativeConfigRule),
    /// Narrative templates -- title/body text per category and timeframe.
    NarrativeTemplates(NarrativeTemplatesRule),
}

impl RuleDocument {
    /// The compiled-in default document of every kind.
    pub fn builtin_defaults() -> [RuleDocument; 3] {
        [
            RuleDocument::TierConfig(TierConfigRule::default()),
            RuleDocument::NarrativeConfig(NarrativeConfigRule::default()),
            RuleDocument::NarrativeTemplates(NarrativeTemplatesRule::default()),
        ]
    }

    /// Get the rule's metadata regardless of kind.
    pub fn metadata(&self) -> &CommonMetadata {
        match self {
            RuleDocument::TierConfig(rule) => &rule.metadata,
            RuleDocument::NarrativeConfig(rule) => &rule.metadata,
            RuleDocument::NarrativeTemplates(rule) => &rule.metadata,
        }
    }

    /// Get the rule kind.
    pub fn kind(&self) -> RuleKind {
        match self {
            RuleDocument::TierConfig(_) => RuleKind::TierConfig,
            RuleDocument::NarrativeConfig(_) => RuleKind::NarrativeConfig,
            RuleDocument::NarrativeTemplates(_) => RuleKind::NarrativeTemplates,
        }
    }

    pub fn as_tier_config(&self) -> Option<&TierConfigRule> {
        match self {
            RuleDocument::TierConfig(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_narrative_config(&self) -> Option<&NarrativeConfigRule> {
        match self {
            RuleDocument::NarrativeConfig(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_narrative_templates(&self) -> Option<&NarrativeTemplatesRule> {
        match self {
            RuleDocument::NarrativeTemplates(rule) => Some(rule),
            _ => None,
        }
    }

    /// Serialize this document to JSON, delegating to the inner type.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            RuleDocument::TierConfig(r) => serde_json::to_value(r),
            RuleDocument::NarrativeConfig(r) => serde_json::to_value(r),
            RuleDocument::NarrativeTemplates(r) => serde_json::to_value(r),
        }
    }

    /// Serialize this document to YAML, delegating to the inner type.
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        match self {
            RuleDocument::TierConfig(r) => serde_yaml::to_string(r),
            RuleDocument::NarrativeConfig(r) => serde_yaml::to_string(r),
            RuleDocument::NarrativeTemplates(r) => serde_yaml::to_string(r),
        }
    }
}

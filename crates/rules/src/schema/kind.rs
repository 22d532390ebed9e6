//! Rule kind enum for two-pass deserialization dispatch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported rule kinds for two-pass deserialization dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleKind {
    TierConfig,
    NarrativeConfig,
    NarrativeTemplates,
}

impl RuleKind {
    pub const ALL: [RuleKind; 3] = [
        RuleKind::TierConfig,
        RuleKind::NarrativeConfig,
        RuleKind::NarrativeTemplates,
    ];
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::TierConfig => write!(f, "TierConfig"),
            RuleKind::NarrativeConfig => write!(f, "NarrativeConfig"),
            RuleKind::NarrativeTemplates => write!(f, "NarrativeTemplates"),
        }
    }
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "TierConfig" => Ok(RuleKind::TierConfig),
            "NarrativeConfig" => Ok(RuleKind::NarrativeConfig),
            "NarrativeTemplates" => Ok(RuleKind::NarrativeTemplates),
            other => Err(format!("unknown rule kind: '{}'", other)),
        }
    }
}

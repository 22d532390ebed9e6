//! Loader errors and per-file outcomes.

use std::path::PathBuf;

use crate::schema::RuleKind;

#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not well-formed YAML, or lacks the document header.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unsupported apiVersion '{0}'")]
    ApiVersion(String),

    #[error("unknown rule kind '{0}'")]
    UnknownKind(String),

    /// Header is fine but the body does not fit the kind's schema.
    #[error("rule '{id}' is not a valid {kind}: {reason}")]
    Schema {
        id: String,
        kind: RuleKind,
        reason: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, RuleError>;

/// What happened to one file during a directory scan.
#[derive(Debug)]
pub struct LoadResult {
    pub path: PathBuf,
    pub status: LoadStatus,
}

#[derive(Debug)]
pub enum LoadStatus {
    Loaded { rule_id: String, kind: RuleKind },
    /// Dotfiles and non-YAML files.
    Skipped { reason: String },
    Failed { error: String },
}

impl LoadStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadStatus::Failed { .. })
    }

    pub fn rule_id(&self) -> Option<&str> {
        match self {
            LoadStatus::Loaded { rule_id, .. } => Some(rule_id),
            _ => None,
        }
    }
}

use std::path::PathBuf;

use thiserror::Error;

use rarity_rules::loader::RuleError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Rule error: {0}")]
    Rules(#[from] RuleError),

    #[error("Failed to load {path}: {error}")]
    LoadFailed { path: PathBuf, error: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;

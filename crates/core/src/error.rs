use thiserror::Error;

use crate::window::Timeframe;

#[derive(Error, Debug)]
pub enum RarityError {
    #[error("Missing timeframe: {0}")]
    MissingTimeframe(Timeframe),

    #[error("Duplicate timeframe: {0}")]
    DuplicateTimeframe(Timeframe),

    #[error("Unknown timeframe: '{0}'")]
    UnknownTimeframe(String),

    #[error("Unknown tier: '{0}'")]
    UnknownTier(String),

    #[error("Unknown narrative category: '{0}'")]
    UnknownCategory(String),

    #[error("Malformed window set: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RarityError>;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RarityError, Result};

/// Discrete rarity classification, ordered rarest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Elite,
    Rare,
    Unique,
    Notable,
    Popular,
    Common,
}

impl Tier {
    /// All tiers, rarest first.
    pub const ALL: [Tier; 6] = [
        Tier::Elite,
        Tier::Rare,
        Tier::Unique,
        Tier::Notable,
        Tier::Popular,
        Tier::Common,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Elite => "elite",
            Tier::Rare => "rare",
            Tier::Unique => "unique",
            Tier::Notable => "notable",
            Tier::Popular => "popular",
            Tier::Common => "common",
        }
    }

    /// Next rarer tier, `None` at the top.
    pub fn rarer(&self) -> Option<Tier> {
        Tier::ALL.get((*self as usize).checked_sub(1)?).copied()
    }

    /// Next more common tier, `None` at the bottom.
    pub fn more_common(&self) -> Option<Tier> {
        Tier::ALL.get(*self as usize + 1).copied()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = RarityError;

    fn from_str(s: &str) -> Result<Self> {
        Tier::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RarityError::UnknownTier(s.to_string()))
    }
}

/// Classifier output for a single `(matches, total)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityScore {
    /// `matches / total`, clamped to `[0, 1]`.
    pub ratio: f64,
    /// Rarity score in `[0, 100]`; higher is rarer.
    pub percentile: f64,
    pub tier: Tier,
}

impl RarityScore {
    /// Share of the window that did the same thing, in percent ("top X%").
    pub fn top_percent(&self) -> f64 {
        100.0 - self.percentile
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RarityError, Result};
use crate::window::Timeframe;

/// Direction of a window's activity relative to the projected rate of the
/// adjacent finer window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        })
    }
}

/// Story told about one window. Exactly one applies per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeCategory {
    Pioneer,
    Milestone,
    Growth,
    Community,
    Rare,
    Stable,
}

impl NarrativeCategory {
    /// All categories in rule-priority order.
    pub const ALL: [NarrativeCategory; 6] = [
        NarrativeCategory::Pioneer,
        NarrativeCategory::Milestone,
        NarrativeCategory::Growth,
        NarrativeCategory::Community,
        NarrativeCategory::Rare,
        NarrativeCategory::Stable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NarrativeCategory::Pioneer => "pioneer",
            NarrativeCategory::Milestone => "milestone",
            NarrativeCategory::Growth => "growth",
            NarrativeCategory::Community => "community",
            NarrativeCategory::Rare => "rare",
            NarrativeCategory::Stable => "stable",
        }
    }
}

impl fmt::Display for NarrativeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NarrativeCategory {
    type Err = RarityError;

    fn from_str(s: &str) -> Result<Self> {
        NarrativeCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RarityError::UnknownCategory(s.to_string()))
    }
}

/// One generated story, one per timeframe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeRecord {
    pub timeframe: Timeframe,
    pub category: NarrativeCategory,
    pub title: String,
    pub body: String,
    pub matches: u64,
    pub total: u64,
    /// Only set for month and year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    /// Only set for the milestone category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone_value: Option<u64>,
}

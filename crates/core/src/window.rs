//! Time windows and the per-window activity counters fed to the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RarityError, Result};

/// One of the four nested time windows, finest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Timeframe {
    Week,
    Month,
    Year,
    #[serde(alias = "all_time")]
    AllTime,
}

impl Timeframe {
    /// All timeframes in output order.
    pub const ALL: [Timeframe; 4] = [
        Timeframe::Week,
        Timeframe::Month,
        Timeframe::Year,
        Timeframe::AllTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Week => "week",
            Timeframe::Month => "month",
            Timeframe::Year => "year",
            Timeframe::AllTime => "allTime",
        }
    }

    /// Adjacent finer window whose rate is projected forward for trend
    /// detection. `None` for week (nothing finer) and allTime (no fixed span).
    pub fn finer(&self) -> Option<Timeframe> {
        match self {
            Timeframe::Month => Some(Timeframe::Week),
            Timeframe::Year => Some(Timeframe::Month),
            Timeframe::Week | Timeframe::AllTime => None,
        }
    }

    /// Human phrase used in narrative text ("this week", "of all time").
    pub fn period_phrase(&self) -> &'static str {
        match self {
            Timeframe::Week => "this week",
            Timeframe::Month => "this month",
            Timeframe::Year => "this year",
            Timeframe::AllTime => "of all time",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = RarityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "week" => Ok(Timeframe::Week),
            "month" => Ok(Timeframe::Month),
            "year" => Ok(Timeframe::Year),
            "alltime" | "all_time" | "all-time" => Ok(Timeframe::AllTime),
            _ => Err(RarityError::UnknownTimeframe(s.to_string())),
        }
    }
}

// ── WindowCount ───────────────────────────────────────────────

/// Raw activity signal for one window.
///
/// Always normalized: `total >= 1`. `matches <= total` is expected but not
/// enforced; the classifier clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawWindowCount")]
pub struct WindowCount {
    pub matches: u64,
    pub total: u64,
}

/// Wire shape accepted from callers before normalization.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct RawWindowCount {
    #[serde(default)]
    matches: Option<i64>,
    #[serde(default)]
    total: Option<i64>,
}

impl From<RawWindowCount> for WindowCount {
    fn from(raw: RawWindowCount) -> Self {
        WindowCount::new(raw.matches.unwrap_or(0), raw.total.unwrap_or(0))
    }
}

impl WindowCount {
    /// Build from possibly out-of-range counters: negatives become 0 and a
    /// zero total becomes 1.
    pub fn new(matches: i64, total: i64) -> Self {
        let matches = matches.max(0) as u64;
        let total = (total.max(0) as u64).max(1);
        Self { matches, total }
    }

    /// Subject's fellow actors in this window (excludes the subject itself).
    pub fn others(&self) -> u64 {
        self.matches.saturating_sub(1)
    }
}

impl Default for WindowCount {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

// ── TemporalWindowSet ─────────────────────────────────────────

/// Exactly four window counts, one per [`Timeframe`].
///
/// Nesting (`week ⊆ month ⊆ year ⊆ allTime`) is assumed, not checked.
/// Every key is required when deserializing; a missing key is a caller bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalWindowSet {
    pub week: WindowCount,
    pub month: WindowCount,
    pub year: WindowCount,
    #[serde(alias = "all_time")]
    pub all_time: WindowCount,
}

impl TemporalWindowSet {
    pub fn new(week: WindowCount, month: WindowCount, year: WindowCount, all_time: WindowCount) -> Self {
        Self {
            week,
            month,
            year,
            all_time,
        }
    }

    /// Build from keyed entries. Every timeframe must appear exactly once.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Timeframe, WindowCount)>,
    {
        let mut slots: [Option<WindowCount>; 4] = [None; 4];
        for (timeframe, count) in entries {
            let slot = &mut slots[timeframe as usize];
            if slot.is_some() {
                return Err(RarityError::DuplicateTimeframe(timeframe));
            }
            *slot = Some(count);
        }

        let take = |timeframe: Timeframe| slots[timeframe as usize].ok_or(RarityError::MissingTimeframe(timeframe));
        Ok(Self {
            week: take(Timeframe::Week)?,
            month: take(Timeframe::Month)?,
            year: take(Timeframe::Year)?,
            all_time: take(Timeframe::AllTime)?,
        })
    }

    /// Parse the `{"week": .., "month": .., "year": .., "allTime": ..}` shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn get(&self, timeframe: Timeframe) -> &WindowCount {
        match timeframe {
            Timeframe::Week => &self.week,
            Timeframe::Month => &self.month,
            Timeframe::Year => &self.year,
            Timeframe::AllTime => &self.all_time,
        }
    }

    /// Windows in output order.
    pub fn iter(&self) -> impl Iterator<Item = (Timeframe, &WindowCount)> + '_ {
        Timeframe::ALL.into_iter().map(move |t| (t, self.get(t)))
    }
}

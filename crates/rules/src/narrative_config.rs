//! NarrativeConfig rule kind: trend projection multipliers, category
//! thresholds and the milestone ladder used by the narrative generator.

use serde::{Deserialize, Serialize};

use rarity_core::Timeframe;

use crate::schema::CommonMetadata;

// ── YAML-level types ────────────────────────────────────────────────

/// Top-level NarrativeConfig rule document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NarrativeConfigRule {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    pub spec: NarrativeConfigSpec,
}

/// Specification section of a NarrativeConfig rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NarrativeConfigSpec {
    pub trend: TrendMultipliers,
    pub categories: CategoryThresholds,
}

/// Projection multipliers per trend-bearing window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TrendMultipliers {
    /// Month compared against week.
    pub month: TrendBounds,
    /// Year compared against month.
    pub year: TrendBounds,
}

/// `matches > finer × up` → Up, `matches < finer × down` → Down, else Stable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TrendBounds {
    pub up: f64,
    pub down: f64,
}

/// Match-count thresholds for the category rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CategoryThresholds {
    /// `matches <= pioneer_max` → Pioneer.
    pub pioneer_max: u64,
    /// Exact counts that qualify as a milestone, ascending.
    pub milestones: Vec<u64>,
    /// Trend up and `matches > growth_above` → Growth.
    pub growth_above: u64,
    /// `matches > community_above` → Community.
    pub community_above: u64,
    /// `pioneer_max < matches <= rare_max` → Rare.
    pub rare_max: u64,
}

impl Default for NarrativeConfigSpec {
    fn default() -> Self {
        Self {
            trend: TrendMultipliers {
                month: TrendBounds { up: 4.0, down: 2.0 },
                year: TrendBounds { up: 12.0, down: 6.0 },
            },
            categories: CategoryThresholds {
                pioneer_max: 1,
                milestones: vec![10, 25, 50, 100, 250, 500, 1000],
                growth_above: 5,
                community_above: 10,
                rare_max: 3,
            },
        }
    }
}

impl Default for NarrativeConfigRule {
    fn default() -> Self {
        Self {
            api_version: "v1".to_string(),
            kind: "NarrativeConfig".to_string(),
            metadata: CommonMetadata::builtin("narrative-default", "Default narrative rules"),
            spec: NarrativeConfigSpec::default(),
        }
    }
}

// ── Compiled (hot-path) type ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledNarrativeConfig {
    pub month: TrendBounds,
    pub year: TrendBounds,
    pub pioneer_max: u64,
    /// Sorted and deduplicated.
    pub milestones: Vec<u64>,
    pub growth_above: u64,
    pub community_above: u64,
    pub rare_max: u64,
}

impl CompiledNarrativeConfig {
    /// Trend bounds for a window, `None` where no trend is computed.
    pub fn trend_bounds(&self, timeframe: Timeframe) -> Option<TrendBounds> {
        match timeframe {
            Timeframe::Month => Some(self.month),
            Timeframe::Year => Some(self.year),
            Timeframe::Week | Timeframe::AllTime => None,
        }
    }

    /// Exact milestone match.
    pub fn milestone(&self, matches: u64) -> Option<u64> {
        self.milestones.binary_search(&matches).ok().map(|_| matches)
    }
}

impl Default for CompiledNarrativeConfig {
    fn default() -> Self {
        NarrativeConfigRule::default().compile()
    }
}

impl NarrativeConfigRule {
    pub fn compile(&self) -> CompiledNarrativeConfig {
        let c = &self.spec.categories;
        let mut milestones = c.milestones.clone();
        milestones.sort_unstable();
        milestones.dedup();
        CompiledNarrativeConfig {
            month: self.spec.trend.month,
            year: self.spec.trend.year,
            pioneer_max: c.pioneer_max,
            milestones,
            growth_above: c.growth_above,
            community_above: c.community_above,
            rare_max: c.rare_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_yaml() -> NarrativeConfigRule {
        let yaml = include_str!("../../../data/rules/narrative/narrative-config.yml");
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn parse_narrative_config_yaml() {
        let rule = load_yaml();
        assert_eq!(rule.kind, "NarrativeConfig");
        assert_eq!(rule.spec.trend.month.up, 4.0);
        assert_eq!(rule.spec.trend.year.down, 6.0);
    }

    #[test]
    fn shipped_yaml_matches_builtin_default() {
        assert_eq!(load_yaml().spec, NarrativeConfigSpec::default());
    }

    #[test]
    fn milestone_is_exact() {
        let compiled = CompiledNarrativeConfig::default();
        assert_eq!(compiled.milestone(50), Some(50));
        assert_eq!(compiled.milestone(49), None);
        assert_eq!(compiled.milestone(51), None);
        assert_eq!(compiled.milestone(1000), Some(1000));
    }

    #[test]
    fn compile_sorts_milestones() {
        let mut rule = NarrativeConfigRule::default();
        rule.spec.categories.milestones = vec![100, 10, 25, 10];
        let compiled = rule.compile();
        assert_eq!(compiled.milestones, vec![10, 25, 100]);
        assert_eq!(compiled.milestone(25), Some(25));
    }

    #[test]
    fn trend_bounds_only_for_month_and_year() {
        let compiled = CompiledNarrativeConfig::default();
        assert!(compiled.trend_bounds(Timeframe::Week).is_none());
        assert!(compiled.trend_bounds(Timeframe::AllTime).is_none());
        assert_eq!(compiled.trend_bounds(Timeframe::Year).unwrap().up, 12.0);
    }
}

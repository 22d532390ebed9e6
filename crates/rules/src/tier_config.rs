//! TierConfig rule kind: percentile breakpoints for the six rarity tiers.

use serde::{Deserialize, Serialize};

use rarity_core::Tier;

use crate::schema::CommonMetadata;

// ── YAML-level types ────────────────────────────────────────────────

/// Top-level TierConfig rule document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TierConfigRule {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    pub spec: TierConfigSpec,
}

/// Specification section of a TierConfig rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TierConfigSpec {
    pub breakpoints: TierBreakpoints,
}

/// Inclusive lower percentile bound per tier. Must be strictly descending
/// from `elite` to `common`, with `common` at 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TierBreakpoints {
    pub elite: f64,
    pub rare: f64,
    pub unique: f64,
    pub notable: f64,
    pub popular: f64,
    #[serde(default)]
    pub common: f64,
}

impl TierBreakpoints {
    pub fn lower_bound(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Elite => self.elite,
            Tier::Rare => self.rare,
            Tier::Unique => self.unique,
            Tier::Notable => self.notable,
            Tier::Popular => self.popular,
            Tier::Common => self.common,
        }
    }
}

impl Default for TierBreakpoints {
    fn default() -> Self {
        Self {
            elite: 99.0,
            rare: 95.0,
            unique: 90.0,
            notable: 75.0,
            popular: 50.0,
            common: 0.0,
        }
    }
}

impl Default for TierConfigRule {
    fn default() -> Self {
        Self {
            api_version: "v1".to_string(),
            kind: "TierConfig".to_string(),
            metadata: CommonMetadata::builtin("tier-default", "Default rarity tiers"),
            spec: TierConfigSpec {
                breakpoints: TierBreakpoints::default(),
            },
        }
    }
}

// ── Compiled (hot-path) type ────────────────────────────────────────

/// Breakpoint table as an ordered step function, rarest tier first.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTierConfig {
    steps: [(Tier, f64); 6],
}

impl CompiledTierConfig {
    /// Tier for a percentile. The first step whose lower bound is met wins,
    /// so a value sitting exactly on a boundary lands in the rarer tier.
    pub fn tier_for(&self, percentile: f64) -> Tier {
        self.steps
            .iter()
            .find(|(_, lower)| percentile >= *lower)
            .map(|(tier, _)| *tier)
            .unwrap_or(Tier::Common)
    }

    pub fn steps(&self) -> &[(Tier, f64); 6] {
        &self.steps
    }
}

impl Default for CompiledTierConfig {
    fn default() -> Self {
        TierConfigRule::default().compile()
    }
}

impl TierConfigRule {
    /// Compile the YAML config into the lookup table. Run validation first;
    /// compilation itself does not reject bad breakpoints.
    pub fn compile(&self) -> CompiledTierConfig {
        let b = &self.spec.breakpoints;
        CompiledTierConfig {
            steps: Tier::ALL.map(|tier| (tier, b.lower_bound(tier))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_yaml() -> TierConfigRule {
        let yaml = include_str!("../../../data/rules/tiers/tier-config.yml");
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn parse_tier_config_yaml() {
        let rule = load_yaml();
        assert_eq!(rule.kind, "TierConfig");
        assert_eq!(rule.spec.breakpoints.elite, 99.0);
    }

    #[test]
    fn shipped_yaml_matches_builtin_default() {
        assert_eq!(load_yaml().spec, TierConfigRule::default().spec);
    }

    #[test]
    fn boundary_resolves_to_rarer_tier() {
        let compiled = CompiledTierConfig::default();
        assert_eq!(compiled.tier_for(99.0), Tier::Elite);
        assert_eq!(compiled.tier_for(98.999), Tier::Rare);
        assert_eq!(compiled.tier_for(95.0), Tier::Rare);
        assert_eq!(compiled.tier_for(90.0), Tier::Unique);
        assert_eq!(compiled.tier_for(75.0), Tier::Notable);
        assert_eq!(compiled.tier_for(50.0), Tier::Popular);
        assert_eq!(compiled.tier_for(49.9), Tier::Common);
        assert_eq!(compiled.tier_for(0.0), Tier::Common);
    }

    #[test]
    fn nan_falls_to_common() {
        assert_eq!(CompiledTierConfig::default().tier_for(f64::NAN), Tier::Common);
    }

    #[test]
    fn common_defaults_to_zero_when_omitted() {
        let yaml = r#"
apiVersion: v1
kind: TierConfig
metadata:
  id: tier-strict
  name: Strict tiers
spec:
  breakpoints:
    elite: 99.9
    rare: 99.0
    unique: 97.0
    notable: 90.0
    popular: 70.0
"#;
        let rule: TierConfigRule = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rule.spec.breakpoints.common, 0.0);
        assert_eq!(rule.compile().tier_for(98.0), Tier::Unique);
    }
}

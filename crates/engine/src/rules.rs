//! Priority-ordered category rules.
//!
//! Rules are evaluated top to bottom and the first match wins. `stable`
//! closes the list unconditionally, so every window gets a category.

use rarity_core::{NarrativeCategory, Timeframe, Trend};
use rarity_rules::narrative_config::CompiledNarrativeConfig;

/// Everything the category rules look at for one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSignal {
    pub timeframe: Timeframe,
    pub matches: u64,
    pub trend: Option<Trend>,
}

pub type Predicate = fn(&WindowSignal, &CompiledNarrativeConfig) -> bool;

#[derive(Clone, Copy)]
pub struct CategoryRule {
    pub category: NarrativeCategory,
    pub applies: Predicate,
}

impl std::fmt::Debug for CategoryRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryRule")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

fn pioneer(s: &WindowSignal, c: &CompiledNarrativeConfig) -> bool {
    s.matches <= c.pioneer_max
}

fn milestone(s: &WindowSignal, c: &CompiledNarrativeConfig) -> bool {
    c.milestone(s.matches).is_some()
}

fn growth(s: &WindowSignal, c: &CompiledNarrativeConfig) -> bool {
    s.trend == Some(Trend::Up) && s.matches > c.growth_above
}

fn community(s: &WindowSignal, c: &CompiledNarrativeConfig) -> bool {
    s.matches > c.community_above
}

fn rare(s: &WindowSignal, c: &CompiledNarrativeConfig) -> bool {
    s.matches > c.pioneer_max && s.matches <= c.rare_max
}

fn stable(_: &WindowSignal, _: &CompiledNarrativeConfig) -> bool {
    true
}

pub const CATEGORY_RULES: [CategoryRule; 6] = [
    CategoryRule { category: NarrativeCategory::Pioneer, applies: pioneer },
    CategoryRule { category: NarrativeCategory::Milestone, applies: milestone },
    CategoryRule { category: NarrativeCategory::Growth, applies: growth },
    CategoryRule { category: NarrativeCategory::Community, applies: community },
    CategoryRule { category: NarrativeCategory::Rare, applies: rare },
    CategoryRule { category: NarrativeCategory::Stable, applies: stable },
];

/// First matching category in priority order.
pub fn select_category(signal: &WindowSignal, config: &CompiledNarrativeConfig) -> NarrativeCategory {
    CATEGORY_RULES
        .iter()
        .find(|rule| (rule.applies)(signal, config))
        .map(|rule| rule.category)
        .unwrap_or(NarrativeCategory::Stable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(matches: u64, trend: Option<Trend>) -> WindowSignal {
        WindowSignal {
            timeframe: Timeframe::Month,
            matches,
            trend,
        }
    }

    fn category(matches: u64, trend: Option<Trend>) -> NarrativeCategory {
        select_category(&signal(matches, trend), &CompiledNarrativeConfig::default())
    }

    #[test]
    fn rule_order_matches_category_priority() {
        let order: Vec<_> = CATEGORY_RULES.iter().map(|r| r.category).collect();
        assert_eq!(order, NarrativeCategory::ALL.to_vec());
    }

    #[test]
    fn stable_is_unconditional() {
        let last = CATEGORY_RULES.last().unwrap();
        assert_eq!(last.category, NarrativeCategory::Stable);
        assert!((last.applies)(&signal(u64::MAX, None), &CompiledNarrativeConfig::default()));
    }

    #[test]
    fn pioneer_boundary() {
        for trend in [None, Some(Trend::Up), Some(Trend::Down)] {
            assert_eq!(category(0, trend), NarrativeCategory::Pioneer);
            assert_eq!(category(1, trend), NarrativeCategory::Pioneer);
        }
        assert_ne!(category(2, None), NarrativeCategory::Pioneer);
    }

    #[test]
    fn milestone_beats_growth() {
        assert_eq!(category(10, Some(Trend::Up)), NarrativeCategory::Milestone);
        assert_eq!(category(50, Some(Trend::Up)), NarrativeCategory::Milestone);
    }

    #[test]
    fn milestone_is_exact() {
        assert_eq!(category(50, None), NarrativeCategory::Milestone);
        assert_eq!(category(49, None), NarrativeCategory::Community);
        assert_eq!(category(51, None), NarrativeCategory::Community);
        assert_eq!(category(51, Some(Trend::Up)), NarrativeCategory::Growth);
    }

    #[test]
    fn growth_needs_up_trend_and_more_than_five() {
        assert_eq!(category(6, Some(Trend::Up)), NarrativeCategory::Growth);
        assert_eq!(category(5, Some(Trend::Up)), NarrativeCategory::Stable);
        assert_eq!(category(6, Some(Trend::Stable)), NarrativeCategory::Stable);
        assert_eq!(category(30, Some(Trend::Down)), NarrativeCategory::Community);
    }

    #[test]
    fn rare_range() {
        assert_eq!(category(2, None), NarrativeCategory::Rare);
        assert_eq!(category(3, Some(Trend::Up)), NarrativeCategory::Rare);
        assert_eq!(category(4, None), NarrativeCategory::Stable);
    }

    #[test]
    fn community_above_ten() {
        assert_eq!(category(11, None), NarrativeCategory::Community);
        assert_eq!(category(9, None), NarrativeCategory::Stable);
    }

    #[test]
    fn exactly_one_category_for_every_count() {
        let config = CompiledNarrativeConfig::default();
        for matches in 0..1100 {
            for trend in [None, Some(Trend::Up), Some(Trend::Down), Some(Trend::Stable)] {
                let s = signal(matches, trend);
                let first = CATEGORY_RULES
                    .iter()
                    .position(|r| (r.applies)(&s, &config))
                    .unwrap();
                assert_eq!(CATEGORY_RULES[first].category, select_category(&s, &config));
            }
        }
    }
}

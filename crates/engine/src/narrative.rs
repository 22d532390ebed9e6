//! Temporal narrative generator: four windows in, four stories out.

use tracing::debug;

use rarity_core::{NarrativeCategory, NarrativeRecord, TemporalWindowSet, Timeframe};
use rarity_rules::narrative_config::CompiledNarrativeConfig;
use rarity_rules::template_config::CompiledTemplates;

use crate::rules::{select_category, WindowSignal};
use crate::templating::{TemplateContext, TemplateRenderer};
use crate::trend::window_trend;

#[derive(Debug, Default)]
pub struct NarrativeGenerator {
    config: CompiledNarrativeConfig,
    templates: CompiledTemplates,
    renderer: TemplateRenderer,
}

impl NarrativeGenerator {
    pub fn new(config: CompiledNarrativeConfig, templates: CompiledTemplates) -> Self {
        Self {
            config,
            templates,
            renderer: TemplateRenderer::new(),
        }
    }

    pub fn config(&self) -> &CompiledNarrativeConfig {
        &self.config
    }

    /// One record per timeframe, in `[week, month, year, allTime]` order.
    pub fn generate(&self, windows: &TemporalWindowSet) -> [NarrativeRecord; 4] {
        let records = Timeframe::ALL.map(|t| self.narrate_window(windows, t));
        debug!(
            week = %records[0].category,
            month = %records[1].category,
            year = %records[2].category,
            all_time = %records[3].category,
            "narratives generated"
        );
        records
    }

    /// Build the record for a single window. Windows are independent; only
    /// the trend looks at the adjacent finer window.
    pub fn narrate_window(&self, windows: &TemporalWindowSet, timeframe: Timeframe) -> NarrativeRecord {
        let window = windows.get(timeframe);
        let trend = window_trend(windows, timeframe, &self.config);
        let signal = WindowSignal {
            timeframe,
            matches: window.matches,
            trend,
        };

        let category = select_category(&signal, &self.config);
        let milestone_value = match category {
            NarrativeCategory::Milestone => self.config.milestone(window.matches),
            _ => None,
        };

        let ctx = TemplateContext {
            matches: window.matches,
            others: window.others(),
            total: window.total,
            milestone: milestone_value,
            period: timeframe.period_phrase(),
        };
        let pair = self.templates.get(category, timeframe);

        NarrativeRecord {
            timeframe,
            category,
            title: self.renderer.render(&pair.title, &ctx),
            body: self.renderer.render(&pair.body, &ctx),
            matches: window.matches,
            total: window.total,
            trend,
            milestone_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rarity_core::{Trend, WindowCount};

    fn windows(counts: [(i64, i64); 4]) -> TemporalWindowSet {
        let [w, m, y, a] = counts.map(|(matches, total)| WindowCount::new(matches, total));
        TemporalWindowSet::new(w, m, y, a)
    }

    #[test]
    fn trend_only_on_month_and_year() {
        let records = NarrativeGenerator::default().generate(&windows([(4, 10), (20, 40), (50, 90), (80, 200)]));
        assert!(records[0].trend.is_none());
        assert!(records[1].trend.is_some());
        assert!(records[2].trend.is_some());
        assert!(records[3].trend.is_none());
    }

    #[test]
    fn milestone_value_only_on_milestone() {
        let records = NarrativeGenerator::default().generate(&windows([(10, 50), (11, 60), (100, 900), (250, 5000)]));
        assert_eq!(records[0].milestone_value, Some(10));
        assert_eq!(records[1].milestone_value, None);
        assert_eq!(records[2].milestone_value, Some(100));
        assert_eq!(records[3].milestone_value, Some(250));
        assert!(records
            .iter()
            .filter(|r| r.category != NarrativeCategory::Milestone)
            .all(|r| r.milestone_value.is_none()));
    }

    #[test]
    fn milestone_body_substitutes_value() {
        let records = NarrativeGenerator::default().generate(&windows([(1, 5), (1, 5), (1, 5), (500, 9000)]));
        assert_eq!(records[3].category, NarrativeCategory::Milestone);
        assert!(records[3].body.contains("500"), "{}", records[3].body);
    }

    #[test]
    fn growth_for_month_ahead_of_weekly_pace() {
        let records = NarrativeGenerator::default().generate(&windows([(2, 40), (9, 100), (60, 900), (90, 2000)]));
        // 9 > 2 × 4
        assert_eq!(records[1].trend, Some(Trend::Up));
        assert_eq!(records[1].category, NarrativeCategory::Growth);
        assert!(records[1].body.starts_with("9 people"));
    }

    #[test]
    fn community_body_counts_others() {
        let records = NarrativeGenerator::default().generate(&windows([(12, 40), (40, 100), (200, 900), (400, 2000)]));
        assert_eq!(records[0].category, NarrativeCategory::Community);
        assert_eq!(records[0].body, "You and 11 others did it this week.");
    }

    #[test]
    fn rare_body_pluralizes() {
        let records = NarrativeGenerator::default().generate(&windows([(2, 40), (3, 100), (3, 900), (3, 2000)]));
        assert_eq!(records[0].category, NarrativeCategory::Rare);
        assert_eq!(records[0].body, "Only 1 other did it this week.");
        assert_eq!(records[2].category, NarrativeCategory::Rare);
        assert_eq!(records[2].body, "Only 2 others shared it this year.");
    }

    #[test]
    fn matches_and_total_are_echoed() {
        let records = NarrativeGenerator::default().generate(&windows([(7, 0), (8, 80), (9, 90), (10, -1)]));
        assert_eq!((records[0].matches, records[0].total), (7, 1));
        assert_eq!((records[1].matches, records[1].total), (8, 80));
        assert_eq!((records[3].matches, records[3].total), (10, 1));
    }
}

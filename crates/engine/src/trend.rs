//! Trend detection between a window and its adjacent finer window.

use rarity_core::{TemporalWindowSet, Timeframe, Trend};
use rarity_rules::narrative_config::{CompiledNarrativeConfig, TrendBounds};

/// Compare `matches` against the finer window's count projected forward.
///
/// Strict comparisons: landing exactly on either bound is Stable.
pub fn detect_trend(matches: u64, reference: u64, bounds: TrendBounds) -> Trend {
    let matches = matches as f64;
    let reference = reference as f64;

    if matches > reference * bounds.up {
        Trend::Up
    } else if matches < reference * bounds.down {
        Trend::Down
    } else {
        Trend::Stable
    }
}

/// Trend for one window of the set, `None` for week and allTime.
pub fn window_trend(
    windows: &TemporalWindowSet,
    timeframe: Timeframe,
    config: &CompiledNarrativeConfig,
) -> Option<Trend> {
    let finer = timeframe.finer()?;
    let bounds = config.trend_bounds(timeframe)?;
    Some(detect_trend(
        windows.get(timeframe).matches,
        windows.get(finer).matches,
        bounds,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rarity_core::WindowCount;

    fn set(week: i64, month: i64, year: i64, all_time: i64) -> TemporalWindowSet {
        TemporalWindowSet::new(
            WindowCount::new(week, 1000),
            WindowCount::new(month, 1000),
            WindowCount::new(year, 1000),
            WindowCount::new(all_time, 1000),
        )
    }

    #[test]
    fn month_thresholds() {
        let config = CompiledNarrativeConfig::default();
        assert_eq!(window_trend(&set(10, 45, 0, 0), Timeframe::Month, &config), Some(Trend::Up));
        assert_eq!(window_trend(&set(10, 15, 0, 0), Timeframe::Month, &config), Some(Trend::Down));
        assert_eq!(window_trend(&set(10, 30, 0, 0), Timeframe::Month, &config), Some(Trend::Stable));
    }

    #[test]
    fn bounds_are_exclusive() {
        let config = CompiledNarrativeConfig::default();
        // 40 == 10 × 4 and 20 == 10 × 2
        assert_eq!(window_trend(&set(10, 40, 0, 0), Timeframe::Month, &config), Some(Trend::Stable));
        assert_eq!(window_trend(&set(10, 20, 0, 0), Timeframe::Month, &config), Some(Trend::Stable));
    }

    #[test]
    fn year_projects_month_by_twelve() {
        let config = CompiledNarrativeConfig::default();
        assert_eq!(window_trend(&set(0, 25, 120, 0), Timeframe::Year, &config), Some(Trend::Down));
        assert_eq!(window_trend(&set(0, 25, 301, 0), Timeframe::Year, &config), Some(Trend::Up));
        assert_eq!(window_trend(&set(0, 25, 200, 0), Timeframe::Year, &config), Some(Trend::Stable));
    }

    #[test]
    fn no_trend_for_week_or_all_time() {
        let config = CompiledNarrativeConfig::default();
        let s = set(5, 50, 500, 5000);
        assert_eq!(window_trend(&s, Timeframe::Week, &config), None);
        assert_eq!(window_trend(&s, Timeframe::AllTime, &config), None);
    }

    #[test]
    fn empty_reference_window() {
        let bounds = TrendBounds { up: 4.0, down: 2.0 };
        assert_eq!(detect_trend(0, 0, bounds), Trend::Stable);
        assert_eq!(detect_trend(1, 0, bounds), Trend::Up);
    }
}

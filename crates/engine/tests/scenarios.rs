//! End-to-end scenarios against the public engine API.

use std::fs;
use std::path::PathBuf;

use rarity_core::{NarrativeCategory, TemporalWindowSet, Tier, Timeframe, Trend, WindowCount};
use rarity_engine::{EngineError, RarityEngine};

fn parse(json: &str) -> TemporalWindowSet {
    serde_json::from_str(json).unwrap()
}

fn shipped_rules_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/rules")
}

const MIXED: &str = r#"{"week":{"matches":3,"total":100},"month":{"matches":25,"total":500},
    "year":{"matches":120,"total":6000},"allTime":{"matches":300,"total":20000}}"#;

#[test]
fn single_actor_everywhere_is_pioneer() {
    let windows = parse(
        r#"{"week":{"matches":1,"total":50},"month":{"matches":1,"total":200},
            "year":{"matches":1,"total":2000},"allTime":{"matches":1,"total":5000}}"#,
    );
    let records = RarityEngine::default().generate(&windows);

    let pioneer_titles = [
        "Trailblazer of the Week",
        "Pioneer of the Month",
        "Pioneer of the Year",
        "True Original",
    ];
    for (record, title) in records.iter().zip(pioneer_titles) {
        assert_eq!(record.category, NarrativeCategory::Pioneer);
        assert_eq!(record.title, title);
        assert!(!record.body.contains("{{"), "unrendered body: {}", record.body);
    }
}

#[test]
fn mixed_windows_pick_categories_in_priority_order() {
    let [week, month, year, all_time] = RarityEngine::default().generate(&parse(MIXED));

    assert_eq!(week.category, NarrativeCategory::Rare);
    assert_eq!(week.trend, None);

    assert_eq!(month.category, NarrativeCategory::Milestone);
    assert_eq!(month.milestone_value, Some(25));
    assert_eq!(month.trend, Some(Trend::Up));

    // 120 < 25 × 6
    assert_eq!(year.trend, Some(Trend::Down));
    assert_eq!(year.category, NarrativeCategory::Community);

    assert_eq!(all_time.category, NarrativeCategory::Community);
    assert_eq!(all_time.trend, None);
}

#[test]
fn always_four_records_in_window_order() {
    let engine = RarityEngine::default();
    for counts in [[0, 0, 0, 0], [1, 2, 3, 4], [10, 25, 50, 100], [999, 5, 77, 12]] {
        let [w, m, y, a] = counts.map(|c| WindowCount::new(c, 1000));
        let records = engine.generate(&TemporalWindowSet::new(w, m, y, a));
        let order: Vec<_> = records.iter().map(|r| r.timeframe).collect();
        assert_eq!(order, Timeframe::ALL.to_vec());
        assert!(records.iter().all(|r| !r.title.is_empty() && !r.body.is_empty()));
        if counts == [0, 0, 0, 0] {
            assert!(records.iter().all(|r| r.category == NarrativeCategory::Pioneer));
        }
    }
}

#[test]
fn zero_matches_is_pioneer_in_every_window() {
    let windows = TemporalWindowSet::new(
        WindowCount::new(0, 100),
        WindowCount::new(0, 400),
        WindowCount::new(0, 5000),
        WindowCount::new(0, 20000),
    );
    let records = RarityEngine::default().generate(&windows);
    for (record, timeframe) in records.iter().zip(Timeframe::ALL) {
        assert_eq!(record.timeframe, timeframe);
        assert_eq!(record.category, NarrativeCategory::Pioneer, "{timeframe}");
    }
}

#[test]
fn month_trend_against_weekly_pace() {
    let engine = RarityEngine::default();
    let trend_for = |month: i64| {
        let windows = TemporalWindowSet::new(
            WindowCount::new(10, 1000),
            WindowCount::new(month, 1000),
            WindowCount::new(100, 1000),
            WindowCount::new(100, 1000),
        );
        engine.generate(&windows)[1].trend
    };
    assert_eq!(trend_for(45), Some(Trend::Up));
    assert_eq!(trend_for(15), Some(Trend::Down));
    assert_eq!(trend_for(30), Some(Trend::Stable));
}

#[test]
fn degenerate_counts_are_clamped() {
    let windows = parse(
        r#"{"week":{"matches":-4,"total":0},"month":{"matches":500,"total":100},
            "year":{"matches":0,"total":-10},"allTime":{"matches":null,"total":null}}"#,
    );
    let report = RarityEngine::default().report(&windows);

    for window in &report.windows {
        assert!((0.0..=100.0).contains(&window.rarity.percentile));
        assert!(window.record.total >= 1);
    }
    assert_eq!(report.get(Timeframe::Week).rarity.tier, Tier::Elite);
    assert_eq!(report.get(Timeframe::Month).rarity.tier, Tier::Common);
    assert_eq!(report.get(Timeframe::Month).rarity.percentile, 0.0);
}

#[test]
fn classifier_boundaries() {
    let engine = RarityEngine::default();
    assert_eq!(engine.classify(0, 0).tier, Tier::Elite);
    assert_eq!(engine.classify(1, 100).tier, Tier::Elite);
    assert_eq!(engine.classify(5, 100).tier, Tier::Rare);
    assert_eq!(engine.classify(10, 100).tier, Tier::Unique);
    assert_eq!(engine.classify(25, 100).tier, Tier::Notable);
    assert_eq!(engine.classify(50, 100).tier, Tier::Popular);
    assert_eq!(engine.classify(51, 100).tier, Tier::Common);
    assert_eq!(engine.classify(100, 100).tier, Tier::Common);
}

#[test]
fn engine_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RarityEngine>();
}

#[test]
fn shipped_rules_match_builtin_behavior() {
    let from_disk = RarityEngine::from_rules_dir(&shipped_rules_dir(), true).unwrap();
    let windows = parse(MIXED);
    assert_eq!(from_disk.report(&windows), RarityEngine::default().report(&windows));
}

#[test]
fn custom_tier_document_retunes_classifier() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("tiers.yml"),
        r#"
apiVersion: v1
kind: TierConfig
metadata:
  id: tiers-strict
  name: Stricter tiers
spec:
  breakpoints:
    elite: 99.9
    rare: 99
    unique: 97
    notable: 90
    popular: 70
    common: 0
"#,
    )
    .unwrap();

    let engine = RarityEngine::from_rules_dir(dir.path(), true).unwrap();
    assert_eq!(engine.classify(1, 100).tier, Tier::Rare);
    assert_eq!(engine.classify(5, 100).tier, Tier::Notable);
    assert_eq!(engine.classify(40, 100).tier, Tier::Common);
    // Narrative defaults are untouched.
    assert_eq!(engine.generator().config().community_above, 10);
}

#[test]
fn strict_mode_fails_on_broken_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.yml"), "apiVersion: v1\nkind: [not a kind\n").unwrap();

    assert!(matches!(
        RarityEngine::from_rules_dir(dir.path(), true),
        Err(EngineError::LoadFailed { .. })
    ));

    let engine = RarityEngine::from_rules_dir(dir.path(), false).unwrap();
    assert_eq!(engine.classify(5, 100).tier, Tier::Rare);
}

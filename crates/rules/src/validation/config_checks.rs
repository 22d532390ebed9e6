//! Validation for the config rule kinds: TierConfig, NarrativeConfig,
//! NarrativeTemplates.

use rarity_core::Tier;

use super::ValidationResult;

use crate::narrative_config::{NarrativeConfigRule, TrendBounds};
use crate::schema::API_VERSION;
use crate::template_config::NarrativeTemplatesRule;
use crate::tier_config::TierConfigRule;

// ── Common metadata validation ──────────────────────────────────────

/// `^[a-z0-9]+(-[a-z0-9]+)*$`
fn is_kebab_case(s: &str) -> bool {
    !s.is_empty()
        && s.split('-').all(|part| {
            !part.is_empty() && part.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

fn validate_common_metadata(
    api_version: &str,
    kind: &str,
    expected_kind: &str,
    id: &str,
    result: &mut ValidationResult,
) {
    if api_version != API_VERSION {
        result.error(
            "apiVersion",
            format!("apiVersion must be '{API_VERSION}', got '{api_version}'"),
        );
    }
    if kind != expected_kind {
        result.error(
            "kind",
            format!("kind must be '{}', got '{}'", expected_kind, kind),
        );
    }
    if !is_kebab_case(id) {
        result.error(
            "metadata.id",
            format!(
                "id must be kebab-case (lowercase alphanumeric + hyphens), got '{}'",
                id
            ),
        );
    }
}

// ── TierConfig validation ───────────────────────────────────────────

pub fn validate_tier_config(rule: &TierConfigRule, result: &mut ValidationResult) {
    validate_common_metadata(
        &rule.api_version,
        &rule.kind,
        "TierConfig",
        &rule.metadata.id,
        result,
    );

    let b = &rule.spec.breakpoints;

    for tier in Tier::ALL {
        let v = b.lower_bound(tier);
        if !v.is_finite() || !(0.0..=100.0).contains(&v) {
            result.error(
                format!("spec.breakpoints.{}", tier),
                format!("breakpoint must be within [0, 100], got {}", v),
            );
        }
    }

    // Common is the catch-all: anything lower would leave [0, common) unclassified.
    if b.common != 0.0 {
        result.error(
            "spec.breakpoints.common",
            format!("common must be 0 so every percentile has a tier, got {}", b.common),
        );
    }

    for pair in Tier::ALL.windows(2) {
        let (rarer, commoner) = (pair[0], pair[1]);
        if b.lower_bound(rarer) <= b.lower_bound(commoner) {
            result.error(
                format!("spec.breakpoints.{}", rarer),
                format!(
                    "breakpoints must be strictly descending: {}({}) > {}({})",
                    rarer,
                    b.lower_bound(rarer),
                    commoner,
                    b.lower_bound(commoner)
                ),
            );
        }
    }
}

// ── NarrativeConfig validation ──────────────────────────────────────

fn validate_trend_bounds(path: &str, bounds: &TrendBounds, result: &mut ValidationResult) {
    for (name, v) in [("up", bounds.up), ("down", bounds.down)] {
        if !v.is_finite() || v < 0.0 {
            result.error(
                format!("{}.{}", path, name),
                format!("multiplier must be a non-negative number, got {}", v),
            );
        }
    }
    if bounds.down > bounds.up {
        result.error(
            path.to_string(),
            format!(
                "down multiplier ({}) must not exceed up multiplier ({})",
                bounds.down, bounds.up
            ),
        );
    }
}

pub fn validate_narrative_config(rule: &NarrativeConfigRule, result: &mut ValidationResult) {
    validate_common_metadata(
        &rule.api_version,
        &rule.kind,
        "NarrativeConfig",
        &rule.metadata.id,
        result,
    );

    validate_trend_bounds("spec.trend.month", &rule.spec.trend.month, result);
    validate_trend_bounds("spec.trend.year", &rule.spec.trend.year, result);

    let c = &rule.spec.categories;

    if c.rare_max <= c.pioneer_max {
        result.warn(
            "spec.categories.rare_max",
            format!(
                "rare_max ({}) <= pioneer_max ({}): the rare category can never match",
                c.rare_max, c.pioneer_max
            ),
        );
    }

    if c.milestones.is_empty() {
        result.warn(
            "spec.categories.milestones",
            "no milestones configured: the milestone category can never match".to_string(),
        );
    }
    if c.milestones.windows(2).any(|w| w[0] >= w[1]) {
        result.error(
            "spec.categories.milestones",
            "milestones must be strictly ascending".to_string(),
        );
    }
    for (i, m) in c.milestones.iter().enumerate() {
        if *m <= c.pioneer_max {
            result.warn(
                format!("spec.categories.milestones[{}]", i),
                format!(
                    "milestone {} is shadowed by pioneer_max ({}) and can never match",
                    m, c.pioneer_max
                ),
            );
        }
    }
}

// ── NarrativeTemplates validation ───────────────────────────────────

pub fn validate_narrative_templates(rule: &NarrativeTemplatesRule, result: &mut ValidationResult) {
    validate_common_metadata(
        &rule.api_version,
        &rule.kind,
        "NarrativeTemplates",
        &rule.metadata.id,
        result,
    );

    let env = minijinja::Environment::new();
    for (category, timeframe, pair) in rule.spec.entries() {
        for (field, source) in [("title", &pair.title), ("body", &pair.body)] {
            let path = format!("spec.templates.{}.{}.{}", category, timeframe, field);
            if source.trim().is_empty() {
                result.error(path.clone(), "template text must not be empty".to_string());
                continue;
            }
            let template = match env.template_from_str(source) {
                Ok(t) => t,
                Err(e) => {
                    result.error(path, format!("template does not parse: {}", e));
                    continue;
                }
            };
            // Unknown filters and functions only surface at render time.
            let sample = minijinja::context! {
                matches => 25u64,
                others => 24u64,
                total => 500u64,
                milestone => 25u64,
                period => timeframe.period_phrase(),
            };
            if let Err(e) = template.render(sample) {
                result.error(path, format!("template does not render: {}", e));
            }
        }
    }
}

//! Rarity classifier: `(matches, total)` → percentile and tier.

use tracing::trace;

use rarity_core::{RarityScore, TemporalWindowSet, Tier, Timeframe, WindowCount};
use rarity_rules::tier_config::CompiledTierConfig;

/// Match ratio and rarity percentile for a single window.
///
/// `total` is floored at 1 and the ratio is clamped to `[0, 1]`, so the
/// percentile always lands in `[0, 100]`. Fewer matches means a higher
/// percentile.
pub fn rarity_percentile(matches: u64, total: u64) -> (f64, f64) {
    let total = total.max(1);
    let matches = matches.min(total);
    // Integer numerator keeps boundary values like 95.0 exact.
    let ratio = matches as f64 / total as f64;
    let percentile = ((total - matches) as f64 * 100.0 / total as f64).clamp(0.0, 100.0);
    (ratio, percentile)
}

/// Maps percentiles onto tiers using a breakpoint table.
#[derive(Debug, Clone, Default)]
pub struct RarityClassifier {
    tiers: CompiledTierConfig,
}

impl RarityClassifier {
    pub fn new(tiers: CompiledTierConfig) -> Self {
        Self { tiers }
    }

    pub fn tiers(&self) -> &CompiledTierConfig {
        &self.tiers
    }

    pub fn classify(&self, matches: u64, total: u64) -> RarityScore {
        let total = total.max(1);
        let (ratio, percentile) = rarity_percentile(matches, total);

        // The extremes are pinned regardless of how the table is tuned.
        let tier = if matches == 0 {
            Tier::Elite
        } else if matches >= total {
            Tier::Common
        } else {
            self.tiers.tier_for(percentile)
        };

        trace!(matches, total, percentile, %tier, "classified");

        RarityScore {
            ratio,
            percentile,
            tier,
        }
    }

    pub fn classify_window(&self, window: &WindowCount) -> RarityScore {
        self.classify(window.matches, window.total)
    }

    /// Classify every window, in output order.
    pub fn classify_windows(&self, windows: &TemporalWindowSet) -> [(Timeframe, RarityScore); 4] {
        Timeframe::ALL.map(|t| (t, self.classify_window(windows.get(t))))
    }
}

//! Speed and scoring module
//!
//! Scoring is flat: every cleared line is worth the same number of points,
//! regardless of how many lines a single lock clears. Fall speed is a step
//! function of score unless the round pins it.

use crate::types::{FALL_INTERVALS_MS, MAX_SPEED_TIER, POINTS_PER_LINE, SCORE_PER_TIER};

/// Points for clearing `lines` rows with one lock
pub fn line_clear_points(lines: u32) -> u32 {
    lines.saturating_mul(POINTS_PER_LINE)
}

/// Speed tier earned by a score: `min(score / 5000, max tier)`
pub fn tier_for_score(score: u32) -> usize {
    ((score / SCORE_PER_TIER) as usize).min(MAX_SPEED_TIER)
}

/// Fall interval for a tier; tiers past the table use the fastest entry.
pub fn fall_interval_ms(tier: usize) -> u32 {
    FALL_INTERVALS_MS[tier.min(MAX_SPEED_TIER)]
}

/// How the fall interval is chosen for a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeedMode {
    /// Score-driven, never slower than `start_tier`.
    Progressive { start_tier: usize },
    /// One table tier for the whole round.
    Pinned { tier: usize },
    /// An arbitrary interval for the whole round.
    Fixed { interval_ms: u32 },
}

impl SpeedMode {
    /// Default marathon speed: progressive from the slowest tier.
    pub fn progressive() -> Self {
        SpeedMode::Progressive { start_tier: 0 }
    }

    pub fn pinned(tier: usize) -> Self {
        SpeedMode::Pinned { tier }
    }

    pub fn fixed(interval_ms: u32) -> Self {
        SpeedMode::Fixed { interval_ms }
    }

    /// Whether the interval is recomputed from score after every tick.
    pub fn is_progressive(&self) -> bool {
        matches!(self, SpeedMode::Progressive { .. })
    }

    /// Tier for the given score, or `None` for a fixed interval.
    pub fn tier(&self, score: u32) -> Option<usize> {
        match *self {
            SpeedMode::Progressive { start_tier } => {
                Some(start_tier.max(tier_for_score(score)).min(MAX_SPEED_TIER))
            }
            SpeedMode::Pinned { tier } => Some(tier.min(MAX_SPEED_TIER)),
            SpeedMode::Fixed { .. } => None,
        }
    }

    /// Fall interval for the given score
    pub fn interval_ms(&self, score: u32) -> u32 {
        match *self {
            SpeedMode::Fixed { interval_ms } => interval_ms,
            _ => self.tier(score).map_or(FALL_INTERVALS_MS[0], fall_interval_ms),
        }
    }
}

impl Default for SpeedMode {
    fn default() -> Self {
        Self::progressive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(0), 0);
        assert_eq!(line_clear_points(1), 100);
        assert_eq!(line_clear_points(4), 400);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(tier_for_score(0), 0);
        assert_eq!(tier_for_score(4_999), 0);
        assert_eq!(tier_for_score(5_000), 1);
        assert_eq!(tier_for_score(19_999), 3);
        assert_eq!(tier_for_score(20_000), 4);
        assert_eq!(tier_for_score(1_000_000), MAX_SPEED_TIER);
    }

    #[test]
    fn test_progressive_respects_start_tier() {
        let mode = SpeedMode::Progressive { start_tier: 2 };
        assert_eq!(mode.tier(0), Some(2));
        assert_eq!(mode.tier(15_000), Some(3));
        assert_eq!(mode.interval_ms(0), FALL_INTERVALS_MS[2]);
    }

    #[test]
    fn test_pinned_and_fixed_ignore_score() {
        let pinned = SpeedMode::pinned(3);
        assert_eq!(pinned.interval_ms(0), 40);
        assert_eq!(pinned.interval_ms(50_000), 40);

        let fixed = SpeedMode::fixed(250);
        assert_eq!(fixed.tier(0), None);
        assert_eq!(fixed.interval_ms(0), 250);
        assert_eq!(fixed.interval_ms(50_000), 250);
    }

    proptest! {
        #[test]
        fn progressive_interval_never_slows_down(gains in proptest::collection::vec(0u32..3_000, 1..60)) {
            let mode = SpeedMode::progressive();
            let mut score = 0u32;
            let mut last_tier = mode.tier(score).unwrap();
            let mut last_interval = mode.interval_ms(score);
            for gain in gains {
                score += gain;
                let tier = mode.tier(score).unwrap();
                let interval = mode.interval_ms(score);
                prop_assert!(tier >= last_tier);
                prop_assert!(interval <= last_interval);
                last_tier = tier;
                last_interval = interval;
            }
        }

        #[test]
        fn pinned_interval_is_constant(tier in 0usize..=MAX_SPEED_TIER, scores in proptest::collection::vec(0u32..200_000, 1..30)) {
            let mode = SpeedMode::pinned(tier);
            let expected = fall_interval_ms(tier);
            for score in scores {
                prop_assert_eq!(mode.interval_ms(score), expected);
            }
        }
    }
}

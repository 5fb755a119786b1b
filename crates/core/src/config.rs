//! Round configuration
//!
//! A [`RoundConfig`] is everything a host chooses before a round starts: board
//! size, speed policy, an optional line target, and an optional RNG seed.

use crate::error::{ConfigError, ConfigResult};
use crate::speed::SpeedMode;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, MAX_SPEED_TIER, SPRINT_LINE_TARGET};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundConfig {
    pub width: u8,
    pub height: u8,
    pub speed: SpeedMode,
    /// Round is won once this many lines are cleared.
    pub line_target: Option<u32>,
    /// Fixed seed for the piece generator; `None` picks one at random.
    pub seed: Option<u64>,
}

impl RoundConfig {
    /// Endless play with score-driven speed
    pub fn marathon() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            speed: SpeedMode::progressive(),
            line_target: None,
            seed: None,
        }
    }

    /// Clear 40 lines to win, score-driven speed
    pub fn sprint() -> Self {
        Self::marathon().with_line_target(SPRINT_LINE_TARGET)
    }

    /// Pinned speed tier, optionally limited to the sprint line target
    pub fn custom(tier: usize, limited: bool) -> Self {
        let config = Self::marathon().with_speed(SpeedMode::pinned(tier));
        if limited {
            config.with_line_target(SPRINT_LINE_TARGET)
        } else {
            config
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_line_target(mut self, lines: u32) -> Self {
        self.line_target = Some(lines);
        self
    }

    pub fn with_speed(mut self, speed: SpeedMode) -> Self {
        self.speed = speed;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.width != BOARD_WIDTH || self.height != BOARD_HEIGHT {
            return Err(ConfigError::UnsupportedBoardSize {
                width: self.width,
                height: self.height,
            });
        }

        match self.speed {
            SpeedMode::Progressive { start_tier: tier } | SpeedMode::Pinned { tier }
                if tier > MAX_SPEED_TIER =>
            {
                return Err(ConfigError::TierOutOfRange {
                    tier,
                    max: MAX_SPEED_TIER,
                });
            }
            SpeedMode::Fixed { interval_ms: 0 } => return Err(ConfigError::ZeroFallInterval),
            _ => {}
        }

        if self.line_target == Some(0) {
            return Err(ConfigError::ZeroLineTarget);
        }

        Ok(())
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::marathon()
    }
}

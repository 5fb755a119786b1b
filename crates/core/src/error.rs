//! Error types for round configuration
//!
//! Gameplay itself never fails: rejected moves and rotations are ordinary
//! outcomes. Only setting up a round can be refused.

use thiserror::Error;

use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Reasons a round configuration is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Board size other than the supported 10x20
    #[error("unsupported board size {width}x{height} (only {}x{} is supported)", BOARD_WIDTH, BOARD_HEIGHT)]
    UnsupportedBoardSize { width: u8, height: u8 },

    /// Speed tier past the end of the interval table
    #[error("speed tier {tier} out of range (max {max})")]
    TierOutOfRange { tier: usize, max: usize },

    /// A fixed fall interval of zero would drop a piece on every tick
    #[error("fixed fall interval must be non-zero")]
    ZeroFallInterval,

    /// A line target of zero would end the round before it starts
    #[error("line target must be non-zero")]
    ZeroLineTarget,
}

/// Result type alias for configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

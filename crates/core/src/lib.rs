//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules and state of a falling-block round. It does
//! no rendering, audio, or I/O, and never reads a system clock:
//!
//! - **Deterministic**: a seeded round given the same ticks plays out identically
//! - **Host-driven**: time advances only by the elapsed milliseconds passed to a tick
//! - **Owned**: one [`Controller`] per round, no process-wide state
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision testing and line clearing
//! - [`pieces`]: the seven shape matrices and 90° matrix rotation
//! - [`rng`]: uniform random piece generation
//! - [`speed`]: line-clear points and the score-driven fall speed
//! - [`repeat`]: held-key auto-repeat for horizontal moves and soft drop
//! - [`config`]: round configuration and validation
//! - [`controller`]: the round state machine (gravity, lock delay, scoring)
//! - [`snapshot`]: copyable views for rendering
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every piece is an independent uniform pick; repeats happen
//! - **Simple rotation**: rotate in place or not at all; no wall kicks
//! - **Lock delay**: 500ms once grounded, stretched up to 5s while the player keeps moving
//! - **Scoring**: 100 points per cleared line
//! - **Speed**: one tier faster per 5000 points, unless the round pins its speed
//! - **Sprint**: with a line target set, reaching it wins the round
//!
//! # Example
//!
//! ```
//! use zetris_core::{Controller, RoundConfig};
//! use zetris_core::types::{InputAction, InputEvent};
//!
//! let mut round = Controller::new(RoundConfig::sprint().with_seed(12345)).unwrap();
//!
//! round.tick(16, &[InputEvent::pressed(InputAction::MoveRight)]);
//! round.tick(16, &[InputEvent::pressed(InputAction::RotateCw)]);
//! let outcome = round.tick(16, &[InputEvent::pressed(InputAction::HardDrop)]);
//!
//! assert!(outcome.locked);
//! assert!(!outcome.round_over);
//! assert_eq!(round.pieces_locked(), 1);
//! ```
//!
//! # Timing
//!
//! Call [`Controller::tick`] once per frame with the milliseconds since the
//! previous call. Gravity, lock delay and key repeat all compare timestamps on
//! the accumulated round clock, so tick size does not change the rules.

pub mod board;
pub mod config;
pub mod controller;
pub mod error;
pub mod pieces;
pub mod repeat;
pub mod rng;
pub mod snapshot;
pub mod speed;

pub use zetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows, Grid};
pub use config::RoundConfig;
pub use controller::{Controller, Phase};
pub use error::{ConfigError, ConfigResult};
pub use pieces::{canonical_shape, Piece, Shape};
pub use repeat::AutoRepeat;
pub use rng::PieceGenerator;
pub use snapshot::{ActiveSnapshot, RoundSnapshot};
pub use speed::{fall_interval_ms, line_clear_points, tier_for_score, SpeedMode};

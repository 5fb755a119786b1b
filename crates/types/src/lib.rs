//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable by the core state machine, by hosts that render the game, and by tooling.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - Rows above the top (negative `y`) are open space used while spawning.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LOCK_DELAY_DEFAULT_MS` | 500 | Grace period before a grounded piece locks |
//! | `LOCK_DELAY_LIMIT_MS` | 5000 | Upper bound while the player keeps moving |
//! | `REPEAT_DELAY_MS` | 150 | Hold time before a key starts repeating |
//! | `REPEAT_INTERVAL_MS` | 50 | Interval between repeats |
//!
//! # Fall Intervals by Tier
//!
//! | Tier | Interval |
//! |------|----------|
//! | 0 | 100ms |
//! | 1 | 67ms |
//! | 2 | 50ms |
//! | 3 | 40ms |
//! | 4 | 33ms |
//!
//! # Examples
//!
//! ```
//! use zetris_types::{InputAction, InputEvent, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.as_str(), "t");
//!
//! let ev = InputEvent::pressed(InputAction::MoveLeft);
//! assert!(ev.is_pressed());
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Default lock delay once a piece is grounded.
pub const LOCK_DELAY_DEFAULT_MS: u32 = 500;

/// Lock delay ceiling while the player is actively moving the piece.
pub const LOCK_DELAY_LIMIT_MS: u32 = 5_000;

/// Hold time before a movement key starts auto-repeating.
pub const REPEAT_DELAY_MS: u32 = 150;

/// Interval between auto-repeated moves once repeating.
pub const REPEAT_INTERVAL_MS: u32 = 50;

/// Fall intervals by speed tier (milliseconds per row), slowest first.
pub const FALL_INTERVALS_MS: [u32; 5] = [100, 67, 50, 40, 33];

/// Highest speed tier index.
pub const MAX_SPEED_TIER: usize = FALL_INTERVALS_MS.len() - 1;

/// Score needed to advance one speed tier.
pub const SCORE_PER_TIER: u32 = 5_000;

/// Points awarded per cleared line.
pub const POINTS_PER_LINE: u32 = 100;

/// Line target of the sprint mode.
pub const SPRINT_LINE_TARGET: u32 = 40;

/// The seven tetromino piece kinds
///
/// The kind doubles as the tag written into board cells when a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in tag order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from its tag (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use zetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Lowercase tag
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Compact grid code (1..=7); 0 is reserved for empty cells.
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=7 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Logical actions a host can feed into a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Drop piece to the lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
}

impl InputAction {
    /// Actions that auto-repeat while held.
    pub fn is_repeatable(&self) -> bool {
        matches!(
            self,
            InputAction::MoveLeft | InputAction::MoveRight | InputAction::SoftDrop
        )
    }

    /// Parse action from a camelCase or lowercase name.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(InputAction::MoveLeft),
            "moveright" => Some(InputAction::MoveRight),
            "softdrop" => Some(InputAction::SoftDrop),
            "harddrop" => Some(InputAction::HardDrop),
            "rotatecw" => Some(InputAction::RotateCw),
            "rotateccw" => Some(InputAction::RotateCcw),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputAction::MoveLeft => "moveLeft",
            InputAction::MoveRight => "moveRight",
            InputAction::SoftDrop => "softDrop",
            InputAction::HardDrop => "hardDrop",
            InputAction::RotateCw => "rotateCw",
            InputAction::RotateCcw => "rotateCcw",
        }
    }
}

/// Whether a key went down this tick or is still being held from an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPhase {
    /// Edge-triggered: applied once, and counts as held for this tick.
    Pressed,
    /// Level-triggered: drives auto-repeat for movement actions.
    Held,
}

/// One logical input for a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputEvent {
    pub action: InputAction,
    pub phase: KeyPhase,
}

impl InputEvent {
    pub fn pressed(action: InputAction) -> Self {
        Self {
            action,
            phase: KeyPhase::Pressed,
        }
    }

    pub fn held(action: InputAction) -> Self {
        Self {
            action,
            phase: KeyPhase::Held,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.phase == KeyPhase::Pressed
    }
}

/// Why a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundEnd {
    /// A freshly spawned piece collided with the stack.
    ToppedOut,
    /// The configured line target was reached.
    LineTargetReached,
}

impl RoundEnd {
    pub fn is_win(&self) -> bool {
        matches!(self, RoundEnd::LineTargetReached)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundEnd::ToppedOut => "toppedOut",
            RoundEnd::LineTargetReached => "lineTargetReached",
        }
    }
}

/// Observable result of one tick.
///
/// `score` and `cleared_lines_total` are the totals after the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub lines_cleared: u32,
    pub locked: bool,
    pub round_over: bool,
    pub won: bool,
    pub score: u32,
    pub cleared_lines_total: u32,
}

use crate::pieces::{Piece, Shape};
use crate::types::{PieceKind, RoundEnd, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

/// Copyable, render-ready view of a round.
///
/// `board` holds piece codes: 0 for empty, 1..=7 for the kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: ActiveSnapshot,
    pub ghost_y: i8,
    pub next: PieceKind,
    pub score: u32,
    pub cleared_lines: u32,
    pub pieces_locked: u32,
    pub speed_tier: Option<usize>,
    pub fall_interval_ms: u32,
    pub grounded: bool,
    pub paused: bool,
    pub round_end: Option<RoundEnd>,
    pub elapsed_ms: u64,
    pub seed: u64,
}

impl RoundSnapshot {
    pub fn round_over(&self) -> bool {
        self.round_end.is_some()
    }

    pub fn playable(&self) -> bool {
        !self.round_over() && !self.paused
    }
}

impl Default for RoundSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: Piece::spawn(PieceKind::I).into(),
            ghost_y: 0,
            next: PieceKind::I,
            score: 0,
            cleared_lines: 0,
            pieces_locked: 0,
            speed_tier: None,
            fall_interval_ms: 0,
            grounded: false,
            paused: false,
            round_end: None,
            elapsed_ms: 0,
            seed: 0,
        }
    }
}

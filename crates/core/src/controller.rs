//! Controller module - owns a round and drives it one tick at a time
//!
//! The controller ties together the board, the active and next pieces, piece
//! generation, held-key auto-repeat, gravity, lock delay, and score/speed
//! progression. Time only moves when the host passes elapsed milliseconds to
//! [`Controller::tick`]; every timer is a timestamp on that round clock.
//!
//! Per tick, in order: edge-triggered moves, auto-repeated moves, rotations,
//! hard drop, gravity, the lock-delay check, then the speed refresh. Once the
//! round ends only the speed refresh still runs.
//!
//! Mutating calls after the round is over (or while paused) are ignored.

use tracing::{debug, info, trace};

use crate::board::{Board, Grid};
use crate::config::RoundConfig;
use crate::error::ConfigResult;
use crate::pieces::Piece;
use crate::repeat::AutoRepeat;
use crate::rng::PieceGenerator;
use crate::snapshot::RoundSnapshot;
use crate::speed::line_clear_points;
use crate::types::{
    InputAction, InputEvent, PieceKind, RoundEnd, TickOutcome, LOCK_DELAY_DEFAULT_MS,
    LOCK_DELAY_LIMIT_MS,
};

/// Where the active piece is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Normal play.
    Falling,
    /// A gravity step failed; the lock-delay timer runs from `since_ms`.
    Grounded { since_ms: u64 },
    /// Terminal until the next reset.
    Over(RoundEnd),
}

/// Lock/clear results collected while a call runs.
#[derive(Debug, Clone, Copy, Default)]
struct Frame {
    lines_cleared: u32,
    locked: bool,
}

/// A single round of play, exclusively owned by its host
#[derive(Debug, Clone)]
pub struct Controller {
    config: RoundConfig,
    board: Board,
    active: Piece,
    next: PieceKind,
    generator: PieceGenerator,
    repeat: AutoRepeat,
    phase: Phase,
    paused: bool,
    score: u32,
    cleared_lines: u32,
    pieces_locked: u32,
    speed_tier: Option<usize>,
    fall_interval_ms: u32,
    /// Round clock: sum of all elapsed time passed to `tick`.
    now_ms: u64,
    last_fall_ms: u64,
}

impl Controller {
    /// Validate `config` and start a round
    pub fn new(config: RoundConfig) -> ConfigResult<Self> {
        config.validate()?;

        let mut generator = PieceGenerator::from_optional_seed(config.seed);
        let active = Piece::spawn(generator.draw());
        let next = generator.draw();

        let mut controller = Self {
            config,
            board: Board::new(),
            active,
            next,
            generator,
            repeat: AutoRepeat::new(),
            phase: Phase::Falling,
            paused: false,
            score: 0,
            cleared_lines: 0,
            pieces_locked: 0,
            speed_tier: config.speed.tier(0),
            fall_interval_ms: config.speed.interval_ms(0),
            now_ms: 0,
            last_fall_ms: 0,
        };
        controller.check_spawn();

        debug!(
            seed = controller.generator.seed(),
            line_target = ?config.line_target,
            fall_interval_ms = controller.fall_interval_ms,
            "round started"
        );
        Ok(controller)
    }

    /// Replace the configuration and start a fresh round.
    ///
    /// On error the current round is left untouched.
    pub fn reset(&mut self, config: RoundConfig) -> ConfigResult<()> {
        *self = Self::new(config)?;
        Ok(())
    }

    /// Start a fresh round with the current configuration.
    ///
    /// A configured seed replays the same piece sequence; otherwise a new seed is drawn.
    pub fn restart(&mut self) -> ConfigResult<()> {
        self.reset(self.config)
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn grid_snapshot(&self) -> Grid {
        self.board.to_grid()
    }

    pub fn active_piece(&self) -> Piece {
        self.active
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn cleared_lines(&self) -> u32 {
        self.cleared_lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Current table tier, `None` when the round uses a fixed interval
    pub fn speed_tier(&self) -> Option<usize> {
        self.speed_tier
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_grounded(&self) -> bool {
        matches!(self.phase, Phase::Grounded { .. })
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_round_over(&self) -> bool {
        matches!(self.phase, Phase::Over(_))
    }

    pub fn round_end(&self) -> Option<RoundEnd> {
        match self.phase {
            Phase::Over(end) => Some(end),
            _ => None,
        }
    }

    /// Milliseconds of play so far (paused time excluded)
    pub fn elapsed_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    /// Row the active piece would land on if hard dropped
    pub fn ghost_y(&self) -> i8 {
        let piece = &self.active;
        let mut y = piece.y;
        while !self.board.collides(&piece.shape, piece.x, y + 1) {
            y += 1;
        }
        y
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let mut snap = RoundSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.into();
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.score = self.score;
        out.cleared_lines = self.cleared_lines;
        out.pieces_locked = self.pieces_locked;
        out.speed_tier = self.speed_tier;
        out.fall_interval_ms = self.fall_interval_ms;
        out.grounded = self.is_grounded();
        out.paused = self.paused;
        out.round_end = self.round_end();
        out.elapsed_ms = self.now_ms;
        out.seed = self.generator.seed();
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.repeat.reset();
            debug!("round paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            debug!("round resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Whether mutating calls are accepted right now.
    fn accepts_input(&self) -> bool {
        if let Phase::Over(end) = self.phase {
            debug!(?end, "call ignored: round is over");
            return false;
        }
        !self.paused
    }

    pub fn move_left(&mut self) -> bool {
        self.accepts_input() && self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.accepts_input() && self.try_move(1, 0)
    }

    pub fn soft_drop(&mut self) -> bool {
        self.accepts_input() && self.try_move(0, 1)
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.accepts_input() && self.try_rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.accepts_input() && self.try_rotate(false)
    }

    /// Drop the active piece as far as it goes and lock it immediately.
    pub fn hard_drop(&mut self) -> TickOutcome {
        let mut frame = Frame::default();
        if self.accepts_input() {
            self.hard_drop_inner(&mut frame);
            self.refresh_speed();
        }
        self.outcome(frame)
    }

    /// Advance the round by `elapsed_ms` and apply this tick's input events.
    pub fn tick(&mut self, elapsed_ms: u32, events: &[InputEvent]) -> TickOutcome {
        let mut frame = Frame::default();
        if !self.accepts_input() {
            return self.outcome(frame);
        }

        self.now_ms += elapsed_ms as u64;
        let now = self.now_ms;

        for ev in events.iter().filter(|ev| ev.is_pressed()) {
            match ev.action {
                InputAction::MoveLeft => {
                    self.try_move(-1, 0);
                }
                InputAction::MoveRight => {
                    self.try_move(1, 0);
                }
                InputAction::SoftDrop => {
                    self.try_move(0, 1);
                }
                _ => {}
            }
        }

        for action in self.repeat.update(now, events) {
            match action {
                InputAction::MoveLeft => self.try_move(-1, 0),
                InputAction::MoveRight => self.try_move(1, 0),
                InputAction::SoftDrop => self.try_move(0, 1),
                _ => false,
            };
        }
        let moving = self.repeat.is_holding();

        for ev in events.iter().filter(|ev| ev.is_pressed()) {
            match ev.action {
                InputAction::RotateCcw => {
                    self.try_rotate(false);
                }
                InputAction::RotateCw => {
                    self.try_rotate(true);
                }
                _ => {}
            }
        }

        if events
            .iter()
            .any(|ev| ev.is_pressed() && ev.action == InputAction::HardDrop)
        {
            self.hard_drop_inner(&mut frame);
            if self.is_round_over() {
                self.refresh_speed();
                return self.outcome(frame);
            }
        }

        self.apply_gravity(now);

        if let Phase::Grounded { since_ms } = self.phase {
            let grounded_for = now.saturating_sub(since_ms);
            let delay = if moving && grounded_for < LOCK_DELAY_LIMIT_MS as u64 {
                LOCK_DELAY_LIMIT_MS
            } else {
                LOCK_DELAY_DEFAULT_MS
            };
            // A piece moved off its ledge keeps its timer but waits for gravity.
            if grounded_for >= delay as u64 && self.is_resting() {
                self.lock_active(&mut frame);
            }
        }

        self.refresh_speed();
        self.outcome(frame)
    }

    /// Shift the active piece if the target position is free.
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let piece = &self.active;
        if self.board.collides(&piece.shape, piece.x + dx, piece.y + dy) {
            return false;
        }
        self.active.x += dx;
        self.active.y += dy;
        true
    }

    /// Rotate in place; rejected outright if the rotated shape collides.
    pub(crate) fn try_rotate(&mut self, clockwise: bool) -> bool {
        let piece = &self.active;
        let rotated = if clockwise {
            piece.shape.rotate_cw()
        } else {
            piece.shape.rotate_ccw()
        };

        if self.board.collides(&rotated, piece.x, piece.y) {
            trace!(kind = piece.kind.as_str(), clockwise, "rotation rejected");
            return false;
        }
        self.active.shape = rotated;
        true
    }

    /// Whether the active piece cannot move down from where it is.
    fn is_resting(&self) -> bool {
        let piece = &self.active;
        self.board.collides(&piece.shape, piece.x, piece.y + 1)
    }

    fn hard_drop_inner(&mut self, frame: &mut Frame) {
        while self.try_move(0, 1) {}
        self.lock_active(frame);
        self.last_fall_ms = self.now_ms;
    }

    fn apply_gravity(&mut self, now: u64) {
        if now.saturating_sub(self.last_fall_ms) < self.fall_interval_ms as u64 {
            return;
        }

        if self.try_move(0, 1) {
            self.phase = Phase::Falling;
        } else if self.phase == Phase::Falling {
            // Anchored to the first failed step; later failures keep the timer.
            self.phase = Phase::Grounded { since_ms: now };
        }
        self.last_fall_ms = now;
    }

    /// Write the active piece into the board, clear rows, score, and advance pieces.
    fn lock_active(&mut self, frame: &mut Frame) {
        let piece = self.active;
        self.board.lock(&piece.shape, piece.x, piece.y, piece.kind);

        let lines = self.board.clear_filled_rows().len() as u32;
        self.score = self.score.saturating_add(line_clear_points(lines));
        self.cleared_lines += lines;
        self.pieces_locked += 1;
        frame.lines_cleared += lines;
        frame.locked = true;

        debug!(
            kind = piece.kind.as_str(),
            x = piece.x,
            y = piece.y,
            lines,
            score = self.score,
            cleared_lines = self.cleared_lines,
            "piece locked"
        );

        self.active = Piece::spawn(self.next);
        self.next = self.generator.draw();
        self.phase = Phase::Falling;

        if let Some(target) = self.config.line_target {
            if self.cleared_lines >= target {
                self.end_round(RoundEnd::LineTargetReached);
                return;
            }
        }
        self.check_spawn();
    }

    /// End the round if the active piece collides where it spawned.
    fn check_spawn(&mut self) {
        let piece = &self.active;
        if self.board.collides(&piece.shape, piece.x, piece.y) {
            self.end_round(RoundEnd::ToppedOut);
        }
    }

    fn end_round(&mut self, end: RoundEnd) {
        self.phase = Phase::Over(end);
        self.repeat.reset();
        info!(
            won = end.is_win(),
            reason = end.as_str(),
            score = self.score,
            cleared_lines = self.cleared_lines,
            pieces = self.pieces_locked,
            "round over"
        );
    }

    fn refresh_speed(&mut self) {
        if !self.config.speed.is_progressive() {
            return;
        }
        let tier = self.config.speed.tier(self.score);
        if tier != self.speed_tier {
            self.speed_tier = tier;
            self.fall_interval_ms = self.config.speed.interval_ms(self.score);
            debug!(tier = ?tier, fall_interval_ms = self.fall_interval_ms, "speed tier changed");
        }
    }

    fn outcome(&self, frame: Frame) -> TickOutcome {
        let end = self.round_end();
        TickOutcome {
            lines_cleared: frame.lines_cleared,
            locked: frame.locked,
            round_over: end.is_some(),
            won: end.is_some_and(|e| e.is_win()),
            score: self.score,
            cleared_lines_total: self.cleared_lines,
        }
    }
}

//! Headless round runner (default binary).
//!
//! Plays one round with a seeded random input script at a fixed tick size and
//! prints a summary. Useful for soak runs, replaying seeds, and eyeballing the
//! engine without a frontend.
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use zetris::core::{Controller, RoundConfig, RoundSnapshot};
use zetris::types::{InputAction, InputEvent, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Endless, score-driven speed.
    Marathon,
    /// Clear 40 lines to win.
    Sprint,
    /// Pinned speed tier (see --tier and --limit).
    Custom,
}

#[derive(Parser, Debug)]
#[command(name = "zetris-sim", version, about)]
struct Args {
    /// Piece generator seed. If omitted, one is drawn at random and reported.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = Mode::Marathon)]
    mode: Mode,

    /// Speed tier for --mode custom (0 = slowest).
    #[arg(long, default_value_t = 0)]
    tier: usize,

    /// For --mode custom: stop at the 40 line target.
    #[arg(long)]
    limit: bool,

    /// Maximum number of ticks to run.
    #[arg(long, default_value_t = 20_000)]
    frames: u32,

    /// Milliseconds passed to each tick.
    #[arg(long, default_value_t = 16)]
    tick_ms: u32,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    mode: &'static str,
    frames: u32,
    elapsed_ms: u64,
    score: u32,
    cleared_lines: u32,
    pieces_locked: u32,
    speed_tier: Option<usize>,
    fall_interval_ms: u32,
    round_over: bool,
    won: bool,
    end_reason: Option<&'static str>,
}

impl RunSummary {
    fn new(mode: Mode, frames: u32, snap: &RoundSnapshot) -> Self {
        Self {
            seed: snap.seed,
            mode: match mode {
                Mode::Marathon => "marathon",
                Mode::Sprint => "sprint",
                Mode::Custom => "custom",
            },
            frames,
            elapsed_ms: snap.elapsed_ms,
            score: snap.score,
            cleared_lines: snap.cleared_lines,
            pieces_locked: snap.pieces_locked,
            speed_tier: snap.speed_tier,
            fall_interval_ms: snap.fall_interval_ms,
            round_over: snap.round_over(),
            won: snap.round_end.is_some_and(|end| end.is_win()),
            end_reason: snap.round_end.map(|end| end.as_str()),
        }
    }
}

/// Random key script: occasional presses, with left/right/down sometimes held for a while.
struct InputScript {
    rng: StdRng,
    held: Option<(InputAction, u32)>,
}

impl InputScript {
    const PRESSABLE: [InputAction; 6] = [
        InputAction::MoveLeft,
        InputAction::MoveRight,
        InputAction::SoftDrop,
        InputAction::RotateCw,
        InputAction::RotateCcw,
        InputAction::HardDrop,
    ];

    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed ^ 0x5eed_1e55),
            held: None,
        }
    }

    fn next_frame(&mut self, out: &mut Vec<InputEvent>) {
        out.clear();

        if let Some((action, frames_left)) = self.held.take() {
            out.push(InputEvent::held(action));
            if frames_left > 1 {
                self.held = Some((action, frames_left - 1));
            }
            return;
        }

        // Roughly one press every 8 frames.
        if !self.rng.gen_bool(0.125) {
            return;
        }
        let action = Self::PRESSABLE[self.rng.gen_range(0..Self::PRESSABLE.len())];
        out.push(InputEvent::pressed(action));
        if action.is_repeatable() && self.rng.gen_bool(0.3) {
            self.held = Some((action, self.rng.gen_range(5..30)));
        }
    }
}

fn round_config(args: &Args) -> RoundConfig {
    let config = match args.mode {
        Mode::Marathon => RoundConfig::marathon(),
        Mode::Sprint => RoundConfig::sprint(),
        Mode::Custom => RoundConfig::custom(args.tier, args.limit),
    };
    match args.seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    }
}

fn render_board(snap: &RoundSnapshot) -> String {
    let width = BOARD_WIDTH as usize;
    let mut out = String::with_capacity((width + 3) * (snap.board.len() + 1));
    for row in &snap.board {
        out.push('|');
        for &code in row {
            out.push(if code == 0 { '.' } else { '#' });
        }
        out.push_str("|\n");
    }
    out.push('+');
    out.push_str(&"-".repeat(width));
    out.push('+');
    out
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = round_config(&args);
    let mut round = Controller::new(config).context("invalid round configuration")?;

    info!(seed = round.seed(), mode = ?args.mode, frames = args.frames, "simulation started");

    let mut script = InputScript::new(round.seed());
    let mut events = Vec::with_capacity(2);
    let mut frames = 0;
    while frames < args.frames && !round.is_round_over() {
        script.next_frame(&mut events);
        round.tick(args.tick_ms, &events);
        frames += 1;
    }

    let snap = round.snapshot();
    let summary = RunSummary::new(args.mode, frames, &snap);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", render_board(&snap));
        println!(
            "seed {}  mode {}  frames {}  elapsed {}ms",
            summary.seed, summary.mode, summary.frames, summary.elapsed_ms
        );
        println!(
            "score {}  lines {}  pieces {}  fall {}ms",
            summary.score, summary.cleared_lines, summary.pieces_locked, summary.fall_interval_ms
        );
        match summary.end_reason {
            Some(reason) => println!("round over: {reason}"),
            None => println!("round still running"),
        }
    }

    Ok(())
}

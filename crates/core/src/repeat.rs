//! Held-key auto-repeat for movement actions.
//!
//! Only MoveLeft, MoveRight and SoftDrop repeat. A key counts as held on any
//! tick whose events mention it (a `Pressed` event also starts the hold). Once
//! held for the repeat delay it fires, then at most once per repeat interval.
//! A key missing from a tick's events is released.

use arrayvec::ArrayVec;

use crate::types::{InputAction, InputEvent, REPEAT_DELAY_MS, REPEAT_INTERVAL_MS};

const REPEAT_KEYS: [InputAction; 3] = [
    InputAction::MoveLeft,
    InputAction::MoveRight,
    InputAction::SoftDrop,
];

/// Repeated actions produced by one update, in key order.
pub type Repeats = ArrayVec<InputAction, 3>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct KeyHold {
    pressed_at_ms: Option<u64>,
    last_repeat_ms: Option<u64>,
}

impl KeyHold {
    fn release(&mut self) {
        *self = Self::default();
    }
}

/// Tracks hold state for the repeatable keys
#[derive(Debug, Clone)]
pub struct AutoRepeat {
    keys: [KeyHold; 3],
    delay_ms: u32,
    interval_ms: u32,
}

impl AutoRepeat {
    pub fn new() -> Self {
        Self::with_config(REPEAT_DELAY_MS, REPEAT_INTERVAL_MS)
    }

    pub fn with_config(delay_ms: u32, interval_ms: u32) -> Self {
        Self {
            keys: [KeyHold::default(); 3],
            delay_ms,
            interval_ms,
        }
    }

    /// Advance hold tracking to `now_ms` and return the moves that repeat this tick.
    pub fn update(&mut self, now_ms: u64, events: &[InputEvent]) -> Repeats {
        let mut repeats = Repeats::new();

        for (key, action) in self.keys.iter_mut().zip(REPEAT_KEYS) {
            let held = events.iter().any(|ev| ev.action == action);
            if !held {
                key.release();
                continue;
            }

            let pressed_at = *key.pressed_at_ms.get_or_insert(now_ms);
            if now_ms.saturating_sub(pressed_at) < self.delay_ms as u64 {
                continue;
            }

            let due = match key.last_repeat_ms {
                None => true,
                Some(last) => now_ms.saturating_sub(last) >= self.interval_ms as u64,
            };
            if due {
                repeats.push(action);
                key.last_repeat_ms = Some(now_ms);
            }
        }

        repeats
    }

    /// Whether any movement key is currently held.
    pub fn is_holding(&self) -> bool {
        self.keys.iter().any(|key| key.pressed_at_ms.is_some())
    }

    pub fn reset(&mut self) {
        for key in &mut self.keys {
            key.release();
        }
    }
}

impl Default for AutoRepeat {
    fn default() -> Self {
        Self::new()
    }
}

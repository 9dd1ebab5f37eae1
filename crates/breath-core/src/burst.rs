//! Burst state machine.
//!
//! A trigger opens a short burst window. While it is open, a pulse fires
//! every [`BURST_EMIT_PERIOD_TICKS`] ticks counted from the trigger tick, so
//! the trigger tick itself always pulses.

use serde::{Deserialize, Serialize};

/// Ticks between pulses inside a burst.
pub const BURST_EMIT_PERIOD_TICKS: u64 = 3;

/// Whether a burst is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum BurstState {
    Idle,
    Bursting {
        /// First tick after the burst
        until: u64,
    },
}

impl BurstState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BurstState::Idle => "idle",
            BurstState::Bursting { .. } => "bursting",
        }
    }
}

/// Tracks the current burst window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BurstStateMachine {
    start_tick: u64,
    end_tick: u64,
}

impl BurstStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a burst at `now` lasting `duration_ticks`.
    pub fn start(&mut self, now: u64, duration_ticks: u64) {
        self.start_tick = now;
        self.end_tick = now.saturating_add(duration_ticks);
    }

    /// True while `now` is inside the burst window.
    pub fn is_active(&self, now: u64) -> bool {
        now < self.end_tick
    }

    /// True if a visual should be emitted at `now`.
    pub fn pulse(&self, now: u64) -> bool {
        self.is_active(now)
            && now >= self.start_tick
            && (now - self.start_tick) % BURST_EMIT_PERIOD_TICKS == 0
    }

    pub fn state(&self, now: u64) -> BurstState {
        if self.is_active(now) {
            BurstState::Bursting {
                until: self.end_tick,
            }
        } else {
            BurstState::Idle
        }
    }

    /// First tick after the current (or last) burst.
    pub fn end_tick(&self) -> u64 {
        self.end_tick
    }
}

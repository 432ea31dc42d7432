//! Per-player countdown clock.
//!
//! The clock is driven from outside: each call to [`TurnClock::tick`] stands
//! for one elapsed second charged to whichever side is to move at that
//! moment. It never reads the wall clock itself, so tests can drive it
//! deterministically.

use crate::types::Color;
use serde::{Deserialize, Serialize};

/// Default allotment per side: ten minutes.
pub const DEFAULT_ALLOTMENT_SECS: u32 = 600;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockPhase {
    Idle,
    Running,
    Expired,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockTick {
    /// The clock was not running; nothing changed.
    Ignored,
    Ticked { color: Color, remaining: u32 },
    /// `loser` ran out of time; the clock is now expired.
    Expired { loser: Color },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnClock {
    allotment: u32,
    white: u32,
    black: u32,
    phase: ClockPhase,
}

impl Default for TurnClock {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOTMENT_SECS)
    }
}

impl TurnClock {
    pub fn new(allotment_secs: u32) -> Self {
        Self {
            allotment: allotment_secs,
            white: allotment_secs,
            black: allotment_secs,
            phase: ClockPhase::Idle,
        }
    }

    /// Refills both sides and starts running.
    pub fn start(&mut self) {
        self.white = self.allotment;
        self.black = self.allotment;
        self.phase = ClockPhase::Running;
    }

    /// Back to idle with a full allotment for both sides.
    pub fn reset(&mut self) {
        self.white = self.allotment;
        self.black = self.allotment;
        self.phase = ClockPhase::Idle;
    }

    /// Charges one second to `active`.
    pub fn tick(&mut self, active: Color) -> ClockTick {
        if self.phase != ClockPhase::Running {
            return ClockTick::Ignored;
        }

        let slot = match active {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        };
        *slot = slot.saturating_sub(1);
        let remaining = *slot;

        if remaining == 0 {
            self.phase = ClockPhase::Expired;
            return ClockTick::Expired { loser: active };
        }
        ClockTick::Ticked {
            color: active,
            remaining,
        }
    }

    pub fn remaining(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn allotment(&self) -> u32 {
        self.allotment
    }

    pub fn phase(&self) -> ClockPhase {
        self.phase
    }
}

/// Format seconds as `M:SS`.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod clock_tests;

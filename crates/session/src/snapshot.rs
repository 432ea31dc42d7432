//! Read-only session snapshots for renderers

use chess_core::{Board, ClockPhase, Color, Piece, Square};
use serde::Serialize;

use crate::session::{GameMode, SessionStatus};

/// Everything a renderer needs after a state change. Owned copies only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub board: Board,
    /// Board in placement notation (rank 8 first)
    pub placement: String,
    pub current_player: Color,
    pub mode: Option<GameMode>,
    pub status: SessionStatus,
    pub status_message: String,
    pub selection: Option<Square>,
    /// Move list in display notation, oldest first
    pub history: Vec<String>,
    pub captured_by_white: Vec<Piece>,
    pub captured_by_black: Vec<Piece>,
    pub white_remaining_secs: u32,
    pub black_remaining_secs: u32,
    pub clock_phase: ClockPhase,
}

impl SessionSnapshot {
    pub fn remaining(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white_remaining_secs,
            Color::Black => self.black_remaining_secs,
        }
    }

    pub fn captured_by(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.captured_by_white,
            Color::Black => &self.captured_by_black,
        }
    }

    /// Move list numbered one entry per ply, e.g. `1. Pe2 → e4`.
    pub fn numbered_history(&self) -> Vec<String> {
        self.history
            .iter()
            .enumerate()
            .map(|(i, n)| format!("{}. {}", i + 1, n))
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

//! Move application and reversal.
//!
//! [`GameState`] bundles everything a move touches: the board, the history
//! stack, the capture ledger and the side to move. `apply` trusts its caller
//! to have checked legality with [`crate::rules::is_legal`] first.

use crate::{board::Board, types::*};
use serde::{Deserialize, Serialize};

/// One applied move, as it looked when it was made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
}

impl MoveRecord {
    /// Display form used by the move list, e.g. `Pe2 → e4`.
    pub fn notation(&self) -> String {
        format!("{}{} → {}", self.piece.kind.initial(), self.from, self.to)
    }
}

/// Pieces each color has taken from the opponent, in capture order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedLedger {
    white: Vec<Piece>,
    black: Vec<Piece>,
}

impl CapturedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captured_by(&self, captor: Color) -> &[Piece] {
        match captor {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn record(&mut self, captor: Color, piece: Piece) {
        self.entries_mut(captor).push(piece);
    }

    /// Removes the earliest entry of `kind` from `captor`'s list.
    ///
    /// Matching is by kind only, so with several captured pieces of the same
    /// kind the oldest one goes, not necessarily the one taken last.
    pub fn remove_first_of_kind(&mut self, captor: Color, kind: PieceKind) -> Option<Piece> {
        let entries = self.entries_mut(captor);
        let idx = entries.iter().position(|p| p.kind == kind)?;
        Some(entries.remove(idx))
    }

    pub fn clear(&mut self) {
        self.white.clear();
        self.black.clear();
    }

    fn entries_mut(&mut self, captor: Color) -> &mut Vec<Piece> {
        match captor {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

/// Board, move history, capture ledger and side to move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub history: Vec<MoveRecord>,
    pub ledger: CapturedLedger,
    pub side_to_move: Color,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard starting position with White to move.
    pub fn new() -> Self {
        Self::from_board(Board::startpos(), Color::White)
    }

    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            history: Vec::new(),
            ledger: CapturedLedger::new(),
            side_to_move,
        }
    }

    /// Applies a move already accepted by the validator.
    ///
    /// Any piece on `to` is captured and credited to the side to move.
    /// The record is pushed before the board changes; the turn flips last.
    pub fn apply(&mut self, from: Square, piece: Piece, to: Square) -> MoveRecord {
        let captured = self.board.piece_at(to);
        if let Some(cp) = captured {
            self.ledger.record(self.side_to_move, cp);
        }

        let record = MoveRecord {
            from,
            to,
            piece,
            captured,
        };
        self.history.push(record);

        self.board.place(to, Some(piece));
        self.board.place(from, None);

        self.side_to_move = self.side_to_move.other();
        record
    }

    /// Takes back the most recent move. Returns false when there is none.
    pub fn undo(&mut self) -> bool {
        let Some(record) = self.history.pop() else {
            return false;
        };

        self.board.place(record.from, Some(record.piece));
        self.board.place(record.to, record.captured);

        let mover = self.side_to_move.other();
        if let Some(cp) = record.captured {
            self.ledger.remove_first_of_kind(mover, cp.kind);
        }

        self.side_to_move = mover;
        true
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    pub fn notation_history(&self) -> Vec<String> {
        self.history.iter().map(MoveRecord::notation).collect()
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod executor_tests;

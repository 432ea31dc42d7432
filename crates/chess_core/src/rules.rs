//! Movement rules per piece kind.
//!
//! Legality here is purely geometric plus occupancy: there is no notion of
//! check, so a move that leaves the mover's king attacked is still legal.
//! Castling, en passant and promotion do not exist in this game.

use crate::{board::Board, types::*};
use std::collections::BTreeSet;

/// Whether `piece`, standing on `from`, may move to `to`.
pub fn is_legal(board: &Board, from: Square, piece: Piece, to: Square) -> bool {
    let target = board.piece_at(to);
    if let Some(t) = target {
        if t.color == piece.color {
            return false;
        }
    }

    let dr = to.row as i8 - from.row as i8;
    let dc = to.col as i8 - from.col as i8;

    match piece.kind {
        PieceKind::Pawn => pawn_move(board, from, piece.color, dr, dc, target.is_some()),
        PieceKind::Knight => {
            let (ar, ac) = (dr.abs(), dc.abs());
            (ar == 2 && ac == 1) || (ar == 1 && ac == 2)
        }
        PieceKind::Bishop => is_diagonal(dr, dc) && path_clear(board, from, to),
        PieceKind::Rook => is_straight(dr, dc) && path_clear(board, from, to),
        PieceKind::Queen => {
            (is_diagonal(dr, dc) || is_straight(dr, dc)) && path_clear(board, from, to)
        }
        PieceKind::King => dr.abs() <= 1 && dc.abs() <= 1,
    }
}

fn pawn_move(board: &Board, from: Square, color: Color, dr: i8, dc: i8, capture: bool) -> bool {
    let dir = color.forward();

    if dc == 0 && !capture {
        if dr == dir {
            return true;
        }
        // Double step: the square passed over must be empty as well.
        if from.row == color.pawn_row() && dr == 2 * dir {
            return from.offset(dir, 0).is_some_and(|mid| board.is_empty(mid));
        }
        return false;
    }

    // Diagonal steps only capture.
    dc.abs() == 1 && dr == dir && capture
}

fn is_diagonal(dr: i8, dc: i8) -> bool {
    dr != 0 && dr.abs() == dc.abs()
}

fn is_straight(dr: i8, dc: i8) -> bool {
    (dr == 0) != (dc == 0)
}

/// True when every square strictly between `from` and `to` is empty.
///
/// Walks the unit step (sign of row delta, sign of column delta) from the
/// origin; only meaningful for straight or diagonal lines.
pub fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let step_r = (to.row as i8 - from.row as i8).signum();
    let step_c = (to.col as i8 - from.col as i8).signum();

    let mut cur = from;
    loop {
        cur = match cur.offset(step_r, step_c) {
            Some(next) => next,
            None => return false,
        };
        if cur == to {
            return true;
        }
        if !board.is_empty(cur) {
            return false;
        }
    }
}

/// Destinations reachable from `from` by the piece standing there.
pub fn legal_destinations(board: &Board, from: Square) -> BTreeSet<Square> {
    match board.piece_at(from) {
        Some(pc) => Square::all()
            .filter(|&to| is_legal(board, from, pc, to))
            .collect(),
        None => BTreeSet::new(),
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;

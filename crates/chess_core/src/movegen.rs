use crate::{board::Board, rules::is_legal, types::*};

/// All legal moves for `color`, returning a freshly allocated vector.
///
/// Every destination square is tried for every piece of that color, so the
/// result is exactly the set `rules::is_legal` accepts. Ordered row-major by
/// origin, then by destination.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(board, color, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(board: &Board, color: Color, out: &mut Vec<Move>) {
    out.clear();
    for (from, pc) in board.pieces(color) {
        for to in Square::all() {
            if is_legal(board, from, pc, to) {
                out.push(Move::new(from, to));
            }
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;

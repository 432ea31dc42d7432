//! Text rendering of session snapshots

use chess_core::{format_clock, Color, Piece, PieceKind, Square};
use game_session::SessionSnapshot;
use std::collections::BTreeSet;
use std::fmt::Write;

pub fn piece_symbol(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::King) => '♔',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::Black, PieceKind::King) => '♚',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Pawn) => '♟',
    }
}

/// Board with rank and file labels. The selected square is bracketed and
/// `highlights` are marked with `*` when empty or `x` when occupied.
pub fn board(snap: &SessionSnapshot, highlights: &BTreeSet<Square>) -> String {
    let mut out = String::new();
    for row in 0..8u8 {
        let _ = write!(out, "{} ", 8 - row);
        for col in 0..8u8 {
            let sq = Square::new(row, col);
            let cell = match (snap.board.piece_at(sq), highlights.contains(&sq)) {
                (Some(_), true) => 'x',
                (Some(pc), false) => piece_symbol(pc),
                (None, true) => '*',
                (None, false) if (row + col) % 2 == 1 => '·',
                (None, false) => ' ',
            };
            if snap.selection == Some(sq) {
                let _ = write!(out, "[{cell}]");
            } else {
                let _ = write!(out, " {cell} ");
            }
        }
        out.push('\n');
    }
    out.push_str("   a  b  c  d  e  f  g  h\n");
    out
}

pub fn clocks(snap: &SessionSnapshot) -> String {
    format!(
        "white {}  |  black {}",
        format_clock(snap.white_remaining_secs),
        format_clock(snap.black_remaining_secs)
    )
}

pub fn captured(snap: &SessionSnapshot) -> String {
    let line = |color: Color| -> String {
        snap.captured_by(color)
            .iter()
            .map(|&p| piece_symbol(p).to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };
    format!(
        "white has taken: {}\nblack has taken: {}",
        line(Color::White),
        line(Color::Black)
    )
}

pub fn history(snap: &SessionSnapshot) -> String {
    if snap.history.is_empty() {
        return "no moves yet".to_string();
    }
    snap.numbered_history().join("\n")
}

/// Full screen: board, clocks and status line.
pub fn screen(snap: &SessionSnapshot, highlights: &BTreeSet<Square>) -> String {
    format!(
        "{}{}\n{}",
        board(snap, highlights),
        clocks(snap),
        snap.status_message
    )
}

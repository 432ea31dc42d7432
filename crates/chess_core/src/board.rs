use crate::types::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Errors raised while reading a placement string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("invalid piece character '{0}'")]
    BadPiece(char),
    #[error("rank {rank} describes {files} files")]
    RankWidth { rank: usize, files: usize },
}

/// Square contents of an 8x8 board. Pure storage, no rule knowledge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    pub fn startpos() -> Self {
        let mut b = Self::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            b.squares[0][col] = Some(Piece::new(Color::Black, kind));
            b.squares[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            b.squares[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            b.squares[7][col] = Some(Piece::new(Color::White, kind));
        }
        b
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row as usize][sq.col as usize]
    }

    pub fn place(&mut self, sq: Square, pc: Option<Piece>) {
        self.squares[sq.row as usize][sq.col as usize] = pc;
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Occupied squares of one color, row-major.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(pc) if pc.color == color => Some((sq, pc)),
            _ => None,
        })
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces(color).count()
    }

    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.squares
    }

    /// Parses the placement field of a FEN string (rank 8 first).
    pub fn from_placement(text: &str) -> Result<Self, PlacementError> {
        let ranks: Vec<&str> = text.trim().split('/').collect();
        if ranks.len() != 8 {
            return Err(PlacementError::RankCount(ranks.len()));
        }

        let mut board = Self::empty();
        for (row, rank_str) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    col += d as usize;
                    continue;
                }
                let kind = PieceKind::from_placement_char(ch).ok_or(PlacementError::BadPiece(ch))?;
                let color = if ch.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                if col >= 8 {
                    return Err(PlacementError::RankWidth {
                        rank: 8 - row,
                        files: col + 1,
                    });
                }
                board.squares[row][col] = Some(Piece::new(color, kind));
                col += 1;
            }
            if col != 8 {
                return Err(PlacementError::RankWidth {
                    rank: 8 - row,
                    files: col,
                });
            }
        }
        Ok(board)
    }

    pub fn to_placement(&self) -> String {
        let mut out = String::with_capacity(64);
        for (row, rank) in self.squares.iter().enumerate() {
            if row > 0 {
                out.push('/');
            }
            let mut gap = 0;
            for cell in rank {
                match cell {
                    None => gap += 1,
                    Some(pc) => {
                        if gap > 0 {
                            out.push_str(&gap.to_string());
                            gap = 0;
                        }
                        let ch = pc.kind.placement_char();
                        out.push(match pc.color {
                            Color::White => ch.to_ascii_uppercase(),
                            Color::Black => ch,
                        });
                    }
                }
            }
            if gap > 0 {
                out.push_str(&gap.to_string());
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;

//! Random Move Selector
//!
//! The automated opponent: it has no evaluation at all and picks uniformly at
//! random among every legal move of its side. The full candidate set is
//! collected before choosing, so every legal move is equally likely.

use chess_core::{legal_moves_into, Board, Color, Move, MoveSelector};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;


/// A selector that plays random legal moves.
#[derive(Debug, Clone)]
pub struct RandomMoveSelector {
    rng: StdRng,
    candidates: Vec<Move>,
}

impl Default for RandomMoveSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomMoveSelector {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic selector, for tests and reproducible sessions.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            candidates: Vec::with_capacity(64),
        }
    }

    /// Number of candidates considered by the last selection.
    pub fn last_candidate_count(&self) -> usize {
        self.candidates.len()
    }
}

impl MoveSelector for RandomMoveSelector {
    fn select_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        legal_moves_into(board, color, &mut self.candidates);
        self.candidates.choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }
}

pub mod board;
pub mod clock;
pub mod executor;
pub mod movegen;
pub mod rules;
pub mod types;

// Re-export core game logic (not selector-specific)
pub use board::*;
pub use clock::*;
pub use executor::*;
pub use movegen::*;
pub use rules::*;
pub use types::*;

// =============================================================================
// MoveSelector trait - implemented by automated players
// =============================================================================

/// Trait for anything that can pick a move for a side on its own.
///
/// Selectors see a read-only board and return an origin/destination pair that
/// `rules::is_legal` accepts, or `None` when the side has no legal move.
pub trait MoveSelector: Send {
    /// Pick a move for `color` on `board`.
    fn select_move(&mut self, board: &Board, color: Color) -> Option<Move>;

    /// Returns the selector's name for logs and status lines
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}

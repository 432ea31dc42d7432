//! Game session orchestration
//!
//! This crate glues the rule engine to the outside world:
//! - Mode selection (human vs human, human vs random opponent)
//! - Session lifecycle (start, reset, timeout)
//! - A virtual-time scheduler for clock ticks and delayed automated moves
//! - Read-only snapshots for whatever renders the game
//!
//! # Usage
//!
//! ```
//! use chess_core::Square;
//! use game_session::{GameMode, GameSession, SessionConfig};
//! use std::time::Duration;
//!
//! let mut session = GameSession::new(SessionConfig::default());
//! session.start(GameMode::HumanVsRandom);
//! assert!(session.submit_move(Square::new(6, 4), Square::new(4, 4)));
//!
//! // Half a second later the random opponent has replied.
//! session.advance(Duration::from_millis(500));
//! assert_eq!(session.snapshot().history.len(), 2);
//! ```

mod config;
mod scheduler;
mod session;
mod snapshot;

pub use config::*;
pub use scheduler::*;
pub use session::*;
pub use snapshot::*;

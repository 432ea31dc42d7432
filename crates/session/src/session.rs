//! Game session state machine.
//!
//! A session owns the game state, the turn clock, the scheduler and the
//! automated opponent. Every public operation is one complete transition;
//! the presentation layer reads [`SessionSnapshot`]s afterwards and never
//! gets a mutable handle on anything inside.

use chess_core::{
    is_legal, legal_destinations, Board, ClockTick, Color, GameState, MoveRecord, MoveSelector,
    Square, TurnClock,
};
use random_engine::RandomMoveSelector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::scheduler::{Scheduler, Task};
use crate::snapshot::SessionSnapshot;

const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    HumanVsHuman,
    HumanVsRandom,
}

impl GameMode {
    /// Accepts the short names used on the command line as well as the long ones.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "hvh" | "human" | "human-vs-human" | "multiplayer" => Some(GameMode::HumanVsHuman),
            "hvr" | "random" | "ai" | "human-vs-random" => Some(GameMode::HumanVsRandom),
            _ => None,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::HumanVsHuman => write!(f, "human vs human"),
            GameMode::HumanVsRandom => write!(f, "human vs random"),
        }
    }
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    EndedByTimeout { winner: Color },
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::NotStarted => write!(f, "not started"),
            SessionStatus::InProgress => write!(f, "in progress"),
            SessionStatus::EndedByTimeout { winner } => write!(f, "{winner} wins by timeout"),
        }
    }
}

/// Things that happen on their own, as opposed to in answer to a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A clock reached zero; the session is over.
    Timeout { winner: Color },
    /// The automated opponent moved.
    AutomatedMove(MoveRecord),
    /// The automated opponent had nothing to play. The session stays in
    /// progress; stalemate and checkmate are not recognised.
    NoLegalMoves { color: Color },
}

/// Result of a square click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing to do: no game running, an empty or foreign square, or the
    /// automated side holds the turn.
    Ignored,
    Selected {
        square: Square,
        destinations: BTreeSet<Square>,
    },
    /// The second click was not a legal destination; selection cleared.
    Deselected,
    Moved(MoveRecord),
}

pub struct GameSession {
    config: SessionConfig,
    mode: Option<GameMode>,
    status: SessionStatus,
    game: GameState,
    clock: TurnClock,
    selection: Option<Square>,
    scheduler: Scheduler,
    selector: Box<dyn MoveSelector>,
}

impl GameSession {
    /// A session whose automated opponent is a [`RandomMoveSelector`],
    /// seeded from the config when a seed is given.
    pub fn new(config: SessionConfig) -> Self {
        let selector = match config.seed {
            Some(seed) => RandomMoveSelector::with_seed(seed),
            None => RandomMoveSelector::new(),
        };
        Self::with_selector(config, Box::new(selector))
    }

    pub fn with_selector(config: SessionConfig, selector: Box<dyn MoveSelector>) -> Self {
        let clock = TurnClock::new(config.time_allotment_secs);
        Self {
            config,
            mode: None,
            status: SessionStatus::NotStarted,
            game: GameState::new(),
            clock,
            selection: None,
            scheduler: Scheduler::new(),
            selector,
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Starts a fresh game in `mode`, discarding whatever was going on.
    pub fn start(&mut self, mode: GameMode) {
        self.clear();
        self.mode = Some(mode);
        self.status = SessionStatus::InProgress;
        self.clock.start();

        let period = self.config.tick_interval().max(MIN_TICK_INTERVAL);
        self.scheduler.schedule_repeating(period, Task::ClockTick);

        info!(
            %mode,
            allotment = self.clock.allotment(),
            opponent = self.selector.name(),
            "session started"
        );

        // Only happens when the automated side is configured to play White.
        if self.is_automated_turn() {
            self.schedule_automated_move();
        }
    }

    /// Back to the not-started state with a fresh board and full clocks.
    pub fn reset(&mut self) {
        self.clear();
        self.status = SessionStatus::NotStarted;
        info!("session reset");
    }

    /// Cancels all pending work before any state is rebuilt, so nothing
    /// scheduled for the old game can touch the new one.
    fn clear(&mut self) {
        self.scheduler.cancel_all();
        self.game = GameState::new();
        self.clock.reset();
        self.selection = None;
        self.selector.new_game();
    }

    // -------------------------------------------------------------------------
    // Moves
    // -------------------------------------------------------------------------

    /// Plays `from` -> `to` for the side to move.
    ///
    /// Returns false, leaving the position untouched, when no game is in
    /// progress, the origin does not hold a piece of the side to move, the
    /// automated opponent holds the turn, or the move is illegal.
    pub fn submit_move(&mut self, from: Square, to: Square) -> bool {
        self.try_move(from, to).is_some()
    }

    fn try_move(&mut self, from: Square, to: Square) -> Option<MoveRecord> {
        self.selection = None;

        if self.status != SessionStatus::InProgress {
            warn!(%from, %to, status = %self.status, "move rejected: no game in progress");
            return None;
        }
        if self.is_automated_turn() {
            warn!(%from, %to, "move rejected: automated side to move");
            return None;
        }

        let mover = self.game.side_to_move;
        let piece = match self.game.board.piece_at(from) {
            Some(pc) if pc.color == mover => pc,
            _ => {
                warn!(%from, %to, side = %mover, "move rejected: no piece of the side to move");
                return None;
            }
        };
        if !is_legal(&self.game.board, from, piece, to) {
            debug!(%from, %to, piece = %piece, "move rejected: illegal");
            return None;
        }

        let record = self.game.apply(from, piece, to);
        debug!(notation = %record.notation(), captured = ?record.captured, "move applied");

        if self.is_automated_turn() {
            self.schedule_automated_move();
        }
        Some(record)
    }

    /// Handles a click on `square` by the human to move.
    ///
    /// With nothing selected, a click on one of the mover's pieces selects
    /// it. With a selection, the click is the destination: a legal one plays
    /// the move, anything else just clears the selection.
    pub fn click(&mut self, square: Square) -> ClickOutcome {
        if self.status != SessionStatus::InProgress || self.is_automated_turn() {
            return ClickOutcome::Ignored;
        }

        if let Some(from) = self.selection {
            return match self.try_move(from, square) {
                Some(record) => ClickOutcome::Moved(record),
                None => ClickOutcome::Deselected,
            };
        }

        match self.game.board.piece_at(square) {
            Some(pc) if pc.color == self.game.side_to_move => {
                self.selection = Some(square);
                ClickOutcome::Selected {
                    square,
                    destinations: legal_destinations(&self.game.board, square),
                }
            }
            _ => ClickOutcome::Ignored,
        }
    }

    /// Takes back the last move, whoever made it.
    ///
    /// Allowed at any time except after the game has ended. A pending
    /// automated reply is dropped. When the restored turn belongs to the
    /// automated side, a fresh reply is scheduled after the usual delay.
    pub fn undo(&mut self) -> bool {
        if matches!(self.status, SessionStatus::EndedByTimeout { .. }) {
            return false;
        }
        self.scheduler.cancel(Task::AutomatedMove);
        self.selection = None;

        let undone = self.game.undo();
        if undone {
            debug!(side = %self.game.side_to_move, plies = self.game.history.len(), "move undone");
            if self.status == SessionStatus::InProgress && self.is_automated_turn() {
                self.schedule_automated_move();
            }
        }
        undone
    }

    /// Legal destinations of the piece on `from`, for highlighting.
    pub fn legal_destinations(&self, from: Square) -> BTreeSet<Square> {
        legal_destinations(&self.game.board, from)
    }

    fn is_automated_turn(&self) -> bool {
        self.mode == Some(GameMode::HumanVsRandom)
            && self.game.side_to_move == self.config.automated_color
    }

    fn schedule_automated_move(&mut self) {
        self.scheduler.cancel(Task::AutomatedMove);
        self.scheduler
            .schedule(self.config.automated_move_delay(), Task::AutomatedMove);
    }

    /// Lets the automated opponent move, if it still holds the turn.
    fn play_automated_move(&mut self) -> Option<SessionEvent> {
        if self.status != SessionStatus::InProgress || !self.is_automated_turn() {
            return None;
        }
        let color = self.config.automated_color;

        let Some(mv) = self.selector.select_move(&self.game.board, color) else {
            info!(side = %color, "automated side has no legal moves");
            return Some(SessionEvent::NoLegalMoves { color });
        };

        let piece = match self.game.board.piece_at(mv.from) {
            Some(pc) if pc.color == color && is_legal(&self.game.board, mv.from, pc, mv.to) => pc,
            _ => {
                warn!(selector = self.selector.name(), %mv, "selector proposed an illegal move");
                return None;
            }
        };

        let record = self.game.apply(mv.from, piece, mv.to);
        debug!(notation = %record.notation(), "automated move applied");
        Some(SessionEvent::AutomatedMove(record))
    }

    // -------------------------------------------------------------------------
    // Time
    // -------------------------------------------------------------------------

    /// One elapsed second for the side to move.
    ///
    /// Ticks outside a running game are ignored. When the side to move runs
    /// out of time the session ends and the opponent wins.
    pub fn tick(&mut self) -> Option<SessionEvent> {
        if self.status != SessionStatus::InProgress {
            return None;
        }

        match self.clock.tick(self.game.side_to_move) {
            ClockTick::Expired { loser } => {
                let winner = loser.other();
                self.status = SessionStatus::EndedByTimeout { winner };
                self.selection = None;
                self.scheduler.cancel(Task::ClockTick);
                self.scheduler.cancel(Task::AutomatedMove);
                info!(%loser, %winner, "flag fell");
                Some(SessionEvent::Timeout { winner })
            }
            ClockTick::Ticked { .. } | ClockTick::Ignored => None,
        }
    }

    /// Moves virtual time forward by `elapsed`, firing every task that falls
    /// due on the way, in order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<SessionEvent> {
        let target = self
            .scheduler
            .now()
            .checked_add(elapsed)
            .unwrap_or(Duration::MAX);
        let mut events = Vec::new();

        while let Some(task) = self.scheduler.pop_due(target) {
            let event = match task {
                Task::ClockTick => self.tick(),
                Task::AutomatedMove => self.play_automated_move(),
            };
            events.extend(event);
        }

        self.scheduler.advance_to(target);
        events
    }

    /// Time until the next scheduled task, for wall-clock drivers.
    pub fn next_due(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    // -------------------------------------------------------------------------
    // Read-only views
    // -------------------------------------------------------------------------

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    pub fn current_player(&self) -> Color {
        self.game.side_to_move
    }

    pub fn selection(&self) -> Option<Square> {
        self.selection
    }

    pub fn remaining(&self, color: Color) -> u32 {
        self.clock.remaining(color)
    }

    pub fn board(&self) -> &Board {
        &self.game.board
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_automated_move_pending(&self) -> bool {
        self.scheduler.is_pending(Task::AutomatedMove)
    }

    /// The one-line status shown above the board.
    pub fn status_message(&self) -> String {
        match self.status {
            SessionStatus::NotStarted => "Select mode to begin".to_string(),
            SessionStatus::InProgress => format!("{}'s turn", self.game.side_to_move),
            SessionStatus::EndedByTimeout { winner } => {
                format!("Game Over - {winner} wins by timeout")
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.game.board.clone(),
            placement: self.game.board.to_placement(),
            current_player: self.game.side_to_move,
            mode: self.mode,
            status: self.status,
            status_message: self.status_message(),
            selection: self.selection,
            history: self.game.notation_history(),
            captured_by_white: self.game.ledger.captured_by(Color::White).to_vec(),
            captured_by_black: self.game.ledger.captured_by(Color::Black).to_vec(),
            white_remaining_secs: self.clock.remaining(Color::White),
            black_remaining_secs: self.clock.remaining(Color::Black),
            clock_phase: self.clock.phase(),
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;

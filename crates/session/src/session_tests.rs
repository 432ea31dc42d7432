use super::*;
use chess_core::{ClockPhase, Move, Piece, PieceKind};

fn sq(c: &str) -> Square {
    Square::from_coord(c).unwrap()
}

fn seeded() -> GameSession {
    GameSession::new(SessionConfig {
        seed: Some(5),
        ..Default::default()
    })
}

/// Selector that never finds a move.
struct Stuck;

impl MoveSelector for Stuck {
    fn select_move(&mut self, _board: &Board, _color: Color) -> Option<Move> {
        None
    }
    fn name(&self) -> &str {
        "stuck"
    }
}

/// Selector that always proposes the same move, legal or not.
struct Fixed(Move);

impl MoveSelector for Fixed {
    fn select_move(&mut self, _board: &Board, _color: Color) -> Option<Move> {
        Some(self.0)
    }
    fn name(&self) -> &str {
        "fixed"
    }
}

#[test]
fn test_fresh_session_is_not_started() {
    let mut s = seeded();
    assert_eq!(s.status(), SessionStatus::NotStarted);
    assert_eq!(s.status_message(), "Select mode to begin");
    assert!(!s.submit_move(sq("e2"), sq("e4")));
    assert_eq!(s.board(), &Board::startpos());
    assert_eq!(s.click(sq("e2")), ClickOutcome::Ignored);
}

#[test]
fn test_undo_on_fresh_session() {
    let mut s = seeded();
    let before = s.snapshot();
    assert!(!s.undo());
    assert_eq!(s.snapshot(), before);

    s.start(GameMode::HumanVsHuman);
    let before = s.snapshot();
    assert!(!s.undo());
    assert_eq!(s.snapshot(), before);
}

#[test]
fn test_start_sets_up_full_game() {
    let mut s = seeded();
    s.start(GameMode::HumanVsHuman);
    let snap = s.snapshot();

    assert_eq!(snap.status, SessionStatus::InProgress);
    assert_eq!(snap.mode, Some(GameMode::HumanVsHuman));
    assert_eq!(snap.current_player, Color::White);
    assert_eq!(snap.board.count(Color::White), 16);
    assert_eq!(snap.board.count(Color::Black), 16);
    assert_eq!(snap.placement, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    assert_eq!(snap.white_remaining_secs, 600);
    assert_eq!(snap.black_remaining_secs, 600);
    assert_eq!(snap.clock_phase, ClockPhase::Running);
    assert_eq!(snap.status_message, "white's turn");
    assert!(snap.history.is_empty());
}

#[test]
fn test_opening_and_pawn_capture() {
    let mut s = seeded();
    s.start(GameMode::HumanVsHuman);

    assert!(s.submit_move(Square::new(6, 4), Square::new(4, 4)));
    assert!(s.board().is_empty(Square::new(5, 4)));
    assert_eq!(s.current_player(), Color::Black);

    assert!(s.submit_move(Square::new(1, 3), Square::new(3, 3)));
    assert!(s.submit_move(Square::new(4, 4), Square::new(3, 3)));

    let black_pawn = Piece::new(Color::Black, PieceKind::Pawn);
    let last = s.game().last_move().copied().unwrap();
    assert_eq!(last.captured, Some(black_pawn));

    let snap = s.snapshot();
    assert_eq!(snap.captured_by(Color::White), &[black_pawn]);
    assert!(snap.captured_by(Color::Black).is_empty());
    assert_eq!(snap.history, vec!["Pe2 → e4", "Pd7 → d5", "Pe4 → d5"]);
    assert_eq!(snap.numbered_history()[2], "3. Pe4 → d5");
}

#[test]
fn test_rejects_wrong_side_and_illegal_moves() {
    let mut s = seeded();
    s.start(GameMode::HumanVsHuman);
    let before = s.snapshot();

    // Black piece on White's turn.
    assert!(!s.submit_move(sq("e7"), sq("e5")));
    // Empty origin.
    assert!(!s.submit_move(sq("e4"), sq("e5")));
    // Illegal shape.
    assert!(!s.submit_move(sq("e2"), sq("e5")));

    assert_eq!(s.snapshot(), before);
}

#[test]
fn test_click_select_then_move() {
    let mut s = seeded();
    s.start(GameMode::HumanVsHuman);

    match s.click(sq("g1")) {
        ClickOutcome::Selected {
            square,
            destinations,
        } => {
            assert_eq!(square, sq("g1"));
            assert_eq!(destinations, BTreeSet::from([sq("f3"), sq("h3")]));
        }
        other => panic!("expected selection, got {other:?}"),
    }
    assert_eq!(s.selection(), Some(sq("g1")));

    match s.click(sq("f3")) {
        ClickOutcome::Moved(record) => {
            assert_eq!(record.to, sq("f3"));
            assert_eq!(record.piece, Piece::new(Color::White, PieceKind::Knight));
            assert_eq!(s.game().last_move(), Some(&record));
        }
        other => panic!("expected a move, got {other:?}"),
    }
    assert_eq!(s.selection(), None);
    assert_eq!(s.current_player(), Color::Black);
}

#[test]
fn test_click_illegal_destination_clears_selection() {
    let mut s = seeded();
    s.start(GameMode::HumanVsHuman);

    assert!(matches!(s.click(sq("e2")), ClickOutcome::Selected { .. }));
    assert_eq!(s.click(sq("e5")), ClickOutcome::Deselected);
    assert_eq!(s.selection(), None);
    assert_eq!(s.current_player(), Color::White);

    // Opponent pieces and empty squares cannot be selected.
    assert_eq!(s.click(sq("e7")), ClickOutcome::Ignored);
    assert_eq!(s.click(sq("e4")), ClickOutcome::Ignored);
}

#[test]
fn test_undo_ignores_whose_turn() {
    let mut s = seeded();
    s.start(GameMode::HumanVsHuman);
    let start = s.snapshot();

    assert!(s.submit_move(sq("e2"), sq("e4")));
    assert!(s.submit_move(sq("e7"), sq("e5")));
    assert!(s.undo());
    assert_eq!(s.current_player(), Color::Black);
    assert!(s.undo());
    assert_eq!(s.current_player(), Color::White);
    assert!(!s.undo());

    let snap = s.snapshot();
    assert_eq!(snap.board, start.board);
    assert!(snap.history.is_empty());
}

#[test]
fn test_ticks_ignored_before_start() {
    let mut s = seeded();
    for _ in 0..10 {
        assert_eq!(s.tick(), None);
    }
    assert_eq!(s.remaining(Color::White), 600);
    assert!(s.advance(Duration::from_secs(30)).is_empty());
    assert_eq!(s.remaining(Color::White), 600);
}

#[test]
fn test_ticks_charge_side_to_move() {
    let mut s = seeded();
    s.start(GameMode::HumanVsHuman);
    s.advance(Duration::from_secs(3));
    assert!(s.submit_move(sq("e2"), sq("e4")));
    s.advance(Duration::from_secs(2));

    assert_eq!(s.remaining(Color::White), 597);
    assert_eq!(s.remaining(Color::Black), 598);
}

#[test]
fn test_six_hundred_ticks_end_the_game() {
    let mut s = seeded();
    s.start(GameMode::HumanVsHuman);

    for _ in 0..599 {
        assert_eq!(s.tick(), None);
    }
    assert_eq!(
        s.tick(),
        Some(SessionEvent::Timeout {
            winner: Color::Black
        })
    );
    assert_eq!(
        s.status(),
        SessionStatus::EndedByTimeout {
            winner: Color::Black
        }
    );
    assert_eq!(s.status_message(), "Game Over - black wins by timeout");

    // Ended: ticks, moves and undo are all refused.
    assert_eq!(s.tick(), None);
    assert_eq!(s.remaining(Color::Black), 600);
    assert!(!s.submit_move(sq("e2"), sq("e4")));
    assert!(!s.undo());
    assert_eq!(s.next_due(), None);
}

#[test]
fn test_reset_after_timeout() {
    let mut s = seeded();
    s.start(GameMode::HumanVsHuman);
    s.advance(Duration::from_secs(600));
    assert!(matches!(s.status(), SessionStatus::EndedByTimeout { .. }));

    s.reset();
    let snap = s.snapshot();
    assert_eq!(snap.status, SessionStatus::NotStarted);
    assert_eq!(snap.clock_phase, ClockPhase::Idle);
    assert_eq!(snap.white_remaining_secs, 600);
    assert_eq!(snap.board, Board::startpos());
    assert!(s.advance(Duration::from_secs(5)).is_empty());
}

#[test]
fn test_restart_leaves_a_single_clock() {
    let mut s = seeded();
    s.start(GameMode::HumanVsHuman);
    s.advance(Duration::from_millis(2500));
    assert!(s.submit_move(sq("d2"), sq("d4")));

    s.start(GameMode::HumanVsHuman);
    assert!(s.game().history.is_empty());
    assert_eq!(s.remaining(Color::White), 600);

    // One tick per second, not two.
    s.advance(Duration::from_secs(1));
    assert_eq!(s.remaining(Color::White), 599);
}

#[test]
fn test_automated_reply_after_delay() {
    let mut s = seeded();
    s.start(GameMode::HumanVsRandom);
    assert!(!s.is_automated_move_pending());

    assert!(s.submit_move(sq("e2"), sq("e4")));
    assert!(s.is_automated_move_pending());
    assert!(s.advance(Duration::from_millis(499)).is_empty());
    assert_eq!(s.current_player(), Color::Black);

    let events = s.advance(Duration::from_millis(1));
    assert_eq!(events.len(), 1);
    match &events[0] {
        SessionEvent::AutomatedMove(record) => {
            assert_eq!(record.piece.color, Color::Black);
        }
        other => panic!("expected automated move, got {other:?}"),
    }
    assert_eq!(s.current_player(), Color::White);
    assert_eq!(s.game().history.len(), 2);
}

#[test]
fn test_human_cannot_move_for_automated_side() {
    let mut s = seeded();
    s.start(GameMode::HumanVsRandom);
    assert!(s.submit_move(sq("e2"), sq("e4")));

    assert!(!s.submit_move(sq("e7"), sq("e5")));
    assert_eq!(s.click(sq("e7")), ClickOutcome::Ignored);
    assert_eq!(s.game().history.len(), 1);
}

#[test]
fn test_undo_drops_pending_automated_move() {
    let mut s = seeded();
    s.start(GameMode::HumanVsRandom);
    assert!(s.submit_move(sq("e2"), sq("e4")));
    assert!(s.undo());

    assert!(!s.is_automated_move_pending());
    assert!(s.advance(Duration::from_secs(1)).is_empty());
    assert_eq!(s.current_player(), Color::White);
    assert!(s.game().history.is_empty());
}

#[test]
fn test_undoing_automated_reply_schedules_a_new_one() {
    let mut s = seeded();
    s.start(GameMode::HumanVsRandom);
    assert!(s.submit_move(sq("e2"), sq("e4")));
    let events = s.advance(Duration::from_millis(500));
    assert!(matches!(events[..], [SessionEvent::AutomatedMove(_)]));

    // Taking back the reply hands the turn back to the automated side.
    assert!(s.undo());
    assert_eq!(s.current_player(), Color::Black);
    assert_eq!(s.game().history.len(), 1);
    assert!(s.is_automated_move_pending());

    assert!(s.advance(Duration::from_millis(499)).is_empty());
    let events = s.advance(Duration::from_millis(1));
    match &events[..] {
        [SessionEvent::AutomatedMove(record)] => assert_eq!(record.piece.color, Color::Black),
        other => panic!("expected automated move, got {other:?}"),
    }
    assert_eq!(s.current_player(), Color::White);
    assert_eq!(s.game().history.len(), 2);
    assert_eq!(s.status(), SessionStatus::InProgress);
}

#[test]
fn test_advance_by_max_duration_saturates() {
    let mut s = seeded();
    s.start(GameMode::HumanVsHuman);
    s.advance(Duration::from_secs(1));

    let events = s.advance(Duration::MAX);
    assert_eq!(
        events,
        vec![SessionEvent::Timeout {
            winner: Color::Black
        }]
    );
    assert_eq!(s.remaining(Color::White), 0);
    assert_eq!(s.remaining(Color::Black), 600);
    assert!(s.advance(Duration::MAX).is_empty());
}

#[test]
fn test_reset_cancels_pending_automated_move() {
    let mut s = seeded();
    s.start(GameMode::HumanVsRandom);
    assert!(s.submit_move(sq("e2"), sq("e4")));
    s.reset();

    assert!(s.advance(Duration::from_secs(2)).is_empty());
    assert_eq!(s.board(), &Board::startpos());
    assert_eq!(s.remaining(Color::Black), 600);
}

#[test]
fn test_automated_side_can_open() {
    let mut s = GameSession::new(SessionConfig {
        automated_color: Color::White,
        seed: Some(1),
        ..Default::default()
    });
    s.start(GameMode::HumanVsRandom);
    assert!(s.is_automated_move_pending());
    assert!(!s.submit_move(sq("e2"), sq("e4")));

    let events = s.advance(Duration::from_millis(500));
    assert!(matches!(events[..], [SessionEvent::AutomatedMove(_)]));
    assert_eq!(s.current_player(), Color::Black);
    assert!(s.submit_move(sq("e7"), sq("e5")));
    assert!(s.is_automated_move_pending());
}

#[test]
fn test_stuck_selector_keeps_game_running() {
    let mut s = GameSession::with_selector(SessionConfig::default(), Box::new(Stuck));
    s.start(GameMode::HumanVsRandom);
    assert!(s.submit_move(sq("e2"), sq("e4")));

    let events = s.advance(Duration::from_millis(500));
    assert_eq!(
        events,
        vec![SessionEvent::NoLegalMoves {
            color: Color::Black
        }]
    );
    assert_eq!(s.status(), SessionStatus::InProgress);
    assert_eq!(s.current_player(), Color::Black);
}

#[test]
fn test_illegal_selector_move_is_not_applied() {
    let bogus = Move::new(sq("a8"), sq("a5"));
    let mut s = GameSession::with_selector(SessionConfig::default(), Box::new(Fixed(bogus)));
    s.start(GameMode::HumanVsRandom);
    assert!(s.submit_move(sq("e2"), sq("e4")));

    assert!(s.advance(Duration::from_millis(500)).is_empty());
    assert_eq!(s.game().history.len(), 1);
    assert_eq!(s.current_player(), Color::Black);
}

#[test]
fn test_clock_runs_during_automated_delay() {
    let mut s = GameSession::new(SessionConfig {
        automated_move_delay_ms: 2500,
        seed: Some(8),
        ..Default::default()
    });
    s.start(GameMode::HumanVsRandom);
    assert!(s.submit_move(sq("e2"), sq("e4")));
    s.advance(Duration::from_secs(3));
    assert_eq!(s.remaining(Color::Black), 598);
    assert_eq!(s.remaining(Color::White), 599);
}

#[test]
fn test_mode_names() {
    assert_eq!(GameMode::from_name("hvh"), Some(GameMode::HumanVsHuman));
    assert_eq!(GameMode::from_name("AI"), Some(GameMode::HumanVsRandom));
    assert_eq!(GameMode::from_name("chess960"), None);
}

use super::*;

#[test]
fn test_startpos_moves() {
    let board = Board::startpos();
    // 16 pawn pushes plus 4 knight hops for either side.
    assert_eq!(legal_moves(&board, Color::White).len(), 20);
    assert_eq!(legal_moves(&board, Color::Black).len(), 20);
}

#[test]
fn test_blocked_side_has_no_moves() {
    // Black pawn stuck behind a white pawn with nothing to capture.
    let board = Board::from_placement("8/p7/P7/8/8/8/8/8").unwrap();
    assert!(legal_moves(&board, Color::Black).is_empty());
    assert!(legal_moves(&board, Color::White).is_empty());
}

#[test]
fn test_king_may_walk_into_attack() {
    // No check filtering: the lone king keeps all five moves even next to a rook.
    let board = Board::from_placement("8/8/8/8/8/8/r7/4K3").unwrap();
    assert_eq!(legal_moves(&board, Color::White).len(), 5);
}

#[test]
fn test_buffer_is_cleared_between_calls() {
    let board = Board::startpos();
    let mut buf = vec![Move::new(Square::new(0, 0), Square::new(0, 0))];
    legal_moves_into(&board, Color::White, &mut buf);
    assert_eq!(buf.len(), 20);
    assert!(buf.iter().all(|m| board.piece_at(m.from).unwrap().color == Color::White));
}

//! Make/unmake reversibility.

use crate::board::{Board, Color, Move, Piece, Square};

fn find_move(board: &mut Board, notation: &str) -> Move {
    board
        .generate_moves()
        .iter()
        .find(|mv| mv.to_string() == notation)
        .copied()
        .unwrap_or_else(|| panic!("expected legal move {notation}"))
}

#[test]
fn simple_move_roundtrips() {
    let mut board = Board::new();
    let before_fen = board.to_fen();
    let before_hash = board.hash();

    let mv = find_move(&mut board, "e2e4");
    let info = board.make_move(mv);
    assert_ne!(board.hash(), before_hash);
    board.unmake_move(mv, info);

    assert_eq!(board.to_fen(), before_fen);
    assert_eq!(board.hash(), before_hash);
    board.assert_consistent();
}

#[test]
fn capture_roundtrips() {
    let mut board = Board::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2");
    let before_fen = board.to_fen();
    let before_hash = board.hash();

    let mv = find_move(&mut board, "e4d5");
    assert!(mv.is_capture());
    let info = board.make_move(mv);
    assert_eq!(board.piece_at(Square::new(4, 3)), Some((Color::White, Piece::Pawn)));
    board.unmake_move(mv, info);

    assert_eq!(board.to_fen(), before_fen);
    assert_eq!(board.hash(), before_hash);
}

#[test]
fn en_passant_roundtrips() {
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let before_fen = board.to_fen();
    let before_hash = board.hash();

    let mv = find_move(&mut board, "e5f6");
    assert!(mv.is_en_passant());
    let info = board.make_move(mv);
    // The captured pawn disappears from f5, not f6.
    assert_eq!(board.piece_at(Square::new(4, 5)), None);
    board.assert_consistent();
    board.unmake_move(mv, info);

    assert_eq!(board.to_fen(), before_fen);
    assert_eq!(board.hash(), before_hash);
}

#[test]
fn promotion_roundtrips() {
    let mut board = Board::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
    let before_hash = board.hash();

    let mv = find_move(&mut board, "a7a8q");
    let info = board.make_move(mv);
    assert_eq!(board.piece_at(Square::new(7, 0)), Some((Color::White, Piece::Queen)));
    board.assert_consistent();
    board.unmake_move(mv, info);

    assert_eq!(board.hash(), before_hash);
    assert_eq!(board.piece_at(Square::new(6, 0)), Some((Color::White, Piece::Pawn)));
}

#[test]
fn castling_roundtrips_and_moves_rook() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let before_fen = board.to_fen();

    let mv = find_move(&mut board, "e1g1");
    assert!(mv.is_castling());
    let info = board.make_move(mv);
    assert_eq!(board.piece_at(Square::new(0, 5)), Some((Color::White, Piece::Rook)));
    assert_eq!(board.piece_at(Square::new(0, 7)), None);
    // Both white rights are gone, black's remain.
    assert!(!board.has_castling_right(Color::White, true));
    assert!(!board.has_castling_right(Color::White, false));
    assert!(board.has_castling_right(Color::Black, true));
    board.assert_consistent();

    board.unmake_move(mv, info);
    assert_eq!(board.to_fen(), before_fen);
}

#[test]
fn rook_capture_revokes_castling_right() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/6B1/R3K2R w KQkq - 0 1");
    // The bishop takes the a8 rook along the long diagonal.
    let mv = find_move(&mut board, "g2a8");
    let info = board.make_move(mv);
    assert!(!board.has_castling_right(Color::Black, false));
    assert!(board.has_castling_right(Color::Black, true));
    board.assert_consistent();
    board.unmake_move(mv, info);
    assert!(board.has_castling_right(Color::Black, false));
}

#[test]
fn halfmove_and_fullmove_counters_restore() {
    let mut board = Board::from_fen(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 3 7",
    );
    let mv = find_move(&mut board, "g1f3");
    let info = board.make_move(mv);
    assert_eq!(board.halfmove_clock(), 4);
    assert_eq!(board.fullmove_number(), 7);
    board.unmake_move(mv, info);
    assert_eq!(board.halfmove_clock(), 3);
    assert_eq!(board.fullmove_number(), 7);
}

#[test]
fn null_move_roundtrips() {
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let before_hash = board.hash();
    let before_ep = board.en_passant_target();
    let before_side = board.white_to_move();

    let info = board.make_null_move();
    assert_eq!(board.en_passant_target(), None);
    assert_ne!(board.hash(), before_hash);
    assert_ne!(board.white_to_move(), before_side);
    board.assert_consistent();

    board.unmake_null_move(info);
    assert_eq!(board.hash(), before_hash);
    assert_eq!(board.en_passant_target(), before_ep);
    assert_eq!(board.white_to_move(), before_side);
}

#[test]
fn deep_sequence_roundtrips_exactly() {
    let mut board = Board::new();
    let before_fen = board.to_fen();
    let before_hash = board.hash();

    let line = ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "g8f6", "e1g1", "f6e4", "d2d4"];
    let mut applied = Vec::new();
    for notation in line {
        let mv = find_move(&mut board, notation);
        let info = board.make_move(mv);
        board.assert_consistent();
        applied.push((mv, info));
    }
    while let Some((mv, info)) = applied.pop() {
        board.unmake_move(mv, info);
    }

    assert_eq!(board.to_fen(), before_fen);
    assert_eq!(board.hash(), before_hash);
    board.assert_consistent();
}

#[test]
fn en_passant_square_affects_hash() {
    // The same placement with and without the e3 target hashes apart,
    // even though no black pawn stands ready to capture on e3.
    let with_ep =
        Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    let without_ep =
        Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
    assert_ne!(with_ep.hash(), without_ep.hash());
}

#[test]
fn incremental_hash_tracks_en_passant_toggles() {
    // A double push sets the target, the reply clears it; the incremental
    // hash must match the recompute at every step.
    let mut board = Board::new();
    let e2e4 = find_move(&mut board, "e2e4");
    board.make_move(e2e4);
    assert!(board.en_passant_target().is_some());
    assert_eq!(board.hash(), board.calculate_hash_from_scratch());

    let g8f6 = find_move(&mut board, "g8f6");
    board.make_move(g8f6);
    assert_eq!(board.en_passant_target(), None);
    assert_eq!(board.hash(), board.calculate_hash_from_scratch());
}

//! FEN parsing, validation, and round-trips.

use crate::board::{Board, FenError};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[test]
fn start_position_round_trips() {
    assert_eq!(Board::new().to_fen(), START_FEN);
    assert_eq!(Board::from_fen(START_FEN).to_fen(), START_FEN);
}

#[test]
fn canonical_fens_round_trip() {
    let fens = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1",
        "8/P7/8/8/8/8/8/K1k5 w - - 0 1",
        "4k3/8/8/8/8/8/8/4K3 b - - 12 34",
    ];
    for fen in fens {
        assert_eq!(Board::from_fen(fen).to_fen(), fen, "round-trip failed for {fen}");
    }
}

#[test]
fn missing_counters_default() {
    let board = Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - -").unwrap();
    assert_eq!(board.halfmove_clock(), 0);
    assert_eq!(board.fullmove_number(), 1);

    let board = Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - - 7").unwrap();
    assert_eq!(board.halfmove_clock(), 7);
    assert_eq!(board.fullmove_number(), 1);
}

#[test]
fn rejects_malformed_fens() {
    assert!(matches!(
        Board::try_from_fen("4k3/8/8/8"),
        Err(FenError::TooFewFields { found: 1 })
    ));
    assert!(matches!(
        Board::try_from_fen("4k3/8/8/8/8/8/4K3 w - -"),
        Err(FenError::WrongRankCount { found: 7 })
    ));
    assert!(matches!(
        Board::try_from_fen("4x3/8/8/8/8/8/8/4K3 w - -"),
        Err(FenError::InvalidPiece { piece: 'x' })
    ));
    assert!(matches!(
        Board::try_from_fen("ppppppppp/8/8/8/8/8/8/4K3 w - -"),
        Err(FenError::BadRankWidth { .. })
    ));
    assert!(matches!(
        Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 x - -"),
        Err(FenError::InvalidSideToMove { .. })
    ));
    assert!(matches!(
        Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w Kx -"),
        Err(FenError::InvalidCastling { castling: 'x' })
    ));
    assert!(matches!(
        Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
        Err(FenError::InvalidCounter { .. })
    ));
}

#[test]
fn rejects_bad_king_counts() {
    assert!(matches!(
        Board::try_from_fen("8/8/8/8/8/8/8/4K3 w - -"),
        Err(FenError::BadKingCount { white: 1, black: 0 })
    ));
    assert!(matches!(
        Board::try_from_fen("4k2k/8/8/8/8/8/8/4K3 w - -"),
        Err(FenError::BadKingCount { white: 1, black: 2 })
    ));
}

#[test]
fn rejects_inconsistent_en_passant() {
    // Target on the wrong rank for the side to move.
    assert!(matches!(
        Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - e3"),
        Err(FenError::InvalidEnPassant { .. })
    ));
    // Right rank, but no pushed pawn behind the target.
    assert!(matches!(
        Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - d6"),
        Err(FenError::InvalidEnPassant { .. })
    ));
    // Garbage square.
    assert!(matches!(
        Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - z9"),
        Err(FenError::InvalidEnPassant { .. })
    ));
    // A consistent target parses.
    assert!(Board::try_from_fen("rnbqkbnr/ppp1pppp/8/3p4/8/8/PPPPPPPP/RNBQKBNR w KQkq d6 0 2").is_ok());
}

#[test]
fn double_push_sets_en_passant_in_fen() {
    let mut board = Board::new();
    let mv = board
        .generate_moves()
        .iter()
        .find(|mv| mv.to_string() == "e2e4")
        .copied()
        .unwrap();
    let info = board.make_move(mv);
    assert_eq!(
        board.to_fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
    board.unmake_move(mv, info);
    assert_eq!(board.to_fen(), START_FEN);
}

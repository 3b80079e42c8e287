//! Legality edge cases: castling through attacks, pins, en passant
//! discovered check, promotions, and evasions.

use crate::board::Board;

fn move_strings(board: &mut Board) -> Vec<String> {
    board.generate_moves().iter().map(ToString::to_string).collect()
}

#[test]
fn start_position_has_twenty_moves() {
    let mut board = Board::new();
    assert_eq!(board.generate_moves().len(), 20);
}

#[test]
fn castling_both_sides_legal() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let moves = move_strings(&mut board);
    assert!(moves.contains(&"e1g1".to_string()));
    assert!(moves.contains(&"e1c1".to_string()));
}

#[test]
fn castling_through_attacked_square_is_illegal() {
    // The black rook on f4 covers f1: the kingside transit square is
    // attacked while the queenside path is untouched.
    let mut board = Board::from_fen("4k3/8/8/8/5r2/8/8/R3K2R w KQ - 0 1");
    let moves = move_strings(&mut board);
    assert!(!moves.contains(&"e1g1".to_string()), "f1 is attacked");
    assert!(moves.contains(&"e1c1".to_string()));
}

#[test]
fn castling_out_of_check_is_illegal() {
    let mut board = Board::from_fen("4k3/8/8/8/4r3/8/8/R3K2R w KQ - 0 1");
    let moves = move_strings(&mut board);
    assert!(!moves.contains(&"e1g1".to_string()));
    assert!(!moves.contains(&"e1c1".to_string()));
}

#[test]
fn castling_with_blocked_path_is_illegal() {
    let mut board = Board::from_fen("4k3/8/8/8/8/8/8/R2QK2R w KQ - 0 1");
    let moves = move_strings(&mut board);
    assert!(moves.contains(&"e1g1".to_string()));
    assert!(!moves.contains(&"e1c1".to_string()), "d1 is occupied");
}

#[test]
fn pinned_piece_may_only_slide_along_the_pin() {
    // White bishop on d2 is pinned by the rook on d8 against the king on d1.
    let mut board = Board::from_fen("3r2k1/8/8/8/8/8/3B4/3K4 w - - 0 1");
    let moves = move_strings(&mut board);
    // A bishop cannot move along a file, so the pinned bishop is frozen.
    assert!(moves.iter().all(|mv| !mv.starts_with("d2")));
    assert!(moves.iter().any(|mv| mv.starts_with("d1")));
}

#[test]
fn en_passant_exposing_horizontal_pin_is_illegal() {
    // After ...d7d5 the rook on h5 pins through both pawns: capturing en
    // passant removes both from the 5th rank and exposes the king.
    let mut board = Board::from_fen("8/8/8/K1Pp3r/8/8/8/7k w - d6 0 1");
    let moves = move_strings(&mut board);
    assert!(!moves.contains(&"c5d6".to_string()));
    // The plain push remains available.
    assert!(moves.contains(&"c5c6".to_string()));
}

#[test]
fn en_passant_capture_is_found_when_legal() {
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let moves = move_strings(&mut board);
    assert!(moves.contains(&"e5f6".to_string()));
    assert!(!moves.contains(&"e5d6".to_string()), "d6 is stale, only f6 was just pushed");
}

#[test]
fn all_four_underpromotions_generate() {
    let mut board = Board::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
    let moves = move_strings(&mut board);
    for promo in ["a7a8q", "a7a8r", "a7a8b", "a7a8n"] {
        assert!(moves.contains(&promo.to_string()), "missing {promo}");
    }
}

#[test]
fn king_cannot_retreat_along_the_checking_ray() {
    // Rook checks along the e-file; e2 stays covered behind the king.
    let mut board = Board::from_fen("4r2k/8/8/8/8/8/8/4K3 w - - 0 1");
    let moves = move_strings(&mut board);
    assert!(!moves.contains(&"e1e2".to_string()));
    assert!(moves.contains(&"e1d2".to_string()));
}

#[test]
fn evasions_match_legal_moves_in_check() {
    // Knight check: the queen can capture the checker, the king can step
    // aside, and nothing can block.
    let mut board = Board::from_fen("4k3/8/8/8/8/5n2/8/4KQ2 w - - 0 1");
    let mut legal = move_strings(&mut board);
    let mut evasions: Vec<String> = board
        .generate_evasions()
        .iter()
        .map(ToString::to_string)
        .collect();
    legal.sort();
    evasions.sort();
    assert_eq!(legal, evasions);
}

#[test]
fn double_check_permits_only_king_moves() {
    // Knight on f3 and rook on e8 both give check.
    let mut board = Board::from_fen("4r3/8/8/8/8/5n2/8/4K2k w - - 0 1");
    let evasions = board.generate_evasions();
    assert!(!evasions.is_empty());
    for mv in &evasions {
        assert_eq!(mv.from().to_string(), "e1");
    }
}

#[test]
fn captures_are_a_subset_of_legal_moves() {
    let mut board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let legal = move_strings(&mut board);
    let captures = board.generate_captures();
    for mv in &captures {
        assert!(mv.is_capture() || mv.is_promotion());
        assert!(legal.contains(&mv.to_string()));
    }
    // Kiwipete has exactly 8 captures at the root.
    assert_eq!(captures.iter().filter(|mv| mv.is_capture()).count(), 8);
}

#[test]
fn generation_order_is_stable() {
    let mut board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let first = move_strings(&mut board);
    let second = move_strings(&mut board);
    assert_eq!(first, second);
}

#[test]
fn no_legal_move_leaves_own_king_in_check() {
    let mut board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let moves = board.generate_moves();
    let mover = if board.white_to_move() {
        crate::board::Color::White
    } else {
        crate::board::Color::Black
    };
    for &mv in &moves {
        let info = board.make_move(mv);
        assert!(!board.is_in_check(mover), "{mv} leaves the king in check");
        board.unmake_move(mv, info);
    }
}

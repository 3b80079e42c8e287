//! Property-based tests: random legal walks must preserve every invariant.

use proptest::prelude::*;
use rand::prelude::*;

use crate::board::{Board, Move, UnmakeInfo};

fn random_walk(board: &mut Board, rng: &mut StdRng, max_moves: usize) -> Vec<(Move, UnmakeInfo)> {
    let mut applied = Vec::new();
    for _ in 0..max_moves {
        let moves = board.generate_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves.as_slice()[rng.gen_range(0..moves.len())];
        let info = board.make_move(mv);
        applied.push((mv, info));
    }
    applied
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Applying then unapplying any move sequence restores the position
    /// bit-exactly, hash included.
    #[test]
    fn make_unmake_restores_state(seed in any::<u64>(), num_moves in 1..30usize) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        let initial_hash = board.hash();
        let initial_fen = board.to_fen();

        let mut applied = random_walk(&mut board, &mut rng, num_moves);
        while let Some((mv, info)) = applied.pop() {
            board.unmake_move(mv, info);
        }

        prop_assert_eq!(board.hash(), initial_hash);
        prop_assert_eq!(board.to_fen(), initial_fen);
    }

    /// The incremental hash always equals a from-scratch recompute, and
    /// the bitboards stay internally consistent.
    #[test]
    fn incremental_hash_matches_recompute(seed in any::<u64>(), num_moves in 1..30usize) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = board.generate_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves.as_slice()[rng.gen_range(0..moves.len())];
            board.make_move(mv);
            prop_assert_eq!(board.hash(), board.calculate_hash_from_scratch());
            board.assert_consistent();
        }
    }

    /// FEN serialization round-trips through parsing for every reachable
    /// position.
    #[test]
    fn fen_round_trips(seed in any::<u64>(), num_moves in 1..30usize) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        random_walk(&mut board, &mut rng, num_moves);

        let fen = board.to_fen();
        let reparsed = Board::from_fen(&fen);
        prop_assert_eq!(reparsed.to_fen(), fen);
    }

    /// No generated move ever leaves the mover's king in check.
    #[test]
    fn legal_moves_never_leave_king_in_check(seed in any::<u64>(), num_moves in 1..20usize) {
        use crate::board::Color;

        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        random_walk(&mut board, &mut rng, num_moves);

        let mover = if board.white_to_move() { Color::White } else { Color::Black };
        let moves = board.generate_moves();
        for &mv in &moves {
            let info = board.make_move(mv);
            prop_assert!(!board.is_in_check(mover));
            board.unmake_move(mv, info);
        }
    }

    /// Swapping colors and flipping ranks negates the side-to-move
    /// evaluation exactly.
    #[test]
    fn evaluation_negates_under_color_mirror(seed in any::<u64>(), num_moves in 1..30usize) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        random_walk(&mut board, &mut rng, num_moves);

        prop_assert_eq!(board.evaluate(), -board.mirror_colors().evaluate());
    }

    /// Null move and its reversal are exact inverses anywhere.
    #[test]
    fn null_move_round_trips(seed in any::<u64>(), num_moves in 1..30usize) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        random_walk(&mut board, &mut rng, num_moves);

        let fen = board.to_fen();
        let hash = board.hash();
        let info = board.make_null_move();
        board.unmake_null_move(info);
        prop_assert_eq!(board.to_fen(), fen);
        prop_assert_eq!(board.hash(), hash);
    }
}

//! Perft: the move-generator correctness oracle.

use super::{Board, Move};

impl Board {
    /// Count the leaf positions reachable in exactly `depth` legal moves.
    #[must_use]
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for &mv in &moves {
            let info = self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.unmake_move(mv, info);
        }
        nodes
    }

    /// Per-root-move perft subtotals, for diffing against another engine.
    #[must_use]
    pub fn perft_divide(&mut self, depth: usize) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }
        let moves = self.generate_moves();
        let mut totals = Vec::with_capacity(moves.len());
        for &mv in &moves {
            let info = self.make_move(mv);
            totals.push((mv, self.perft(depth - 1)));
            self.unmake_move(mv, info);
        }
        totals
    }
}

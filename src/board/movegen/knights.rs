//! Knight move generation.

use super::super::attack_tables::KNIGHT_ATTACKS;
use super::super::{Bitboard, Board, Move, MoveList, Square};

impl Board {
    pub(crate) fn generate_knight_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.current_color();
        let own = self.occupied[color.index()].0;
        let targets = Bitboard(KNIGHT_ATTACKS[from.index()] & !own);

        for to_idx in targets.iter() {
            let to = Square::from_index(to_idx);
            if self.all_occupied.contains(to) {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::quiet(from, to));
            }
        }
    }
}

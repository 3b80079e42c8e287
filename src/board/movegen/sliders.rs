//! Bishop, rook, and queen move generation.

use super::super::attack_tables::{queen_attacks, slider_attacks};
use super::super::{Bitboard, Board, Move, MoveList, Square};

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum SliderKind {
    Bishop,
    Rook,
    Queen,
}

impl Board {
    pub(crate) fn generate_slider_moves(
        &self,
        from: Square,
        kind: SliderKind,
        moves: &mut MoveList,
    ) {
        let color = self.current_color();
        let own = self.occupied[color.index()].0;
        let occ = self.all_occupied.0;
        let attacks = match kind {
            SliderKind::Bishop => slider_attacks(from.index(), occ, true),
            SliderKind::Rook => slider_attacks(from.index(), occ, false),
            SliderKind::Queen => queen_attacks(from.index(), occ),
        };
        let targets = Bitboard(attacks & !own);

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

//! Static Exchange Evaluation.
//!
//! Scores the full capture sequence on one square without searching,
//! so the move ordering can put winning captures first and quiescence
//! can skip losing ones.

use super::attack_tables::slider_attacks;
use super::{Bitboard, Board, Piece, Square};

/// Exchange values; deliberately simpler than the evaluation's material
/// terms so SEE stays a pure material swap-off.
const SEE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 20000];

const MAX_EXCHANGE_DEPTH: usize = 32;

impl Board {
    /// Net material outcome of capturing on `to` with the piece on `from`,
    /// assuming both sides keep recapturing with their least valuable
    /// attacker while it is profitable. Positive means the first capture
    /// wins material.
    #[must_use]
    pub fn see(&self, from: Square, to: Square) -> i32 {
        let victim = match self.piece_at(to) {
            Some((_, piece)) => piece,
            // En passant: the victim is a pawn not on the target square.
            None if self.en_passant_target == Some(to) => Piece::Pawn,
            None => return 0,
        };
        let Some((_, attacker)) = self.piece_at(from) else {
            return 0;
        };

        let mut gain = [0i32; MAX_EXCHANGE_DEPTH];
        let mut depth = 0usize;
        gain[0] = SEE_VALUES[victim.index()];

        let mut occupancy = self.all_occupied.0;
        let mut attackers = self.attackers_to(to, Bitboard(occupancy));
        let mut current_attacker = attacker;
        let mut from_bb = Bitboard::from_square(from);
        let mut side_idx = usize::from(!self.white_to_move);

        loop {
            // Lift the current attacker off the board and reveal any x-ray
            // attacker standing behind it.
            occupancy ^= from_bb.0;
            attackers.0 &= !from_bb.0;
            if matches!(current_attacker, Piece::Pawn | Piece::Bishop | Piece::Queen) {
                let revealed = slider_attacks(to.index(), occupancy, true)
                    & self.diagonal_sliders().0
                    & occupancy;
                attackers.0 |= revealed;
            }
            if matches!(current_attacker, Piece::Rook | Piece::Queen) {
                let revealed = slider_attacks(to.index(), occupancy, false)
                    & self.straight_sliders().0
                    & occupancy;
                attackers.0 |= revealed;
            }

            side_idx = 1 - side_idx;
            let side_attackers = Bitboard(attackers.0 & self.occupied[side_idx].0);
            if side_attackers.is_empty() {
                break;
            }

            depth += 1;
            if depth >= MAX_EXCHANGE_DEPTH {
                break;
            }

            let (lva_piece, lva_bb) = self.least_valuable_attacker(side_attackers, side_idx);

            gain[depth] = SEE_VALUES[current_attacker.index()] - gain[depth - 1];

            // Neither continuation can be profitable: stop expanding.
            if (-gain[depth - 1]).max(gain[depth]) < 0 {
                break;
            }

            // A king cannot recapture into a defended square.
            if lva_piece == Piece::King
                && attackers.0 & self.occupied[1 - side_idx].0 != 0
            {
                break;
            }

            current_attacker = lva_piece;
            from_bb = lva_bb;
        }

        while depth > 0 {
            depth -= 1;
            gain[depth] = -(-gain[depth]).max(gain[depth + 1]);
        }
        gain[0]
    }

    fn least_valuable_attacker(&self, attackers: Bitboard, side_idx: usize) -> (Piece, Bitboard) {
        for piece in Piece::ALL {
            let candidates = attackers.0 & self.pieces[side_idx][piece.index()].0;
            if candidates != 0 {
                let lsb = candidates & candidates.wrapping_neg();
                return (piece, Bitboard(lsb));
            }
        }
        // Callers only invoke this with a non-empty attacker set.
        debug_assert!(false, "least_valuable_attacker on empty set");
        (Piece::King, Bitboard::EMPTY)
    }
}

//! King move generation, castling candidates, and attack queries.

use super::super::attack_tables::{slider_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};
use super::super::{Bitboard, Board, Color, Move, MoveList, Piece, Square};

impl Board {
    pub(crate) fn generate_king_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.current_color();
        let own = self.occupied[color.index()].0;
        let targets = Bitboard(KING_ATTACKS[from.index()] & !own);

        for to_idx in targets.iter() {
            let to = Square::from_index(to_idx);
            if self.all_occupied.contains(to) {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::quiet(from, to));
            }
        }

        // Castling candidates; the attacked-square checks happen in the
        // legality pass so pseudo generation stays cheap.
        let back_rank = if color == Color::White { 0 } else { 7 };
        if from == Square::new(back_rank, 4) {
            if self.has_castling_right(color, true)
                && self.is_empty_square(Square::new(back_rank, 5))
                && self.is_empty_square(Square::new(back_rank, 6))
                && self.piece_at(Square::new(back_rank, 7)) == Some((color, Piece::Rook))
            {
                moves.push(Move::castle_kingside(from, Square::new(back_rank, 6)));
            }
            if self.has_castling_right(color, false)
                && self.is_empty_square(Square::new(back_rank, 3))
                && self.is_empty_square(Square::new(back_rank, 2))
                && self.is_empty_square(Square::new(back_rank, 1))
                && self.piece_at(Square::new(back_rank, 0)) == Some((color, Piece::Rook))
            {
                moves.push(Move::castle_queenside(from, Square::new(back_rank, 2)));
            }
        }
    }

    pub(crate) fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces[color.index()][Piece::King.index()]
            .iter()
            .next()
            .map(Square::from_index)
    }

    /// Whether `attacker_color` attacks `square` on the current occupancy.
    pub(crate) fn is_square_attacked(&self, square: Square, attacker_color: Color) -> bool {
        let idx = square.index();
        let c = attacker_color.index();

        // Reverse lookup: the attacking pawns sit on the squares a pawn of
        // the defending color would attack from `square`.
        let pawn_sources = PAWN_ATTACKS[attacker_color.opponent().index()][idx];
        if self.pieces[c][Piece::Pawn.index()].0 & pawn_sources != 0 {
            return true;
        }

        if self.pieces[c][Piece::Knight.index()].0 & KNIGHT_ATTACKS[idx] != 0 {
            return true;
        }
        if self.pieces[c][Piece::King.index()].0 & KING_ATTACKS[idx] != 0 {
            return true;
        }

        let straight =
            self.pieces[c][Piece::Rook.index()].0 | self.pieces[c][Piece::Queen.index()].0;
        if slider_attacks(idx, self.all_occupied.0, false) & straight != 0 {
            return true;
        }
        let diagonal =
            self.pieces[c][Piece::Bishop.index()].0 | self.pieces[c][Piece::Queen.index()].0;
        slider_attacks(idx, self.all_occupied.0, true) & diagonal != 0
    }

    /// Whether `color`'s king is attacked.
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.find_king(color) {
            Some(king_sq) => self.is_square_attacked(king_sq, color.opponent()),
            None => false,
        }
    }
}

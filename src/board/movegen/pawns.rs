//! Pawn move generation.

use super::super::{Board, Color, Move, MoveList, Piece, Square};

impl Board {
    pub(crate) fn generate_pawn_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.current_color();
        let dir: isize = if color == Color::White { 1 } else { -1 };
        let start_rank = if color == Color::White { 1 } else { 6 };
        let promotion_rank = if color == Color::White { 7 } else { 0 };

        let rank = from.rank() as isize;
        let forward_rank = rank + dir;
        if !(0..8).contains(&forward_rank) {
            return;
        }

        let forward = Square::new(forward_rank as usize, from.file());
        if self.is_empty_square(forward) {
            if forward.rank() == promotion_rank {
                for promo in Piece::PROMOTIONS {
                    moves.push(Move::promotion(from, forward, promo));
                }
            } else {
                moves.push(Move::quiet(from, forward));
                if from.rank() == start_rank {
                    let double = Square::new((rank + 2 * dir) as usize, from.file());
                    if self.is_empty_square(double) {
                        moves.push(Move::double_pawn_push(from, double));
                    }
                }
            }
        }

        self.generate_pawn_captures(from, moves, promotion_rank, forward_rank as usize);
    }

    /// Captures and promotions only; quiescence uses this directly.
    pub(crate) fn generate_pawn_tactical_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.current_color();
        let dir: isize = if color == Color::White { 1 } else { -1 };
        let promotion_rank = if color == Color::White { 7 } else { 0 };

        let forward_rank = from.rank() as isize + dir;
        if !(0..8).contains(&forward_rank) {
            return;
        }

        let forward = Square::new(forward_rank as usize, from.file());
        if forward.rank() == promotion_rank && self.is_empty_square(forward) {
            for promo in Piece::PROMOTIONS {
                moves.push(Move::promotion(from, forward, promo));
            }
        }

        self.generate_pawn_captures(from, moves, promotion_rank, forward_rank as usize);
    }

    fn generate_pawn_captures(
        &self,
        from: Square,
        moves: &mut MoveList,
        promotion_rank: usize,
        forward_rank: usize,
    ) {
        let color = self.current_color();
        for df in [-1isize, 1] {
            let file = from.file() as isize + df;
            if !(0..8).contains(&file) {
                continue;
            }
            let target = Square::new(forward_rank, file as usize);
            if let Some((victim_color, _)) = self.piece_at(target) {
                if victim_color != color {
                    if target.rank() == promotion_rank {
                        for promo in Piece::PROMOTIONS {
                            moves.push(Move::promotion_capture(from, target, promo));
                        }
                    } else {
                        moves.push(Move::capture(from, target));
                    }
                }
            } else if Some(target) == self.en_passant_target {
                moves.push(Move::en_passant(from, target));
            }
        }
    }
}

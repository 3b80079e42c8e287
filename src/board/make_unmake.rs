//! Applying and reversing moves with incremental hash maintenance.
//!
//! `make_move` toggles exactly the Zobrist components a move changes;
//! `unmake_move` reverses the board updates and restores the previous hash
//! from the undo record, never recomputing. [`Board::assert_consistent`]
//! compares the incremental hash against a from-scratch recompute; tests
//! and search entry invoke it so XOR bookkeeping bugs surface without
//! slowing the per-move hot path.

use crate::zobrist::{castling_key, ep_file_key, piece_key, side_key};

use super::{Board, Color, Move, NullMoveInfo, Piece, Square, UnmakeInfo};

impl Board {
    /// Full hash recompute; the reference the incremental updates must match.
    pub(crate) fn calculate_hash_from_scratch(&self) -> u64 {
        let mut hash = 0u64;
        for color in [Color::White, Color::Black] {
            for piece in Piece::ALL {
                for idx in self.pieces[color.index()][piece.index()].iter() {
                    hash ^= piece_key(color, piece, Square::from_index(idx));
                }
            }
        }
        if !self.white_to_move {
            hash ^= side_key();
        }
        hash ^= castling_key(self.castling_rights);
        if let Some(ep) = self.en_passant_target {
            hash ^= ep_file_key(ep.file());
        }
        hash
    }

    /// Apply a move, returning the record needed to reverse it.
    ///
    /// The move must come from this position's legal or pseudo-legal move
    /// set; legality filtering happens in move generation.
    pub fn make_move(&mut self, mv: Move) -> UnmakeInfo {
        let color = self.current_color();
        let opponent = color.opponent();
        let from = mv.from();
        let to = mv.to();

        let info_template = UnmakeInfo {
            captured: None,
            previous_en_passant_target: self.en_passant_target,
            previous_castling_rights: self.castling_rights,
            previous_halfmove_clock: self.halfmove_clock,
            previous_fullmove_number: self.fullmove_number,
            previous_hash: self.hash,
        };

        self.hash ^= side_key();

        if let Some(ep) = self.en_passant_target.take() {
            self.hash ^= ep_file_key(ep.file());
        }

        let moved = match self.piece_at(from) {
            Some((_, piece)) => piece,
            None => {
                debug_assert!(false, "make_move from an empty square");
                Piece::Pawn
            }
        };

        // Remove the captured piece from its actual square (which differs
        // from the destination only for en passant).
        let mut captured = None;
        if mv.is_en_passant() {
            let capture_rank = if color == Color::White {
                to.rank() - 1
            } else {
                to.rank() + 1
            };
            let capture_sq = Square::new(capture_rank, to.file());
            self.remove_piece(capture_sq, opponent, Piece::Pawn);
            self.hash ^= piece_key(opponent, Piece::Pawn, capture_sq);
            captured = Some((opponent, Piece::Pawn, capture_sq));
        } else if mv.is_capture() {
            if let Some((cap_color, cap_piece)) = self.piece_at(to) {
                self.remove_piece(to, cap_color, cap_piece);
                self.hash ^= piece_key(cap_color, cap_piece, to);
                captured = Some((cap_color, cap_piece, to));
            }
        }

        // Move the piece, promoting if required.
        self.remove_piece(from, color, moved);
        self.hash ^= piece_key(color, moved, from);
        let placed = mv.promotion_piece().unwrap_or(moved);
        self.set_piece(to, color, placed);
        self.hash ^= piece_key(color, placed, to);

        if mv.is_castling() {
            let back_rank = from.rank();
            let (rook_from, rook_to) = if mv.is_castle_kingside() {
                (Square::new(back_rank, 7), Square::new(back_rank, 5))
            } else {
                (Square::new(back_rank, 0), Square::new(back_rank, 3))
            };
            self.remove_piece(rook_from, color, Piece::Rook);
            self.set_piece(rook_to, color, Piece::Rook);
            self.hash ^= piece_key(color, Piece::Rook, rook_from);
            self.hash ^= piece_key(color, Piece::Rook, rook_to);
        }

        let new_rights = self.castling_rights_after(moved, color, from, &captured);
        if new_rights != self.castling_rights {
            self.hash ^= castling_key(self.castling_rights ^ new_rights);
            self.castling_rights = new_rights;
        }

        if mv.is_double_pawn_push() {
            let ep_rank = usize::midpoint(from.rank(), to.rank());
            let ep = Square::new(ep_rank, from.file());
            self.en_passant_target = Some(ep);
            self.hash ^= ep_file_key(ep.file());
        }

        self.white_to_move = !self.white_to_move;
        if captured.is_some() || moved == Piece::Pawn {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if color == Color::Black {
            self.fullmove_number += 1;
        }

        self.repetition_counts.increment(self.hash);

        UnmakeInfo {
            captured,
            ..info_template
        }
    }

    /// Castling rights remaining after this move: a king move revokes both
    /// of the mover's rights, moving or losing a corner rook revokes one.
    fn castling_rights_after(
        &self,
        moved: Piece,
        color: Color,
        from: Square,
        captured: &Option<(Color, Piece, Square)>,
    ) -> u8 {
        let mut rights = self.castling_rights;

        if moved == Piece::King {
            rights &= !(super::castle_bit(color, true) | super::castle_bit(color, false));
        } else if moved == Piece::Rook {
            let back_rank = if color == Color::White { 0 } else { 7 };
            if from == Square::new(back_rank, 7) {
                rights &= !super::castle_bit(color, true);
            } else if from == Square::new(back_rank, 0) {
                rights &= !super::castle_bit(color, false);
            }
        }

        if let Some((cap_color, Piece::Rook, cap_sq)) = captured {
            let back_rank = if *cap_color == Color::White { 0 } else { 7 };
            if *cap_sq == Square::new(back_rank, 7) {
                rights &= !super::castle_bit(*cap_color, true);
            } else if *cap_sq == Square::new(back_rank, 0) {
                rights &= !super::castle_bit(*cap_color, false);
            }
        }

        rights
    }

    /// Reverse the last applied move. Restores every field bit-exact,
    /// including the hash, without recomputation.
    pub fn unmake_move(&mut self, mv: Move, info: UnmakeInfo) {
        self.repetition_counts.decrement(self.hash);

        self.white_to_move = !self.white_to_move;
        let color = self.current_color();
        let from = mv.from();
        let to = mv.to();

        let placed = match self.piece_at(to) {
            Some((_, piece)) => piece,
            None => {
                debug_assert!(false, "unmake_move with empty destination");
                Piece::Pawn
            }
        };
        let moved = if mv.is_promotion() {
            Piece::Pawn
        } else {
            placed
        };
        self.remove_piece(to, color, placed);
        self.set_piece(from, color, moved);

        if let Some((cap_color, cap_piece, cap_sq)) = info.captured {
            self.set_piece(cap_sq, cap_color, cap_piece);
        }

        if mv.is_castling() {
            let back_rank = from.rank();
            let (rook_from, rook_to) = if mv.is_castle_kingside() {
                (Square::new(back_rank, 7), Square::new(back_rank, 5))
            } else {
                (Square::new(back_rank, 0), Square::new(back_rank, 3))
            };
            self.remove_piece(rook_to, color, Piece::Rook);
            self.set_piece(rook_from, color, Piece::Rook);
        }

        self.en_passant_target = info.previous_en_passant_target;
        self.castling_rights = info.previous_castling_rights;
        self.halfmove_clock = info.previous_halfmove_clock;
        self.fullmove_number = info.previous_fullmove_number;
        self.hash = info.previous_hash;
    }

    /// Pass the turn: flip the side to move and clear en passant, toggling
    /// only the changed hash components.
    pub(crate) fn make_null_move(&mut self) -> NullMoveInfo {
        let info = NullMoveInfo {
            previous_en_passant_target: self.en_passant_target,
            previous_hash: self.hash,
        };
        self.hash ^= side_key();
        if let Some(ep) = self.en_passant_target.take() {
            self.hash ^= ep_file_key(ep.file());
        }
        self.white_to_move = !self.white_to_move;
        info
    }

    pub(crate) fn unmake_null_move(&mut self, info: NullMoveInfo) {
        self.white_to_move = !self.white_to_move;
        self.en_passant_target = info.previous_en_passant_target;
        self.hash = info.previous_hash;
    }
}

impl Board {
    /// Full-state consistency check: the incremental hash against a
    /// from-scratch recompute, the occupancy partition, and king counts.
    /// Too expensive for the per-move hot path; tests and search entry
    /// call it explicitly.
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(
            self.hash,
            self.calculate_hash_from_scratch(),
            "incremental hash diverged from recompute"
        );

        for c in 0..2 {
            let mut union = 0u64;
            for p in 0..6 {
                union |= self.pieces[c][p].0;
            }
            assert_eq!(union, self.occupied[c].0, "color occupancy out of sync");
        }
        assert_eq!(
            self.occupied[0].0 | self.occupied[1].0,
            self.all_occupied.0,
            "total occupancy out of sync"
        );
        assert_eq!(
            self.occupied[0].0 & self.occupied[1].0,
            0,
            "colors overlap"
        );

        for color in [Color::White, Color::Black] {
            assert_eq!(
                self.pieces[color.index()][Piece::King.index()].popcount(),
                1,
                "king count must be exactly one"
            );
        }
    }
}

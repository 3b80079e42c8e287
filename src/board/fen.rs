//! FEN parsing and serialization.

use super::error::FenError;
use super::{
    file_to_index, rank_to_index, Board, Color, Piece, Square, CASTLE_BLACK_K, CASTLE_BLACK_Q,
    CASTLE_WHITE_K, CASTLE_WHITE_Q,
};

impl Board {
    /// Parse a position from FEN.
    ///
    /// Accepts the 4-, 5-, or 6-field variants; a missing halfmove clock
    /// defaults to 0 and a missing fullmove number to 1. Rejects malformed
    /// placements, king counts other than one per side, and en-passant
    /// targets inconsistent with the side to move.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let fields: Vec<&str> = fen.split_whitespace().collect();

        if fields.len() < 4 {
            return Err(FenError::TooFewFields {
                found: fields.len(),
            });
        }

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { piece: c })?;
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if file >= 8 {
                        return Err(FenError::BadRankWidth { rank: rank + 1 });
                    }
                    board.set_piece(Square::new(rank, file), color, piece);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::BadRankWidth { rank: rank + 1 });
            }
        }

        let white_kings = board.pieces[0][Piece::King.index()].popcount();
        let black_kings = board.pieces[1][Piece::King.index()].popcount();
        if white_kings != 1 || black_kings != 1 {
            return Err(FenError::BadKingCount {
                white: white_kings,
                black: black_kings,
            });
        }

        match fields[1] {
            "w" => board.white_to_move = true,
            "b" => board.white_to_move = false,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        }

        if fields[2] != "-" {
            for c in fields[2].chars() {
                match c {
                    'K' => board.castling_rights |= CASTLE_WHITE_K,
                    'Q' => board.castling_rights |= CASTLE_WHITE_Q,
                    'k' => board.castling_rights |= CASTLE_BLACK_K,
                    'q' => board.castling_rights |= CASTLE_BLACK_Q,
                    _ => return Err(FenError::InvalidCastling { castling: c }),
                }
            }
        }

        board.en_passant_target = if fields[3] == "-" {
            None
        } else {
            let chars: Vec<char> = fields[3].chars().collect();
            let valid = chars.len() == 2
                && ('a'..='h').contains(&chars[0])
                && ('1'..='8').contains(&chars[1]);
            if !valid {
                return Err(FenError::InvalidEnPassant {
                    found: fields[3].to_string(),
                });
            }
            let sq = Square::new(rank_to_index(chars[1]), file_to_index(chars[0]));
            if !board.en_passant_square_consistent(sq) {
                return Err(FenError::InvalidEnPassant {
                    found: fields[3].to_string(),
                });
            }
            Some(sq)
        };

        board.halfmove_clock = match fields.get(4) {
            Some(s) => s.parse().map_err(|_| FenError::InvalidCounter {
                found: (*s).to_string(),
            })?,
            None => 0,
        };
        board.fullmove_number = match fields.get(5) {
            Some(s) => s.parse().map_err(|_| FenError::InvalidCounter {
                found: (*s).to_string(),
            })?,
            None => 1,
        };

        board.hash = board.calculate_hash_from_scratch();
        board.repetition_counts.reset_to(board.hash);
        Ok(board)
    }

    /// Parse a position from FEN, panicking on malformed input.
    /// Use [`Board::try_from_fen`] for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("invalid FEN string")
    }

    /// The en-passant target must sit on the rank the opposing side just
    /// double-pushed through, with the pushed pawn one square beyond it
    /// and the square itself (plus the origin) empty.
    fn en_passant_square_consistent(&self, sq: Square) -> bool {
        let (expected_rank, pawn_color, pawn_rank, origin_rank) = if self.white_to_move {
            // Black pushed through rank 6 to rank 5.
            (5, Color::Black, 4, 6)
        } else {
            (2, Color::White, 3, 1)
        };
        if sq.rank() != expected_rank {
            return false;
        }
        let pawn_sq = Square::new(pawn_rank, sq.file());
        let origin_sq = Square::new(origin_rank, sq.file());
        self.piece_at(pawn_sq) == Some((pawn_color, Piece::Pawn))
            && self.is_empty_square(sq)
            && self.is_empty_square(origin_sq)
    }

    /// Serialize the position as a six-field FEN string.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                if let Some((color, piece)) = self.piece_at(Square::new(rank, file)) {
                    if empty > 0 {
                        placement.push_str(&empty.to_string());
                        empty = 0;
                    }
                    placement.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let side = if self.white_to_move { "w" } else { "b" };

        let mut castling = String::new();
        for (bit, c) in [
            (CASTLE_WHITE_K, 'K'),
            (CASTLE_WHITE_Q, 'Q'),
            (CASTLE_BLACK_K, 'k'),
            (CASTLE_BLACK_Q, 'q'),
        ] {
            if self.castling_rights & bit != 0 {
                castling.push(c);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = self
            .en_passant_target
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{placement} {side} {castling} {en_passant} {} {}",
            self.halfmove_clock, self.fullmove_number
        )
    }
}

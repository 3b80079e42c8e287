//! Error types for board operations.

use std::fmt;

/// FEN parsing failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few fields (needs at least 4)
    TooFewFields { found: usize },
    /// Piece placement does not describe exactly 8 ranks
    WrongRankCount { found: usize },
    /// Invalid piece character in the placement field
    InvalidPiece { piece: char },
    /// A rank describes more or fewer than 8 files
    BadRankWidth { rank: usize },
    /// Invalid side-to-move field (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid castling character
    InvalidCastling { castling: char },
    /// Invalid or inconsistent en passant square
    InvalidEnPassant { found: String },
    /// Invalid halfmove or fullmove counter
    InvalidCounter { found: String },
    /// A side has no king or more than one
    BadKingCount { white: u32, black: u32 },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewFields { found } => {
                write!(f, "FEN must have at least 4 fields, found {found}")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::InvalidPiece { piece } => {
                write!(f, "invalid piece character '{piece}' in FEN")
            }
            FenError::BadRankWidth { rank } => {
                write!(f, "rank {rank} of FEN placement does not cover 8 files")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { castling } => {
                write!(f, "invalid castling character '{castling}' in FEN")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square '{found}'")
            }
            FenError::InvalidCounter { found } => {
                write!(f, "invalid move counter '{found}'")
            }
            FenError::BadKingCount { white, black } => {
                write!(
                    f,
                    "each side needs exactly one king, found {white} white and {black} black"
                )
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Long-algebraic move string failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string must be 4 or 5 characters
    InvalidLength { len: usize },
    /// Invalid square coordinates in the move string
    InvalidSquare { notation: String },
    /// Promotion letter is not one of q, r, b, n
    InvalidPromotion { promotion: char },
    /// Well-formed move that is not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "invalid square in move '{notation}'")
            }
            MoveParseError::InvalidPromotion { promotion } => {
                write!(f, "invalid promotion piece '{promotion}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

//! The engine-to-host facade.
//!
//! [`Game`] wraps a [`Board`] with an applied-move journal and exposes the
//! operations protocol layers consume: FEN I/O, long-algebraic move
//! application and undo, state queries, search, and perft. Every fallible
//! operation returns an [`EngineError`] kind for the host to map onto its
//! transport.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::AtomicBool;

use crate::board::{
    find_best_move, Board, FenError, Move, MoveParseError, Piece, SearchLimits, SearchOptions,
    SearchReport, SearchState, Square, UnmakeInfo,
};

/// Boundary error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Malformed or inconsistent FEN input.
    InvalidFen(FenError),
    /// Move string that does not name a legal move here.
    IllegalMove(MoveParseError),
    /// Undo requested with no applied moves.
    HistoryEmpty,
    /// Search stopped before any root move completed.
    SearchAborted,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidFen(err) => write!(f, "invalid FEN: {err}"),
            EngineError::IllegalMove(err) => write!(f, "{err}"),
            EngineError::HistoryEmpty => write!(f, "no move to undo"),
            EngineError::SearchAborted => write!(f, "search aborted"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::InvalidFen(err) => Some(err),
            EngineError::IllegalMove(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FenError> for EngineError {
    fn from(err: FenError) -> Self {
        EngineError::InvalidFen(err)
    }
}

impl From<MoveParseError> for EngineError {
    fn from(err: MoveParseError) -> Self {
        EngineError::IllegalMove(err)
    }
}

/// A playable game: a position plus the journal of applied moves.
pub struct Game {
    board: Board,
    journal: Vec<(Move, UnmakeInfo)>,
}

impl Game {
    /// Start a game from the standard position.
    #[must_use]
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            journal: Vec::new(),
        }
    }

    /// Start a game from a FEN position.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        Ok(Game {
            board: Board::try_from_fen(fen)?,
            journal: Vec::new(),
        })
    }

    /// The current position as FEN.
    #[must_use]
    pub fn fen(&self) -> String {
        self.board.to_fen()
    }

    /// Read access to the underlying position.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// All legal moves in long-algebraic form.
    #[must_use]
    pub fn legal_moves(&mut self) -> Vec<String> {
        self.board
            .generate_moves()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[must_use]
    pub fn in_check(&self) -> bool {
        self.board.is_in_check(self.board.current_color())
    }

    #[must_use]
    pub fn is_checkmate(&mut self) -> bool {
        self.board.is_checkmate()
    }

    #[must_use]
    pub fn is_stalemate(&mut self) -> bool {
        self.board.is_stalemate()
    }

    /// Draw by the 50-move rule, threefold repetition, or insufficient
    /// material.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.board.is_theoretical_draw()
    }

    /// The most recently applied move, if any.
    #[must_use]
    pub fn last_move(&self) -> Option<String> {
        self.journal.last().map(|(mv, _)| mv.to_string())
    }

    /// Applied moves in order, long-algebraic.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.journal
            .iter()
            .map(|(mv, _)| mv.to_string())
            .collect()
    }

    /// Map a long-algebraic string onto the current legal move set.
    fn resolve_uci(&mut self, notation: &str) -> Result<Move, MoveParseError> {
        let len = notation.chars().count();
        if !(4..=5).contains(&len) || !notation.is_ascii() {
            return Err(MoveParseError::InvalidLength { len });
        }
        let from = Square::from_str(&notation[0..2]).map_err(|_| MoveParseError::InvalidSquare {
            notation: notation.to_string(),
        })?;
        let to = Square::from_str(&notation[2..4]).map_err(|_| MoveParseError::InvalidSquare {
            notation: notation.to_string(),
        })?;
        let promotion = match notation.chars().nth(4) {
            None => None,
            Some(c @ ('q' | 'r' | 'b' | 'n')) => Piece::from_char(c),
            Some(c) => return Err(MoveParseError::InvalidPromotion { promotion: c }),
        };

        self.board
            .generate_moves()
            .iter()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion_piece() == promotion)
            .copied()
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: notation.to_string(),
            })
    }

    /// Apply a move given in long-algebraic form.
    pub fn apply_uci(&mut self, notation: &str) -> Result<(), EngineError> {
        let mv = self.resolve_uci(notation)?;
        let info = self.board.make_move(mv);
        self.journal.push((mv, info));
        Ok(())
    }

    /// Undo the most recently applied move.
    pub fn undo(&mut self) -> Result<(), EngineError> {
        let (mv, info) = self.journal.pop().ok_or(EngineError::HistoryEmpty)?;
        self.board.unmake_move(mv, info);
        Ok(())
    }

    /// Search the current position.
    ///
    /// Each call owns a fresh transposition table sized from the options;
    /// nothing persists between searches.
    pub fn search(
        &mut self,
        limits: &SearchLimits,
        options: &SearchOptions,
    ) -> Result<SearchReport, EngineError> {
        let mut state = SearchState::new(options.tt_capacity_entries);
        let stop = AtomicBool::new(false);
        find_best_move(&mut self.board, &mut state, limits, options, &stop)
            .map_err(|_| EngineError::SearchAborted)
    }

    /// Leaf count of the legal move tree at `depth`.
    #[must_use]
    pub fn perft(&mut self, depth: usize) -> u64 {
        self.board.perft(depth)
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

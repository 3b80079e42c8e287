//! Deterministic chess engine core.
//!
//! Provides the compute kernel an engine front-end builds on:
//! - Bitboard-based position with incremental Zobrist hashing and make/unmake
//! - Legal move generation (all moves, captures, check evasions)
//! - Tapered static evaluation
//! - Iterative-deepening alpha-beta search with a transposition table and
//!   quiescence search
//! - Perft for move-generator verification
//!
//! The crate is I/O-free: protocol loops, HTTP session handling, and CLIs
//! live outside and drive it through [`Game`] or the `board` module.
//!
//! # Quick Start
//!
//! ```
//! use chesscore::board::{Board, SearchLimits, SearchOptions, SearchState};
//! use chesscore::board::find_best_move;
//! use std::sync::atomic::AtomicBool;
//!
//! let mut board = Board::new();
//! let options = SearchOptions::default();
//! let mut state = SearchState::new(options.tt_capacity_entries);
//! let stop = AtomicBool::new(false);
//! let report = find_best_move(&mut board, &mut state, &SearchLimits::depth(4), &options, &stop)
//!     .expect("search completed");
//! println!("best move: {}", report.best_move.expect("start position has moves"));
//! ```
//!
//! # Driving a game
//!
//! ```
//! use chesscore::Game;
//!
//! let mut game = Game::new();
//! game.apply_uci("e2e4").unwrap();
//! game.apply_uci("e7e5").unwrap();
//! assert!(!game.is_checkmate());
//! game.undo().unwrap();
//! ```
//!
//! # Features
//!
//! - `serde` - serialization for the public vocabulary and report types
//! - `logging` - per-iteration search diagnostics via the `log` facade

#![warn(clippy::pedantic)]
// Bitboard hex literals are clearer without separators (bit patterns visible)
#![allow(clippy::unreadable_literal)]
// Chess engines have intentionally similar names (eval_mg/eval_eg, etc.)
#![allow(clippy::similar_names)]
// Index casts are ubiquitous and safe in chess (board indices, square indices)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
// Large arrays are needed for move lists and attack tables
#![allow(clippy::large_stack_arrays)]
// Module-level documentation is sufficient for this codebase
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod board;
pub mod game;
pub mod tt;
pub mod zobrist;

pub use game::{EngineError, Game};

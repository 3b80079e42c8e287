//! Board and search test suite.

mod fen;
mod make_unmake;
mod movegen;
mod perft;
mod props;

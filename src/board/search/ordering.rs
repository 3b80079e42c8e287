//! Move ordering.
//!
//! Priority: TT move, winning captures by SEE (MVV-LVA within the same
//! SEE class), killers for the ply, then quiet moves by history score.
//! Losing captures sink below quiet moves. Scoring is a pure function of
//! the position and the search tables, so enumeration stays deterministic.

use super::alphabeta::SearchContext;
use super::{Move, EMPTY_MOVE};
use crate::board::{MoveList, Piece, ScoredMoveList};

const TT_MOVE_SCORE: i32 = 1 << 20;
const WINNING_CAPTURE_BASE: i32 = 600_000;
const KILLER1_SCORE: i32 = 400_000;
const KILLER2_SCORE: i32 = 399_000;
const LOSING_CAPTURE_BASE: i32 = -200_000;

impl SearchContext<'_> {
    /// MVV-LVA: ten times the victim value minus the attacker value, so
    /// victims dominate and cheaper attackers break ties.
    pub(super) fn mvv_lva(&self, mv: Move) -> i32 {
        let attacker = match self.board.piece_at(mv.from()) {
            Some((_, piece)) => piece.value(),
            None => return 0,
        };
        let victim = if mv.is_en_passant() {
            Piece::Pawn.value()
        } else {
            match self.board.piece_at(mv.to()) {
                Some((_, piece)) => piece.value(),
                None => return 0,
            }
        };
        victim * 10 - attacker
    }

    pub(super) fn order_moves(&self, moves: &MoveList, tt_move: Move, ply: usize) -> ScoredMoveList {
        let killer1 = self.state.killers.primary(ply);
        let killer2 = self.state.killers.secondary(ply);

        let mut scored = ScoredMoveList::new();
        for &mv in moves {
            let score = if mv != EMPTY_MOVE && mv == tt_move {
                TT_MOVE_SCORE
            } else if mv.is_capture() {
                let exchange = self.board.see(mv.from(), mv.to());
                if exchange >= 0 {
                    WINNING_CAPTURE_BASE + self.mvv_lva(mv)
                } else {
                    LOSING_CAPTURE_BASE + self.mvv_lva(mv)
                }
            } else if mv.is_promotion() {
                // Quiet promotions rank with winning captures.
                WINNING_CAPTURE_BASE + mv.promotion_piece().map_or(0, Piece::value)
            } else if mv == killer1 {
                KILLER1_SCORE
            } else if mv == killer2 {
                KILLER2_SCORE
            } else {
                self.state.history.score(mv)
            };
            scored.push(mv, score);
        }
        scored.sort_by_score_desc();
        scored
    }

    /// Capture-only ordering for quiescence: plain MVV-LVA.
    pub(super) fn order_captures(&self, moves: &MoveList) -> ScoredMoveList {
        let mut scored = ScoredMoveList::new();
        for &mv in moves {
            scored.push(mv, self.mvv_lva(mv));
        }
        scored.sort_by_score_desc();
        scored
    }
}

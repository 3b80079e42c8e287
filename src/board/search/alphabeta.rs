//! The negamax recursion with pruning and reductions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::tt::BoundType;

use super::{
    Board, Move, SearchClock, SearchLimits, SearchOptions, SearchState, EMPTY_MOVE, INFINITY,
    MATE_SCORE, MATE_THRESHOLD, MAX_PLY, NODE_CHECK_INTERVAL,
};

/// Futility margin at the frontier (depth 1).
const FUTILITY_MARGIN: i32 = 100;

/// Null-move depth reduction.
const NULL_MOVE_REDUCTION: u32 = 2;

/// Quiet moves from this ordering index on are candidates for reduction.
const LMR_MOVE_THRESHOLD: usize = 4;

/// State for one search: the position, the reusable work area, limits,
/// and node accounting. Threaded through the whole recursion.
pub(super) struct SearchContext<'a> {
    pub(super) board: &'a mut Board,
    pub(super) state: &'a mut SearchState,
    pub(super) options: SearchOptions,
    stop: &'a AtomicBool,
    clock: Arc<SearchClock>,
    node_limit: u64,
    pub(super) nodes: u64,
    pub(super) qnodes: u64,
    pub(super) seldepth: u32,
    pub(super) stopped: bool,
    /// Best fully-searched root move of the current iteration.
    pub(super) root_best: Option<(Move, i32)>,
}

impl<'a> SearchContext<'a> {
    pub(super) fn new(
        board: &'a mut Board,
        state: &'a mut SearchState,
        options: &SearchOptions,
        stop: &'a AtomicBool,
        clock: &Arc<SearchClock>,
        limits: &SearchLimits,
    ) -> Self {
        SearchContext {
            board,
            state,
            options: *options,
            stop,
            clock: Arc::clone(clock),
            node_limit: limits.nodes.unwrap_or(0),
            nodes: 0,
            qnodes: 0,
            seldepth: 0,
            stopped: false,
            root_best: None,
        }
    }

    /// Cooperative stop check; the clock is only consulted every
    /// `NODE_CHECK_INTERVAL` nodes to keep it off the hot path.
    pub(super) fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if self.node_limit > 0 && self.nodes >= self.node_limit {
            self.stopped = true;
            return true;
        }
        if self.nodes % NODE_CHECK_INTERVAL == 0
            && (self.stop.load(Ordering::Relaxed) || self.clock.expired())
        {
            self.stopped = true;
            return true;
        }
        false
    }

    pub(super) fn elapsed_ms(&self) -> u64 {
        self.clock.elapsed_ms()
    }

    /// Unconditional stop check at iteration boundaries, where the cost of
    /// reading the clock is irrelevant.
    pub(super) fn check_boundary_stop(&mut self) -> bool {
        if self.stop.load(Ordering::Relaxed)
            || self.clock.expired()
            || (self.node_limit > 0 && self.nodes >= self.node_limit)
        {
            self.stopped = true;
        }
        self.stopped
    }

    /// A key already on the path once before counts as a repetition draw;
    /// make_move resets nothing here because the counts live on the board.
    fn is_repetition(&self) -> bool {
        self.board.repetition_counts.get(self.board.hash) > 1
    }

    /// Negamax with alpha-beta, PVS, and the pruning set from the options.
    #[allow(clippy::too_many_lines)]
    pub(super) fn alphabeta(
        &mut self,
        depth: u32,
        mut alpha: i32,
        beta: i32,
        ply: usize,
        allow_null: bool,
    ) -> i32 {
        let is_root = ply == 0;

        if !is_root && (self.is_repetition() || self.board.halfmove_clock() >= 100) {
            return 0;
        }

        if depth == 0 {
            return self.qsearch(alpha, beta, ply);
        }

        self.nodes += 1;
        self.seldepth = self.seldepth.max(ply as u32 + 1);
        if self.should_stop() {
            return 0;
        }

        let in_check = self.board.is_in_check(self.board.current_color());

        // TT probe. Cutoffs are skipped at the root so every search
        // produces a move, and on repeated keys where the stored score
        // predates the repetition context.
        let probe = self
            .state
            .tt
            .probe(self.board.hash(), depth, alpha, beta, ply);
        if !is_root {
            if let Some(score) = probe.cutoff {
                return score;
            }
        }
        let tt_move = probe.ordering_move.unwrap_or(EMPTY_MOVE);

        // Null-move pruning: hand the opponent a free move; if the reduced
        // search still fails high the real position almost surely would.
        // Skipped in check, near mate scores, and without non-pawn
        // material (zugzwang).
        if self.options.enable_nmp
            && allow_null
            && !is_root
            && !in_check
            && depth >= 3
            && beta < MATE_THRESHOLD
            && !self
                .board
                .non_pawn_material(self.board.current_color())
                .is_empty()
        {
            let info = self.board.make_null_move();
            let reduced = depth - 1 - NULL_MOVE_REDUCTION.min(depth - 1);
            let score = -self.alphabeta(reduced, -beta, -beta + 1, ply + 1, false);
            self.board.unmake_null_move(info);
            if self.stopped {
                return 0;
            }
            if score >= beta {
                return beta;
            }
        }

        let moves = if in_check {
            self.board.generate_evasions()
        } else {
            self.board.generate_moves()
        };
        if moves.is_empty() {
            return if in_check { -(MATE_SCORE - ply as i32) } else { 0 };
        }

        // Static eval once per node for futility decisions.
        let frontier_futility =
            self.options.enable_futility && depth == 1 && !in_check && ply + 1 < MAX_PLY;
        let stand_pat = if frontier_futility {
            self.board.evaluate()
        } else {
            0
        };

        let ordered = self.order_moves(&moves, tt_move, ply);

        let alpha_orig = alpha;
        let mut best_score = -INFINITY;
        let mut best_move = EMPTY_MOVE;
        let mut searched = 0usize;

        for (idx, scored) in ordered.iter().enumerate() {
            let mv = scored.mv;
            let is_quiet = !mv.is_capture() && !mv.is_promotion();

            let info = self.board.make_move(mv);
            let gives_check = self.board.is_in_check(self.board.current_color());

            // Frontier futility: a quiet move that cannot lift the static
            // eval above alpha is skipped. Never prunes the first move or
            // checking moves, so terminal detection stays exact.
            if frontier_futility
                && is_quiet
                && !gives_check
                && searched > 0
                && stand_pat + FUTILITY_MARGIN <= alpha
            {
                self.board.unmake_move(mv, info);
                continue;
            }

            let reduction = if self.options.enable_lmr
                && depth >= 3
                && !in_check
                && !gives_check
                && is_quiet
                && idx >= LMR_MOVE_THRESHOLD
            {
                1
            } else {
                0
            };

            let score = if searched == 0 || !self.options.enable_pvs {
                let mut score =
                    -self.alphabeta(depth - 1 - reduction, -beta, -alpha, ply + 1, true);
                if reduction > 0 && score > alpha && !self.stopped {
                    score = -self.alphabeta(depth - 1, -beta, -alpha, ply + 1, true);
                }
                score
            } else {
                // Null-window probe, re-searching on improvement: first at
                // full depth if reduced, then with the full window.
                let mut score =
                    -self.alphabeta(depth - 1 - reduction, -alpha - 1, -alpha, ply + 1, true);
                if reduction > 0 && score > alpha && !self.stopped {
                    score = -self.alphabeta(depth - 1, -alpha - 1, -alpha, ply + 1, true);
                }
                if score > alpha && score < beta && !self.stopped {
                    score = -self.alphabeta(depth - 1, -beta, -alpha, ply + 1, true);
                }
                score
            };

            self.board.unmake_move(mv, info);

            if self.stopped {
                // The subtree may have been truncated; discard its score.
                break;
            }
            searched += 1;

            if score > best_score {
                best_score = score;
                best_move = mv;
                if is_root {
                    self.root_best = Some((mv, score));
                }
            }
            if score > alpha {
                alpha = score;
                if alpha >= beta {
                    if is_quiet {
                        self.state.killers.update(ply, mv);
                        self.state.history.update(mv, depth);
                    }
                    self.state.tt.store(
                        self.board.hash(),
                        depth,
                        beta,
                        BoundType::Lower,
                        Some(mv),
                        ply,
                        self.state.generation,
                    );
                    return beta;
                }
            }
        }

        if searched == 0 {
            // Stopped before the first move finished; the caller discards
            // this value.
            return 0;
        }

        let bound = if alpha > alpha_orig {
            BoundType::Exact
        } else {
            BoundType::Upper
        };
        if !self.stopped {
            self.state.tt.store(
                self.board.hash(),
                depth,
                best_score,
                bound,
                Some(best_move),
                ply,
                self.state.generation,
            );
        }
        best_score
    }
}

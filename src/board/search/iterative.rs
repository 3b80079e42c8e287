//! Iterative deepening with aspiration windows.

use super::alphabeta::SearchContext;
use super::{
    IterationStats, Move, Score, SearchError, SearchReport, TtStats, ASPIRATION_MIN_DEPTH,
    INFINITY, MATE_SCORE, MATE_THRESHOLD, MAX_PLY,
};

impl SearchContext<'_> {
    /// Walk the transposition table along best moves to recover the
    /// principal variation. Cycle-guarded and legality-checked, so a
    /// recycled entry can truncate the line but never corrupt it.
    fn extract_pv(&mut self, max_len: usize) -> Vec<Move> {
        let mut pv = Vec::with_capacity(max_len);
        let mut seen_hashes = Vec::with_capacity(max_len);
        let mut applied = Vec::with_capacity(max_len);

        for _ in 0..max_len {
            let hash = self.board.hash();
            if seen_hashes.contains(&hash) {
                break;
            }
            seen_hashes.push(hash);

            let Some(mv) = self.state.tt.peek_move(hash) else {
                break;
            };
            if !self.board.is_legal_move(mv) {
                break;
            }
            pv.push(mv);
            let info = self.board.make_move(mv);
            applied.push((mv, info));
        }

        for (mv, info) in applied.into_iter().rev() {
            self.board.unmake_move(mv, info);
        }
        pv
    }

    /// One aspiration-windowed iteration. Returns the score plus the
    /// fail-high/fail-low counts it took to land inside the window.
    fn search_iteration(&mut self, depth: u32, previous_score: i32) -> (i32, u32, u32, u32) {
        let mut fail_high = 0u32;
        let mut fail_low = 0u32;
        let mut re_searches = 0u32;

        let aspirate = depth >= ASPIRATION_MIN_DEPTH
            && previous_score.abs() < MATE_THRESHOLD
            && self.options.aspiration_half_width_cp > 0;
        if !aspirate {
            let score = self.alphabeta(depth, -INFINITY, INFINITY, 0, true);
            return (score, fail_high, fail_low, re_searches);
        }

        let mut half_width = self.options.aspiration_half_width_cp;
        let mut alpha = previous_score - half_width;
        let mut beta = previous_score + half_width;
        let mut widenings = 0u32;

        loop {
            let score = self.alphabeta(depth, alpha, beta, 0, true);
            if self.stopped {
                return (score, fail_high, fail_low, re_searches);
            }
            if score <= alpha {
                fail_low += 1;
            } else if score >= beta {
                fail_high += 1;
            } else {
                return (score, fail_high, fail_low, re_searches);
            }

            re_searches += 1;
            widenings += 1;
            #[cfg(feature = "logging")]
            log::trace!(
                "aspiration retry at depth {depth}: score {score} outside [{alpha}, {beta}]"
            );
            if widenings >= 2 {
                // Two widenings failed; open the window completely.
                alpha = -INFINITY;
                beta = INFINITY;
            } else {
                half_width *= 2;
                if score <= alpha {
                    alpha = previous_score - half_width;
                } else {
                    beta = previous_score + half_width;
                }
            }
        }
    }

    pub(super) fn run_iterative_deepening(
        mut self,
        max_depth: u32,
    ) -> Result<SearchReport, SearchError> {
        // A terminal root has no move to search; report the mate or
        // stalemate score directly.
        if self.board.generate_moves().is_empty() {
            let in_check = self.board.is_in_check(self.board.current_color());
            let score = if in_check { -MATE_SCORE } else { 0 };
            return Ok(SearchReport {
                best_move: None,
                score: Score::from_internal(score),
                pv: Vec::new(),
                depth: 0,
                seldepth: 0,
                nodes: 0,
                qnodes: 0,
                time_ms: self.elapsed_ms(),
                re_searches: 0,
                iterations: Vec::new(),
                tt: TtStats::from_table(&self.state.tt),
            });
        }

        let mut iterations: Vec<IterationStats> = Vec::new();
        let mut best_move: Option<Move> = None;
        let mut best_pv: Vec<Move> = Vec::new();
        let mut final_score = 0i32;
        let mut completed_depth = 0u32;
        let mut total_re_searches = 0u32;
        let mut max_seldepth = 0u32;
        let mut previous_score = 0i32;

        for depth in 1..=max_depth {
            self.root_best = None;
            self.seldepth = 0;
            let iter_start_ms = self.elapsed_ms();
            let iter_start_nodes = self.nodes;
            let iter_start_qnodes = self.qnodes;

            let (score, fail_high, fail_low, re_searches) =
                self.search_iteration(depth, previous_score);
            total_re_searches += re_searches;
            max_seldepth = max_seldepth.max(self.seldepth);

            if self.stopped {
                // A partially searched root still yields a best move once
                // at least one root move completed at this depth.
                if let Some((mv, partial_score)) = self.root_best {
                    best_move = Some(mv);
                    if iterations.is_empty() {
                        final_score = partial_score;
                        best_pv = vec![mv];
                    }
                }
                break;
            }

            let pv = self.extract_pv(depth as usize + 8);
            let iteration = IterationStats {
                depth,
                score: Score::from_internal(score),
                time_ms: self.elapsed_ms() - iter_start_ms,
                nodes: self.nodes - iter_start_nodes,
                qnodes: self.qnodes - iter_start_qnodes,
                seldepth: self.seldepth,
                pv: pv.clone(),
                fail_high,
                fail_low,
            };
            #[cfg(feature = "logging")]
            log::debug!(
                "depth {} score {} nodes {} pv {}",
                iteration.depth,
                iteration.score,
                iteration.nodes,
                iteration
                    .pv
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            );
            iterations.push(iteration);

            best_move = pv
                .first()
                .copied()
                .or(self.root_best.map(|(mv, _)| mv))
                .or(best_move);
            if !pv.is_empty() {
                best_pv = pv;
            } else if let Some(mv) = best_move {
                best_pv = vec![mv];
            }
            final_score = score;
            previous_score = score;
            completed_depth = depth;

            if self.check_boundary_stop() {
                break;
            }
        }

        let Some(best_move) = best_move else {
            return Err(SearchError);
        };
        if best_pv.is_empty() {
            best_pv = vec![best_move];
        }

        Ok(SearchReport {
            best_move: Some(best_move),
            score: Score::from_internal(final_score),
            pv: best_pv,
            depth: completed_depth,
            seldepth: max_seldepth.min(MAX_PLY as u32),
            nodes: self.nodes,
            qnodes: self.qnodes,
            time_ms: self.elapsed_ms(),
            re_searches: total_re_searches,
            iterations,
            tt: TtStats::from_table(&self.state.tt),
        })
    }
}

//! Iterative-deepening alpha-beta search.
//!
//! Features:
//! - Aspiration windows from depth 5
//! - Principal-variation search with null-window probes
//! - Null-move pruning and late-move reductions
//! - Futility pruning at the frontier
//! - Quiescence with SEE and delta pruning
//! - Move ordering: TT move, SEE-ranked captures, killers, history
//! - Transposition table cutoffs with per-search counters
//!
//! The search is strictly single-threaded and deterministic: identical
//! position, limits, and options produce an identical report apart from
//! wall-clock fields.

mod alphabeta;
mod iterative;
mod ordering;
mod quiescence;

use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::tt::{TranspositionTable, TtCounters};

use super::{Board, Move, EMPTY_MOVE, MAX_PLY};

pub(crate) use crate::tt::{MATE_SCORE, MATE_THRESHOLD};

/// Window sentinel strictly outside every reachable score.
pub(crate) const INFINITY: i32 = 31000;

/// Aspiration windows start at this depth.
const ASPIRATION_MIN_DEPTH: u32 = 5;

/// Stop-flag and clock checks happen every `NODE_CHECK_INTERVAL` nodes.
const NODE_CHECK_INTERVAL: u64 = 4096;

/// Search limits; any subset may be set. With no depth limit the search
/// iterates until another limit fires (bounded by the ply ceiling).
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchLimits {
    /// Maximum iterative-deepening depth.
    pub depth: Option<u32>,
    /// Wall-clock budget in milliseconds.
    pub movetime_ms: Option<u64>,
    /// Node budget (main and quiescence nodes combined).
    pub nodes: Option<u64>,
}

impl SearchLimits {
    /// Limit by depth only.
    #[must_use]
    pub fn depth(depth: u32) -> Self {
        SearchLimits {
            depth: Some(depth),
            ..SearchLimits::default()
        }
    }

    /// Limit by move time only.
    #[must_use]
    pub fn movetime(ms: u64) -> Self {
        SearchLimits {
            movetime_ms: Some(ms),
            ..SearchLimits::default()
        }
    }

    pub(crate) fn max_depth(&self) -> u32 {
        self.depth
            .unwrap_or(MAX_PLY as u32 - 1)
            .clamp(1, MAX_PLY as u32 - 1)
    }
}

/// Search configuration. All toggles default to enabled.
#[derive(Clone, Copy, Debug)]
pub struct SearchOptions {
    /// Transposition-table capacity in entries.
    pub tt_capacity_entries: usize,
    /// Null-move pruning.
    pub enable_nmp: bool,
    /// Late-move reductions.
    pub enable_lmr: bool,
    /// Frontier futility pruning.
    pub enable_futility: bool,
    /// Principal-variation (null-window) search.
    pub enable_pvs: bool,
    /// Initial aspiration half-width in centipawns.
    pub aspiration_half_width_cp: i32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            tt_capacity_entries: 1 << 20,
            enable_nmp: true,
            enable_lmr: true,
            enable_futility: true,
            enable_pvs: true,
            aspiration_half_width_cp: 25,
        }
    }
}

/// A search score: centipawns, or moves until mate (negative when the
/// side to move is being mated).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Score {
    Cp(i32),
    MateIn(i32),
}

impl Score {
    pub(crate) fn from_internal(score: i32) -> Self {
        if score >= MATE_THRESHOLD {
            Score::MateIn((MATE_SCORE - score + 1) / 2)
        } else if score <= -MATE_THRESHOLD {
            Score::MateIn(-((MATE_SCORE + score + 1) / 2))
        } else {
            Score::Cp(score)
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Cp(cp) => write!(f, "cp {cp}"),
            Score::MateIn(moves) => write!(f, "mate {moves}"),
        }
    }
}

/// Per-iteration telemetry.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct IterationStats {
    pub depth: u32,
    pub score: Score,
    pub time_ms: u64,
    /// Nodes spent in this iteration (quiescence included).
    pub nodes: u64,
    pub qnodes: u64,
    pub seldepth: u32,
    pub pv: Vec<Move>,
    /// Aspiration fail-highs / fail-lows during this iteration.
    pub fail_high: u32,
    pub fail_low: u32,
}

/// Transposition-table telemetry for one search.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TtStats {
    pub probes: u64,
    pub hits: u64,
    pub exact_hits: u64,
    pub lower_hits: u64,
    pub upper_hits: u64,
    pub stores: u64,
    pub replacements: u64,
    /// Occupied entries at the end of the search.
    pub size: usize,
    /// Occupancy in per mille.
    pub hashfull: u32,
}

impl TtStats {
    fn from_table(tt: &TranspositionTable) -> Self {
        let TtCounters {
            probes,
            hits,
            exact_hits,
            lower_hits,
            upper_hits,
            stores,
            replacements,
        } = tt.counters();
        TtStats {
            probes,
            hits,
            exact_hits,
            lower_hits,
            upper_hits,
            stores,
            replacements,
            size: tt.len(),
            hashfull: tt.hashfull_per_mille(),
        }
    }
}

/// The result of a completed (or cooperatively stopped) search.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SearchReport {
    /// `None` only when the root position is already checkmate or
    /// stalemate.
    pub best_move: Option<Move>,
    pub score: Score,
    pub pv: Vec<Move>,
    /// Deepest fully completed iteration.
    pub depth: u32,
    pub seldepth: u32,
    pub nodes: u64,
    pub qnodes: u64,
    pub time_ms: u64,
    /// Aspiration re-searches across all iterations.
    pub re_searches: u32,
    pub iterations: Vec<IterationStats>,
    pub tt: TtStats,
}

/// The search was stopped before any root move finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchError;

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "search aborted before any root move completed")
    }
}

impl std::error::Error for SearchError {}

/// Monotonic clock for one search. The deadline sits behind a mutex so a
/// host thread can install or clear it while the search runs.
pub struct SearchClock {
    start: Instant,
    hard_deadline: Mutex<Option<Instant>>,
}

impl SearchClock {
    #[must_use]
    pub fn new(movetime_ms: Option<u64>) -> Self {
        let start = Instant::now();
        let hard_deadline =
            movetime_ms.map(|ms| start + std::time::Duration::from_millis(ms));
        SearchClock {
            start,
            hard_deadline: Mutex::new(hard_deadline),
        }
    }

    pub fn set_hard_deadline(&self, deadline: Option<Instant>) {
        *self.hard_deadline.lock() = deadline;
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    #[must_use]
    pub fn expired(&self) -> bool {
        self.hard_deadline
            .lock()
            .is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Two killer slots per ply.
pub(crate) struct KillerTable {
    slots: [[Move; 2]; MAX_PLY],
}

impl KillerTable {
    fn new() -> Self {
        KillerTable {
            slots: [[EMPTY_MOVE; 2]; MAX_PLY],
        }
    }

    pub(crate) fn primary(&self, ply: usize) -> Move {
        self.slots.get(ply).map_or(EMPTY_MOVE, |row| row[0])
    }

    pub(crate) fn secondary(&self, ply: usize) -> Move {
        self.slots.get(ply).map_or(EMPTY_MOVE, |row| row[1])
    }

    pub(crate) fn update(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }
        if self.slots[ply][0] != mv {
            self.slots[ply][1] = self.slots[ply][0];
            self.slots[ply][0] = mv;
        }
    }

    fn reset(&mut self) {
        for row in &mut self.slots {
            *row = [EMPTY_MOVE; 2];
        }
    }
}

/// From-to indexed history of quiet moves that caused cutoffs.
pub(crate) struct HistoryTable {
    entries: [i32; 4096],
}

impl HistoryTable {
    fn new() -> Self {
        HistoryTable { entries: [0; 4096] }
    }

    #[inline]
    fn index(mv: Move) -> usize {
        mv.from().index() * 64 + mv.to().index()
    }

    pub(crate) fn score(&self, mv: Move) -> i32 {
        self.entries[Self::index(mv)]
    }

    pub(crate) fn update(&mut self, mv: Move, depth: u32) {
        let entry = &mut self.entries[Self::index(mv)];
        *entry = entry.saturating_add((depth * depth) as i32);
    }

    /// Halve everything between searches so old preferences fade.
    fn decay(&mut self) {
        for entry in &mut self.entries {
            *entry >>= 1;
        }
    }
}

/// Reusable per-search work area: the transposition table, killer slots,
/// and history scores. Owned by exactly one search at a time.
pub struct SearchState {
    pub(crate) tt: TranspositionTable,
    pub(crate) killers: KillerTable,
    pub(crate) history: HistoryTable,
    pub(crate) generation: u16,
}

impl SearchState {
    #[must_use]
    pub fn new(tt_capacity_entries: usize) -> Self {
        SearchState {
            tt: TranspositionTable::new(tt_capacity_entries),
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            generation: 0,
        }
    }

    /// Prepare for a new search: bump the TT generation, reset counters,
    /// clear killers, and fade history.
    pub(crate) fn new_search(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.tt.reset_counters();
        self.killers.reset();
        self.history.decay();
    }
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::new(SearchOptions::default().tt_capacity_entries)
    }
}

/// Run a search on `board` within `limits`.
///
/// Returns `Err(SearchError)` only when the stop flag (or a zero budget)
/// prevented even one root move from being evaluated; otherwise the report
/// carries the best move from the deepest completed iteration.
pub fn find_best_move(
    board: &mut Board,
    state: &mut SearchState,
    limits: &SearchLimits,
    options: &SearchOptions,
    stop: &AtomicBool,
) -> Result<SearchReport, SearchError> {
    let clock = Arc::new(SearchClock::new(limits.movetime_ms));
    find_best_move_with_clock(board, state, limits, options, stop, &clock)
}

/// As [`find_best_move`], with a caller-owned clock so a host can adjust
/// the deadline mid-search.
pub fn find_best_move_with_clock(
    board: &mut Board,
    state: &mut SearchState,
    limits: &SearchLimits,
    options: &SearchOptions,
    stop: &AtomicBool,
    clock: &Arc<SearchClock>,
) -> Result<SearchReport, SearchError> {
    #[cfg(debug_assertions)]
    board.assert_consistent();

    state.new_search();
    let ctx = alphabeta::SearchContext::new(board, state, options, stop, clock, limits);
    ctx.run_iterative_deepening(limits.max_depth())
}

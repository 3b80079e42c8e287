//! Transposition table.
//!
//! Fixed-capacity, four-way-bucketed table keyed by the full Zobrist hash.
//! Each search owns its table exclusively, so probes can count statistics
//! without synchronization. Mate scores are stored relative to the probing
//! node rather than the root, otherwise an entry written at one depth
//! reports a wrong mate distance at another.

use crate::board::Move;

/// Score for delivering mate at the root (ply 0); a mate at ply `p`
/// scores `MATE_SCORE - p`.
pub(crate) const MATE_SCORE: i32 = 30000;

/// Scores at or beyond this magnitude are mate scores.
pub(crate) const MATE_THRESHOLD: i32 = 29000;

/// How a stored score bounds the true value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    /// Score is exact (alpha was raised without a beta cutoff)
    Exact,
    /// Score is at least this value (fail-high)
    Lower,
    /// Score is at most this value (fail-low)
    Upper,
}

#[derive(Clone, Copy, Debug)]
struct TtEntry {
    key: u64,
    depth: u32,
    score: i32,
    bound: BoundType,
    best_move: Option<Move>,
    generation: u16,
}

/// Result of probing one position.
#[derive(Clone, Copy, Debug, Default)]
pub struct TtProbe {
    /// Score usable as an immediate cutoff at the probing depth.
    pub cutoff: Option<i32>,
    /// Stored best move, returned for ordering regardless of depth.
    pub ordering_move: Option<Move>,
}

/// Counters exposed through the search report.
#[derive(Clone, Copy, Debug, Default)]
pub struct TtCounters {
    pub probes: u64,
    pub hits: u64,
    pub exact_hits: u64,
    pub lower_hits: u64,
    pub upper_hits: u64,
    pub stores: u64,
    pub replacements: u64,
}

const BUCKET_SIZE: usize = 4;

/// Convert a root-relative score to a node-relative one for storage.
fn score_to_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

/// Reverse of [`score_to_tt`], applied with the probing node's ply.
fn score_from_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

/// Bounded open-addressed transposition table.
pub struct TranspositionTable {
    buckets: Vec<[Option<TtEntry>; BUCKET_SIZE]>,
    mask: usize,
    capacity: usize,
    occupied: usize,
    counters: TtCounters,
}

impl TranspositionTable {
    /// Create a table holding roughly `capacity_entries` entries (rounded
    /// so the bucket count is a power of two).
    #[must_use]
    pub fn new(capacity_entries: usize) -> Self {
        let buckets = (capacity_entries / BUCKET_SIZE)
            .next_power_of_two()
            .max(1);
        TranspositionTable {
            buckets: vec![[None; BUCKET_SIZE]; buckets],
            mask: buckets - 1,
            capacity: buckets * BUCKET_SIZE,
            occupied: 0,
            counters: TtCounters::default(),
        }
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    /// Probe for `key`. A stored entry deep enough for the probing depth
    /// produces a cutoff score per its bound kind; any entry contributes
    /// its move for ordering.
    pub fn probe(&mut self, key: u64, depth: u32, alpha: i32, beta: i32, ply: usize) -> TtProbe {
        self.counters.probes += 1;
        let index = self.index(key);
        let Some(entry) = self.buckets[index]
            .iter()
            .flatten()
            .find(|entry| entry.key == key)
            .copied()
        else {
            return TtProbe::default();
        };

        let mut probe = TtProbe {
            cutoff: None,
            ordering_move: entry.best_move,
        };
        if entry.depth < depth {
            return probe;
        }

        let score = score_from_tt(entry.score, ply);
        let usable = match entry.bound {
            BoundType::Exact => true,
            BoundType::Lower => score >= beta,
            BoundType::Upper => score <= alpha,
        };
        if usable {
            self.counters.hits += 1;
            match entry.bound {
                BoundType::Exact => self.counters.exact_hits += 1,
                BoundType::Lower => self.counters.lower_hits += 1,
                BoundType::Upper => self.counters.upper_hits += 1,
            }
            probe.cutoff = Some(score);
        }
        probe
    }

    /// Store an entry. Replacement prefers the slot already holding `key`,
    /// then an empty slot, then the bucket's least valuable entry by
    /// depth-minus-age priority.
    pub fn store(
        &mut self,
        key: u64,
        depth: u32,
        score: i32,
        bound: BoundType,
        best_move: Option<Move>,
        ply: usize,
        generation: u16,
    ) {
        let entry = TtEntry {
            key,
            depth,
            score: score_to_tt(score, ply),
            bound,
            best_move,
            generation,
        };
        let index = self.index(key);
        let bucket = &mut self.buckets[index];

        for slot in bucket.iter_mut() {
            let same_key = slot.as_ref().is_some_and(|existing| existing.key == key);
            if same_key {
                // Keep the old move as a hint if the new search had none.
                let best_move = entry
                    .best_move
                    .or_else(|| slot.as_ref().and_then(|existing| existing.best_move));
                *slot = Some(TtEntry { best_move, ..entry });
                self.counters.stores += 1;
                return;
            }
        }

        for slot in bucket.iter_mut() {
            if slot.is_none() {
                *slot = Some(entry);
                self.occupied += 1;
                self.counters.stores += 1;
                return;
            }
        }

        let mut victim_idx = 0;
        let mut worst_priority = i32::MAX;
        for (idx, slot) in bucket.iter().enumerate() {
            if let Some(existing) = slot {
                let age = generation.wrapping_sub(existing.generation) as i32;
                let priority = existing.depth as i32 * 2 - age;
                if priority < worst_priority {
                    worst_priority = priority;
                    victim_idx = idx;
                }
            }
        }
        bucket[victim_idx] = Some(entry);
        self.counters.stores += 1;
        self.counters.replacements += 1;
    }

    /// Stored best move for `key` without touching the probe counters;
    /// used by principal-variation extraction.
    #[must_use]
    pub fn peek_move(&self, key: u64) -> Option<Move> {
        let index = self.index(key);
        self.buckets[index]
            .iter()
            .flatten()
            .find(|entry| entry.key == key)
            .and_then(|entry| entry.best_move)
    }

    /// Number of occupied entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.occupied
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Total entry capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Occupancy in per mille, the conventional `hashfull` telemetry.
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        ((self.occupied * 1000) / self.capacity) as u32
    }

    #[must_use]
    pub fn counters(&self) -> TtCounters {
        self.counters
    }

    pub(crate) fn reset_counters(&mut self) {
        self.counters = TtCounters::default();
    }
}

//! Transposition table for caching search results
//!
//! Maps a Zobrist position hash (side-to-move already folded in) to the
//! score of a previous search of that position. A cached score is only
//! reusable when the stored search was at least as deep as the one being
//! asked for, and when its bound type fits the current window.
//!
//! The table is process-lifetime state with an explicit size lifecycle:
//! once the entry count passes the configured capacity it is cleared
//! wholesale, which caps memory over a long game at the cost of some
//! recomputation right after the flush.

use std::collections::HashMap;

use crate::board::Column;

/// How a stored score relates to the true value of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Search completed inside the window
    Exact,
    /// Beta cutoff: true score >= stored value
    Lower,
    /// Fail-low: true score <= stored value
    Upper,
}

/// Transposition table entry
#[derive(Debug, Clone, Copy)]
pub struct TtEntry {
    pub depth: i8,
    pub score: i32,
    pub bound: Bound,
    pub best: Option<Column>,
}

/// Transposition table with a hard entry bound.
pub struct TranspositionTable {
    entries: HashMap<u64, TtEntry>,
    capacity: usize,
    /// Number of wholesale flushes, for diagnostics
    flushes: u64,
}

impl TranspositionTable {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.min(1 << 16)),
            capacity: capacity.max(1),
            flushes: 0,
        }
    }

    /// Probe for a usable score. Returns `None` when there is no entry,
    /// the entry is too shallow, or its bound does not apply to the
    /// current window. Use [`TranspositionTable::best_move`] for ordering
    /// hints regardless of depth.
    #[must_use]
    pub fn probe(&self, hash: u64, depth: i8, alpha: i32, beta: i32) -> Option<i32> {
        let entry = self.entries.get(&hash)?;
        if entry.depth < depth {
            return None;
        }
        match entry.bound {
            Bound::Exact => Some(entry.score),
            Bound::Lower if entry.score >= beta => Some(entry.score),
            Bound::Upper if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    /// Best move recorded for a position, usable for move ordering even
    /// when the stored score is not.
    #[must_use]
    pub fn best_move(&self, hash: u64) -> Option<Column> {
        self.entries.get(&hash).and_then(|e| e.best)
    }

    /// Store a search result. Same-position entries are replaced when the
    /// new search is at least as deep; the whole table is flushed first
    /// if it has grown past its capacity.
    pub fn store(&mut self, hash: u64, depth: i8, score: i32, bound: Bound, best: Option<Column>) {
        if self.entries.len() >= self.capacity {
            self.entries.clear();
            self.flushes += 1;
            tracing::debug!(capacity = self.capacity, flushes = self.flushes, "transposition table flushed");
        }
        match self.entries.get(&hash) {
            Some(existing) if existing.depth > depth => {}
            _ => {
                self.entries.insert(
                    hash,
                    TtEntry {
                        depth,
                        score,
                        bound,
                        best,
                    },
                );
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn flushes(&self) -> u64 {
        self.flushes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_probe_exact() {
        let mut tt = TranspositionTable::new(1024);
        let hash = 0x1234_5678_9ABC_DEF0;
        tt.store(hash, 5, 100, Bound::Exact, Some(Column::new(1, 1)));

        assert_eq!(tt.probe(hash, 5, -1000, 1000), Some(100));
        assert_eq!(tt.probe(hash, 3, -1000, 1000), Some(100));
        assert_eq!(tt.best_move(hash), Some(Column::new(1, 1)));
    }

    #[test]
    fn test_shallow_entry_not_reused_deeper() {
        let mut tt = TranspositionTable::new(1024);
        let hash = 0xAAAA;
        tt.store(hash, 3, 100, Bound::Exact, Some(Column::new(2, 2)));

        // Deeper request: score unusable, move still available
        assert_eq!(tt.probe(hash, 5, -1000, 1000), None);
        assert_eq!(tt.best_move(hash), Some(Column::new(2, 2)));
    }

    #[test]
    fn test_bound_window_checks() {
        let mut tt = TranspositionTable::new(1024);

        tt.store(0x1, 4, 200, Bound::Lower, None);
        assert_eq!(tt.probe(0x1, 4, -1000, 150), Some(200)); // 200 >= beta
        assert_eq!(tt.probe(0x1, 4, -1000, 300), None);

        tt.store(0x2, 4, 50, Bound::Upper, None);
        assert_eq!(tt.probe(0x2, 4, 100, 1000), Some(50)); // 50 <= alpha
        assert_eq!(tt.probe(0x2, 4, 30, 1000), None);
    }

    #[test]
    fn test_deeper_entry_wins_replacement() {
        let mut tt = TranspositionTable::new(1024);
        let hash = 0xBBBB;
        tt.store(hash, 6, 300, Bound::Exact, Some(Column::new(0, 0)));
        tt.store(hash, 2, 999, Bound::Exact, Some(Column::new(3, 3)));

        // Shallower store must not clobber the deeper entry
        assert_eq!(tt.probe(hash, 6, -1000, 1000), Some(300));
    }

    #[test]
    fn test_flush_on_capacity_overflow() {
        let mut tt = TranspositionTable::new(8);
        for hash in 0..8u64 {
            tt.store(hash, 1, hash as i32, Bound::Exact, None);
        }
        assert_eq!(tt.len(), 8);

        // Next store crosses the bound: wholesale clear, then insert
        tt.store(100, 1, 1, Bound::Exact, None);
        assert_eq!(tt.len(), 1);
        assert_eq!(tt.flushes(), 1);
        assert_eq!(tt.probe(0, 1, -10, 10), None);
        assert_eq!(tt.probe(100, 1, -10, 10), Some(1));
    }

    #[test]
    fn test_clear() {
        let mut tt = TranspositionTable::new(64);
        tt.store(7, 2, 42, Bound::Exact, None);
        tt.clear();
        assert!(tt.is_empty());
        assert_eq!(tt.probe(7, 2, -100, 100), None);
    }
}

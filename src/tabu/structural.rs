//! Structural tabu (TabuStructure-B, spec §4.4).
//!
//! Grounded in `original_source/BinPackSolver/utils/tabu_structure.py`'s
//! `TabuStructure`, with one deliberate correction: the original computes
//! the suffix window as `solution[index+1 .. max(len(solution),
//! index+R+1)]`, which is a `max`/`min` typo (that slice expression is
//! only ever the whole tail or empty, never a bounded window of length
//! `R`). Spec §4.4 pins the intended contract explicitly — `min(|seq|,
//! i+R+1)` — so this port implements the corrected window rather than
//! reproducing the upstream bug.

use rand::Rng;
use std::collections::{HashMap, VecDeque};

/// A structural tabu memory keyed by (element, bounded suffix window).
///
/// Parameters: `n` bounds the total number of distinct element keys held
/// at once (FIFO-evicted), `m` bounds the number of suffix windows
/// recorded per key (random-evicted on overflow, per the original), and
/// `r` bounds the suffix window length.
#[derive(Debug, Clone)]
pub struct StructuralTabu {
    n: usize,
    m: usize,
    r: usize,
    fifo: VecDeque<u64>,
    table: HashMap<u64, Vec<Vec<u64>>>,
}

impl StructuralTabu {
    /// Creates an empty structural tabu with `m` clamped to at most `n`
    /// (spec: "per-key cap M (M ≤ N)").
    pub fn new(n: usize, m: usize, r: usize) -> Self {
        Self {
            n,
            m: m.min(n.max(1)),
            r,
            fifo: VecDeque::new(),
            table: HashMap::new(),
        }
    }

    /// `segment(i, seq)`: the element at `i` plus its bounded suffix window.
    fn segment(&self, index: usize, seq: &[u64]) -> (u64, Vec<u64>) {
        let element = seq[index];
        let end = (index + 1 + self.r).min(seq.len());
        let start = (index + 1).min(end);
        (element, seq[start..end].to_vec())
    }

    /// Whether `(element, suffix)` for position `i` in `seq` is tabu.
    pub fn find(&self, index: usize, seq: &[u64]) -> bool {
        let (element, suffix) = self.segment(index, seq);
        self.table.get(&element).is_some_and(|windows| windows.contains(&suffix))
    }

    /// Inserts the `(element, suffix)` pair for position `i` in `seq`.
    ///
    /// Mirrors the original's eviction policy exactly: if the pair is
    /// already recorded, evict a random window from that key's list once
    /// it exceeds `m` and return; otherwise append, push the key onto the
    /// global FIFO, and pop the oldest key entirely once total keys
    /// exceed `n`.
    pub fn insert<R: Rng>(&mut self, index: usize, seq: &[u64], rng: &mut R) {
        let (element, suffix) = self.segment(index, seq);

        if let Some(windows) = self.table.get_mut(&element) {
            if windows.contains(&suffix) {
                if windows.len() > self.m {
                    let victim = rng.random_range(0..windows.len());
                    windows.remove(victim);
                }
                return;
            }
        }

        self.table.entry(element).or_default().push(suffix);
        self.fifo.push_back(element);
        if self.table.len() > self.n {
            if let Some(oldest) = self.fifo.pop_front() {
                self.table.remove(&oldest);
            }
        }
    }

    /// Total number of distinct element keys currently held.
    pub fn key_count(&self) -> usize {
        self.table.len()
    }

    /// Number of suffix windows recorded under `element`, if any.
    pub fn windows_for(&self, element: u64) -> usize {
        self.table.get(&element).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn segment_window_is_bounded_by_min_not_whole_tail() {
        let tabu = StructuralTabu::new(10, 10, 2);
        let seq = [1, 2, 3, 4, 5];
        let (element, suffix) = tabu.segment(0, &seq);
        assert_eq!(element, 1);
        assert_eq!(suffix, vec![2, 3]); // bounded to R=2, not the whole tail [2,3,4,5]
    }

    #[test]
    fn segment_window_shrinks_near_end_of_sequence() {
        let tabu = StructuralTabu::new(10, 10, 3);
        let seq = [1, 2, 3];
        let (element, suffix) = tabu.segment(1, &seq);
        assert_eq!(element, 2);
        assert_eq!(suffix, vec![3]);
    }

    #[test]
    fn insert_then_find() {
        let mut rng = create_rng(1);
        let mut tabu = StructuralTabu::new(10, 10, 2);
        let seq = [1, 2, 3, 4];
        assert!(!tabu.find(0, &seq));
        tabu.insert(0, &seq, &mut rng);
        assert!(tabu.find(0, &seq));
    }

    #[test]
    fn key_fifo_evicts_oldest_key_once_n_exceeded() {
        let mut rng = create_rng(2);
        let mut tabu = StructuralTabu::new(2, 10, 1);
        tabu.insert(0, &[10, 20, 30], &mut rng); // key 10
        tabu.insert(1, &[10, 20, 30], &mut rng); // key 20
        assert_eq!(tabu.key_count(), 2);
        tabu.insert(2, &[10, 20, 30], &mut rng); // key 30, should evict key 10
        assert_eq!(tabu.key_count(), 2);
        assert!(!tabu.find(0, &[10, 20, 30]), "key 10 should have been evicted");
    }

    #[test]
    fn per_key_window_count_never_exceeds_m_by_more_than_one_transient_entry() {
        let mut rng = create_rng(3);
        let mut tabu = StructuralTabu::new(10, 1, 1);
        // Same element key, distinct suffixes, to build up the per-key list.
        tabu.insert(0, &[5, 1], &mut rng);
        tabu.insert(0, &[5, 2], &mut rng);
        tabu.insert(0, &[5, 3], &mut rng);
        assert!(tabu.windows_for(5) <= 2, "m=1 bounds steady-state list growth");
    }
}

//! Bin-to-bin migration primitives (spec §4.6).
//!
//! Grounded directly in
//! `original_source/BinPackSolver/utils/operations.py`'s
//! `container_concatenate`/`container_change`/`container_insert`, ported
//! from cumulative-sum + `numpy.searchsorted` to `Vec<u64>` + a
//! `partition_point` binary search with the same boundary semantics
//! (`searchsorted(..., side='left')`: count of elements strictly less
//! than the target).
//!
//! All three operations preserve mass and leave both bins in canonical
//! ascending order.

use crate::packing::Bin;
use crate::primitives::sorted_merge;

fn prefix_sums(items: &[u64]) -> Vec<u64> {
    let mut sums = Vec::with_capacity(items.len());
    let mut running = 0u64;
    for &item in items {
        running += item;
        sums.push(running);
    }
    sums
}

/// Moves the longest prefix of `b` (in ascending order) that still fits
/// into `a`'s residual capacity, leaving at least one item behind in `b`.
///
/// Equivalent to a binary search over the cumulative sums of `b`.
pub fn concatenate(bins: &mut [Bin], a: usize, b: usize, capacity: u64) {
    let residual_a = bins[a].residual(capacity);
    let b_items = bins[b].items().to_vec();
    if b_items.is_empty() {
        return;
    }
    let cumsum_b = prefix_sums(&b_items);
    let count_lt = cumsum_b.partition_point(|&s| s < residual_a);
    let it = count_lt.min(b_items.len() - 1);

    if it > 0 {
        let moved = &b_items[..it];
        let remaining = b_items[it..].to_vec();
        let merged_a = sorted_merge(bins[a].items(), moved);
        bins[a] = Bin::from_sorted(merged_a);
        bins[b] = Bin::from_sorted(remaining);
    }
}

/// For each item `x` in `a`, finds the smallest prefix of `b` whose
/// removal-and-exchange with `x` keeps `b`'s load within capacity, and
/// performs that swap: `x` moves to `b`'s tail, the prefix moves to `a`.
///
/// Bins are kept canonical throughout.
pub fn change(bins: &mut [Bin], a: usize, b: usize, capacity: u64) {
    let a_snapshot = bins[a].items().to_vec();
    let mut a_items = a_snapshot.clone();
    let mut b_items = bins[b].items().to_vec();
    let mut cumsum_b = prefix_sums(&b_items);
    let mut pending_merges: Vec<Vec<u64>> = Vec::new();

    for &x in &a_snapshot {
        if b_items.is_empty() {
            break;
        }
        let idx = cumsum_b.partition_point(|&s| s < x);
        if idx > 1 {
            let b_total = *cumsum_b.last().unwrap();
            let removed_sum = cumsum_b[idx - 1];
            if b_total - removed_sum + x <= capacity {
                pending_merges.push(b_items[..idx].to_vec());
                if let Some(pos) = a_items.iter().position(|&v| v == x) {
                    a_items.remove(pos);
                }
                b_items = b_items[idx..].to_vec();
                b_items = if b_items.is_empty() {
                    vec![x]
                } else {
                    sorted_merge(&b_items, &[x])
                };
                cumsum_b = prefix_sums(&b_items);
            }
        }
    }

    for range in pending_merges {
        a_items = sorted_merge(&a_items, &range);
    }

    bins[a] = Bin::from_sorted(a_items);
    bins[b] = Bin::from_sorted(b_items);
}

/// The composite move: merges `b` into `a` outright when `a`'s residual
/// already accommodates all of `b` (decreasing the bin count by one and
/// dropping `b` from `bins`); otherwise applies [`concatenate`] then
/// [`change`] and keeps the bin count unchanged.
///
/// Requires `a < b`. Returns `true` iff the bins were merged (the caller
/// must then treat index `b` as removed from `bins`).
pub fn insert(bins: &mut Vec<Bin>, a: usize, b: usize, capacity: u64) -> bool {
    debug_assert!(a < b, "insert requires a < b");
    let residual_a = bins[a].residual(capacity);
    let load_b = bins[b].load();

    if residual_a >= load_b {
        let b_bin = bins.remove(b);
        bins[a].merge_in(&b_bin);
        true
    } else {
        concatenate(bins, a, b, capacity);
        change(bins, a, b, capacity);
        false
    }
}

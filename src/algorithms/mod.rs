//! Instrumented reference algorithms.
//!
//! Each module implements [`InstrumentedAlgorithm`](crate::traits::InstrumentedAlgorithm)
//! for one algorithm and documents its tie-break and stability policy:
//! - [`bubble_sort`]    : adjacent-swap sort with early exit (stable).
//! - [`insertion_sort`] : swap-based insertion sort (stable).
//! - [`quick_sort`]     : Lomuto partition, last-element pivot (not stable).
//! - [`merge_sort`]     : top-down merge through an auxiliary buffer (stable).
//! - [`binary_search`]  : half-open window search over sorted keys.
//! - [`bfs`] / [`dfs`]  : unweighted traversals from a start node.
//! - [`dijkstra`]       : single-source shortest paths, non-negative weights.

pub mod bfs;
pub mod binary_search;
pub mod bubble_sort;
pub mod dfs;
pub mod dijkstra;
pub mod insertion_sort;
pub mod merge_sort;
pub mod quick_sort;

mod graph;

use rand::Rng;

/// Keys in `1..=100`, the range the visualizer's bar chart is scaled for.
pub(crate) fn random_keys<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<i64> {
    (0..size).map(|_| rng.gen_range(1..=100)).collect()
}

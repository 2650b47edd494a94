//! Quick sort with Lomuto partitioning.
//!
//! The pivot is always the last element of the current range, so traces are
//! fully determined by the input. Not stable: the closing pivot swap can move
//! an equal key past another.
//!
//! Self-swaps (`i == j`) are not mutations and emit nothing.

use rand::Rng;

use crate::engine::{array, Tracer};
use crate::error::EngineError;
use crate::step::Snapshot;
use crate::traits::InstrumentedAlgorithm;

#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSort;

impl QuickSort {
    /// Partition `keys[lo..=hi]` around `keys[hi]`; returns the pivot's final position.
    fn partition(
        keys: &mut [i64],
        lo: usize,
        hi: usize,
        tracer: &mut Tracer,
    ) -> Result<usize, EngineError> {
        let pivot = keys[hi];
        let mut store = lo;
        for j in lo..hi {
            tracer.compare_keys(keys, j, hi)?;
            if keys[j] < pivot {
                if store != j {
                    keys.swap(store, j);
                    tracer.swap_keys(keys, store, j)?;
                }
                store += 1;
            }
        }
        if store != hi {
            keys.swap(store, hi);
            tracer.swap_keys(keys, store, hi)?;
        }
        Ok(store)
    }
}

impl InstrumentedAlgorithm for QuickSort {
    type Input = Vec<i64>;

    fn id(&self) -> &'static str {
        "quick-sort"
    }

    fn validate(&self, _input: &Self::Input) -> Result<(), EngineError> {
        Ok(())
    }

    fn initial_snapshot(&self, input: &Self::Input) -> Snapshot {
        array(input)
    }

    fn execute(&self, mut keys: Self::Input, tracer: &mut Tracer) -> Result<(), EngineError> {
        // Explicit stack of inclusive ranges; the left range is pushed last so
        // it is processed first, matching the recursive order.
        let mut ranges = Vec::new();
        if keys.len() > 1 {
            ranges.push((0, keys.len() - 1));
        }
        while let Some((lo, hi)) = ranges.pop() {
            let p = Self::partition(&mut keys, lo, hi, tracer)?;
            if p + 1 < hi {
                ranges.push((p + 1, hi));
            }
            if p > lo + 1 {
                ranges.push((lo, p - 1));
            }
        }
        tracer.done_keys(&keys)
    }

    fn generate<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Self::Input {
        super::random_keys(size, rng)
    }
}

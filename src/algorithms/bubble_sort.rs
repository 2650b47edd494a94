//! Bubble sort with early exit.
//!
//! Stable: only strictly out-of-order neighbours are swapped. Each pass emits
//! a `Compare` for every adjacent pair it inspects, and stops the whole sort
//! once a pass makes no swap (best case O(n)).

use rand::Rng;

use crate::engine::{array, Tracer};
use crate::error::EngineError;
use crate::step::Snapshot;
use crate::traits::InstrumentedAlgorithm;

#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl InstrumentedAlgorithm for BubbleSort {
    type Input = Vec<i64>;

    fn id(&self) -> &'static str {
        "bubble-sort"
    }

    fn validate(&self, _input: &Self::Input) -> Result<(), EngineError> {
        Ok(())
    }

    fn initial_snapshot(&self, input: &Self::Input) -> Snapshot {
        array(input)
    }

    fn execute(&self, mut keys: Self::Input, tracer: &mut Tracer) -> Result<(), EngineError> {
        let n = keys.len();
        for pass in 0..n {
            let mut swapped = false;
            for j in 0..n.saturating_sub(pass + 1) {
                tracer.compare_keys(&keys, j, j + 1)?;
                if keys[j] > keys[j + 1] {
                    keys.swap(j, j + 1);
                    tracer.swap_keys(&keys, j, j + 1)?;
                    swapped = true;
                }
            }
            if !swapped {
                break;
            }
        }
        tracer.done_keys(&keys)
    }

    fn generate<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Self::Input {
        super::random_keys(size, rng)
    }
}

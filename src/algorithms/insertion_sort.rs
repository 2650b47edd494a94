//! Insertion sort, expressed as a run of adjacent swaps.
//!
//! Stable: an element only moves left past strictly greater keys.

use rand::Rng;

use crate::engine::{array, Tracer};
use crate::error::EngineError;
use crate::step::Snapshot;
use crate::traits::InstrumentedAlgorithm;

#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSort;

impl InstrumentedAlgorithm for InsertionSort {
    type Input = Vec<i64>;

    fn id(&self) -> &'static str {
        "insertion-sort"
    }

    fn validate(&self, _input: &Self::Input) -> Result<(), EngineError> {
        Ok(())
    }

    fn initial_snapshot(&self, input: &Self::Input) -> Snapshot {
        array(input)
    }

    fn execute(&self, mut keys: Self::Input, tracer: &mut Tracer) -> Result<(), EngineError> {
        for i in 1..keys.len() {
            let mut j = i;
            while j > 0 {
                tracer.compare_keys(&keys, j - 1, j)?;
                if keys[j - 1] <= keys[j] {
                    break;
                }
                keys.swap(j - 1, j);
                tracer.swap_keys(&keys, j - 1, j)?;
                j -= 1;
            }
        }
        tracer.done_keys(&keys)
    }

    fn generate<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Self::Input {
        super::random_keys(size, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;
    use crate::TraceEngine;

    #[test]
    fn reverse_input_swaps_every_pair() {
        let trace = TraceEngine::new(InsertionSort)
            .run(&vec![4, 3, 2, 1])
            .unwrap();
        assert_eq!(trace.count(StepKind::Swap), 6);
        assert_eq!(trace.count(StepKind::Compare), 6);
        assert_eq!(
            trace.terminal().unwrap().snapshot.keys(),
            Some(&[1, 2, 3, 4][..])
        );
    }

    #[test]
    fn equal_keys_are_never_swapped() {
        let trace = TraceEngine::new(InsertionSort)
            .run(&vec![5, 5, 5])
            .unwrap();
        assert_eq!(trace.count(StepKind::Swap), 0);
        assert_eq!(trace.count(StepKind::Compare), 2);
    }
}

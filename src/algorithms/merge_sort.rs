//! Top-down merge sort through an auxiliary buffer.
//!
//! Stable: on equal keys the left run wins. The left run is copied out to a
//! buffer, so its head may no longer be in the container when it is compared.
//! `Compare` operands are therefore the slot about to be written and the
//! right-run head (which is always still in place), and `value` carries the
//! buffered left key. Every write back into the container is an `Overwrite`;
//! a right-run tail that is already in place is not rewritten.

use rand::Rng;

use crate::engine::{array, Tracer};
use crate::error::EngineError;
use crate::step::{Snapshot, StepKind};
use crate::traits::InstrumentedAlgorithm;

#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

impl MergeSort {
    fn sort(keys: &mut [i64], lo: usize, hi: usize, tracer: &mut Tracer) -> Result<(), EngineError> {
        if hi - lo < 2 {
            return Ok(());
        }
        let mid = lo + (hi - lo) / 2;
        Self::sort(keys, lo, mid, tracer)?;
        Self::sort(keys, mid, hi, tracer)?;
        Self::merge(keys, lo, mid, hi, tracer)
    }

    fn merge(
        keys: &mut [i64],
        lo: usize,
        mid: usize,
        hi: usize,
        tracer: &mut Tracer,
    ) -> Result<(), EngineError> {
        let left = keys[lo..mid].to_vec();
        let right = keys[mid..hi].to_vec();
        let (mut i, mut j, mut k) = (0, 0, lo);

        while i < left.len() && j < right.len() {
            let note = format!("compare {} and {}", left[i], right[j]);
            tracer.emit(
                StepKind::Compare,
                vec![k, mid + j],
                Some(left[i]),
                note,
                array(keys),
            )?;
            if left[i] <= right[j] {
                keys[k] = left[i];
                i += 1;
            } else {
                keys[k] = right[j];
                j += 1;
            }
            tracer.overwrite_key(keys, k)?;
            k += 1;
        }
        while i < left.len() {
            keys[k] = left[i];
            tracer.overwrite_key(keys, k)?;
            i += 1;
            k += 1;
        }
        debug_assert!(keys[k..hi] == right[j..]);
        Ok(())
    }
}

impl InstrumentedAlgorithm for MergeSort {
    type Input = Vec<i64>;

    fn id(&self) -> &'static str {
        "merge-sort"
    }

    fn validate(&self, _input: &Self::Input) -> Result<(), EngineError> {
        Ok(())
    }

    fn initial_snapshot(&self, input: &Self::Input) -> Snapshot {
        array(input)
    }

    fn execute(&self, mut keys: Self::Input, tracer: &mut Tracer) -> Result<(), EngineError> {
        let n = keys.len();
        Self::sort(&mut keys, 0, n, tracer)?;
        tracer.done_keys(&keys)
    }

    fn generate<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Self::Input {
        super::random_keys(size, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TraceEngine;

    #[test]
    fn sorts_reference_array() {
        let trace = TraceEngine::new(MergeSort)
            .run(&vec![64, 34, 25, 12, 22, 11, 90])
            .unwrap();
        assert_eq!(
            trace.terminal().unwrap().snapshot.keys(),
            Some(&[11, 12, 22, 25, 34, 64, 90][..])
        );
        assert!(trace.count(StepKind::Overwrite) > 0);
        assert_eq!(trace.count(StepKind::Swap), 0);
    }

    #[test]
    fn overwrites_carry_written_value() {
        let trace = TraceEngine::new(MergeSort).run(&vec![2, 1]).unwrap();
        let kinds: Vec<_> = trace.steps().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::Compare,
                StepKind::Overwrite,
                StepKind::Overwrite,
                StepKind::Done
            ]
        );
        assert_eq!(trace.steps()[1].value, Some(1));
        assert_eq!(trace.steps()[2].value, Some(2));
    }

    #[test]
    fn compare_points_at_write_slot_and_live_right_head() {
        let trace = TraceEngine::new(MergeSort).run(&vec![3, 4, 1, 2]).unwrap();
        let mut prior = trace.initial_snapshot();
        for step in trace.steps() {
            if step.kind == StepKind::Compare {
                let keys = prior.keys().unwrap();
                let (k, r) = (step.operands[0], step.operands[1]);
                assert!(k < r);
                let left = step.value.unwrap();
                assert_eq!(step.note, format!("compare {} and {}", left, keys[r]));
            }
            prior = &step.snapshot;
        }
        let final_compares: Vec<_> = trace
            .steps()
            .iter()
            .filter(|s| s.kind == StepKind::Compare)
            .skip(2)
            .map(|s| (s.operands.clone(), s.value))
            .collect();
        assert_eq!(
            final_compares,
            vec![(vec![0, 2], Some(3)), (vec![1, 3], Some(3))]
        );
    }
}

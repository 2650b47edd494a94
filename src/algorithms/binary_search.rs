//! Binary search over a half-open window `[low, high)`.
//!
//! Every probe emits one three-way `Compare([mid])` whose `value` is the
//! target; narrowing the window emits `Mark([low, high])`. The terminal step
//! carries `[index]` when found and no operands otherwise. With duplicate
//! keys any matching index may be reported.

use rand::Rng;

use crate::engine::Tracer;
use crate::error::EngineError;
use crate::input::SearchInput;
use crate::step::{SearchState, Snapshot, StepKind};
use crate::traits::InstrumentedAlgorithm;

#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearch;

fn initial_state(input: &SearchInput) -> SearchState {
    SearchState {
        keys: input.keys.clone(),
        target: input.target,
        low: 0,
        high: input.keys.len(),
        probe: None,
        result: None,
    }
}

impl InstrumentedAlgorithm for BinarySearch {
    type Input = SearchInput;

    fn id(&self) -> &'static str {
        "binary-search"
    }

    fn validate(&self, input: &Self::Input) -> Result<(), EngineError> {
        match input.keys.windows(2).position(|w| w[0] > w[1]) {
            Some(i) => Err(EngineError::invalid(
                self.id(),
                format!(
                    "keys must be sorted ascending ({} at position {i} precedes {})",
                    input.keys[i],
                    input.keys[i + 1]
                ),
            )),
            None => Ok(()),
        }
    }

    fn initial_snapshot(&self, input: &Self::Input) -> Snapshot {
        Snapshot::Search(initial_state(input))
    }

    fn execute(&self, input: Self::Input, tracer: &mut Tracer) -> Result<(), EngineError> {
        let mut state = initial_state(&input);
        let target = input.target;

        while state.low < state.high {
            let mid = state.low + (state.high - state.low) / 2;
            let key = state.keys[mid];
            state.probe = Some(mid);
            tracer.emit(
                StepKind::Compare,
                vec![mid],
                Some(target),
                format!("compare {key} at position {mid} with {target}"),
                Snapshot::Search(state.clone()),
            )?;

            if key == target {
                state.result = Some(mid as isize);
                let note = format!("found {target} at position {mid}");
                return tracer.done(vec![mid], note, Snapshot::Search(state));
            }
            if key < target {
                state.low = mid + 1;
            } else {
                state.high = mid;
            }
            tracer.emit(
                StepKind::Mark,
                vec![state.low, state.high],
                None,
                format!("narrow window to [{}, {})", state.low, state.high),
                Snapshot::Search(state.clone()),
            )?;
        }

        state.result = Some(-1);
        tracer.done(
            Vec::new(),
            format!("{target} not present"),
            Snapshot::Search(state),
        )
    }

    fn generate<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Self::Input {
        let mut keys = super::random_keys(size, rng);
        keys.sort_unstable();
        let target = if !keys.is_empty() && rng.gen_bool(0.7) {
            keys[rng.gen_range(0..keys.len())]
        } else {
            rng.gen_range(1..=100)
        };
        SearchInput { keys, target }
    }
}

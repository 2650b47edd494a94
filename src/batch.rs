//! Running one algorithm over many inputs.
//!
//! Runs are independent, so with the `parallel` feature they are spread over
//! the rayon pool; the result order always matches the input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::EngineError;
use crate::input::Input;
use crate::registry::AlgorithmId;
use crate::step::Trace;

/// One result per input, in input order.
pub fn run_batch(algorithm: AlgorithmId, inputs: &[Input]) -> Vec<Result<Trace, EngineError>> {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("batch", algorithm = algorithm.id(), runs = inputs.len()).entered();

    #[cfg(feature = "parallel")]
    let results = inputs.par_iter().map(|input| algorithm.run(input)).collect();
    #[cfg(not(feature = "parallel"))]
    let results = inputs.iter().map(|input| algorithm.run(input)).collect();

    results
}

/// Aggregate figures over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub runs: usize,
    pub failures: usize,
    pub total_steps: usize,
    pub max_steps: usize,
}

impl BatchSummary {
    pub fn of(results: &[Result<Trace, EngineError>]) -> Self {
        results.iter().fold(Self::default(), |mut acc, r| {
            acc.runs += 1;
            match r {
                Ok(trace) => {
                    acc.total_steps += trace.len();
                    acc.max_steps = acc.max_steps.max(trace.len());
                }
                Err(_) => acc.failures += 1,
            }
            acc
        })
    }
}

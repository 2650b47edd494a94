//! Generic tracing engine.
//!
//! [`TraceEngine`] runs an [`InstrumentedAlgorithm`] eagerly to completion
//! and returns the sealed [`Trace`]. Steps flow through a [`Tracer`], which
//! numbers them and forwards them to a [`StepRecorder`].
//!
//! Runs are synchronous and single-threaded; the resulting trace is immutable
//! and can be shared freely with a playback controller.

use crate::error::EngineError;
use crate::recorder::StepRecorder;
use crate::step::{Snapshot, Step, StepKind, Trace};
use crate::traits::InstrumentedAlgorithm;

/// Emission handle given to an algorithm during a run.
#[derive(Debug)]
pub struct Tracer {
    recorder: StepRecorder,
    closed: bool,
}

impl Tracer {
    pub fn new(algorithm: &'static str, initial: Snapshot) -> Self {
        Self {
            recorder: StepRecorder::new(algorithm, initial),
            closed: false,
        }
    }

    /// Number of steps emitted so far.
    pub fn emitted(&self) -> usize {
        self.recorder.len()
    }

    /// Emit one step with the next free index.
    pub fn emit(
        &mut self,
        kind: StepKind,
        operands: Vec<usize>,
        value: Option<i64>,
        note: impl Into<String>,
        snapshot: Snapshot,
    ) -> Result<(), EngineError> {
        if self.closed {
            return Err(EngineError::TraceSealed);
        }
        let step = Step {
            index: self.recorder.next_index(),
            kind,
            operands,
            value,
            note: note.into(),
            snapshot,
        };
        self.recorder.record(step)?;
        if kind == StepKind::Done {
            self.closed = true;
        }
        Ok(())
    }

    /// Close the trace with its final result.
    pub fn done(
        &mut self,
        operands: Vec<usize>,
        note: impl Into<String>,
        snapshot: Snapshot,
    ) -> Result<(), EngineError> {
        self.emit(StepKind::Done, operands, None, note, snapshot)
    }

    pub fn compare_keys(&mut self, keys: &[i64], i: usize, j: usize) -> Result<(), EngineError> {
        let note = format!("compare {} and {}", keys[i], keys[j]);
        self.emit(StepKind::Compare, vec![i, j], None, note, array(keys))
    }

    /// Emit a swap; `keys` must already hold the swapped state.
    pub fn swap_keys(&mut self, keys: &[i64], i: usize, j: usize) -> Result<(), EngineError> {
        let note = format!("swap positions {i} and {j}");
        self.emit(StepKind::Swap, vec![i, j], None, note, array(keys))
    }

    /// Emit an overwrite of `pos`; `keys` must already hold the new value.
    pub fn overwrite_key(&mut self, keys: &[i64], pos: usize) -> Result<(), EngineError> {
        let value = keys[pos];
        let note = format!("write {value} at position {pos}");
        self.emit(StepKind::Overwrite, vec![pos], Some(value), note, array(keys))
    }

    pub fn done_keys(&mut self, keys: &[i64]) -> Result<(), EngineError> {
        self.done(Vec::new(), "sorted", array(keys))
    }

    /// Seal the recorder and return the trace.
    ///
    /// Fails if the algorithm returned without emitting `Done`.
    pub fn finish(mut self) -> Result<Trace, EngineError> {
        if !self.closed {
            return Err(EngineError::MalformedStep {
                kind: StepKind::Done.name(),
                reason: "run ended without a terminal step",
            });
        }
        self.recorder.finalize()
    }
}

#[inline]
pub(crate) fn array(keys: &[i64]) -> Snapshot {
    Snapshot::Array {
        keys: keys.to_vec(),
    }
}

/// Tracing engine for a given algorithm `A`.
///
/// ```
/// use algo_stepper::{algorithms::bubble_sort::BubbleSort, TraceEngine};
///
/// let engine = TraceEngine::new(BubbleSort);
/// let trace = engine.run(&vec![3, 1, 2]).unwrap();
/// let done = trace.terminal().unwrap();
/// assert_eq!(done.snapshot.keys(), Some(&[1, 2, 3][..]));
/// ```
pub struct TraceEngine<A: InstrumentedAlgorithm> {
    algorithm: A,
}

impl<A: InstrumentedAlgorithm> TraceEngine<A> {
    pub fn new(algorithm: A) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Validate, copy and run `input`, returning the sealed trace.
    ///
    /// The caller's input is never touched. If the algorithm reports an error
    /// mid-run the partial trace is dropped; nothing truncated is returned.
    pub fn run(&self, input: &A::Input) -> Result<Trace, EngineError> {
        let id = self.algorithm.id();
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("trace_run", algorithm = id);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        self.algorithm.validate(input)?;

        let working = input.clone();
        let mut tracer = Tracer::new(id, self.algorithm.initial_snapshot(&working));
        if let Err(err) = self.algorithm.execute(working, &mut tracer) {
            #[cfg(feature = "tracing")]
            tracing::error!(algorithm = id, error = %err, steps = tracer.emitted(), "run aborted");
            return Err(err);
        }

        let trace = tracer.finish()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(algorithm = id, steps = trace.len(), "trace sealed");
        Ok(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    /// Forgets to close its trace.
    struct Unterminated;

    impl InstrumentedAlgorithm for Unterminated {
        type Input = Vec<i64>;
        fn id(&self) -> &'static str {
            "unterminated"
        }
        fn validate(&self, _input: &Self::Input) -> Result<(), EngineError> {
            Ok(())
        }
        fn initial_snapshot(&self, input: &Self::Input) -> Snapshot {
            array(input)
        }
        fn execute(&self, input: Self::Input, tracer: &mut Tracer) -> Result<(), EngineError> {
            if input.len() >= 2 {
                tracer.compare_keys(&input, 0, 1)?;
            }
            Ok(())
        }
        fn generate<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Self::Input {
            (0..size).map(|_| rng.gen_range(0..10)).collect()
        }
    }

    /// Keeps emitting after `Done`.
    struct Chatty;

    impl InstrumentedAlgorithm for Chatty {
        type Input = Vec<i64>;
        fn id(&self) -> &'static str {
            "chatty"
        }
        fn validate(&self, _input: &Self::Input) -> Result<(), EngineError> {
            Ok(())
        }
        fn initial_snapshot(&self, input: &Self::Input) -> Snapshot {
            array(input)
        }
        fn execute(&self, input: Self::Input, tracer: &mut Tracer) -> Result<(), EngineError> {
            tracer.done_keys(&input)?;
            tracer.done_keys(&input)
        }
        fn generate<R: Rng + ?Sized>(&self, size: usize, _rng: &mut R) -> Self::Input {
            vec![0; size]
        }
    }

    #[test]
    fn missing_done_is_an_error() {
        let err = TraceEngine::new(Unterminated).run(&vec![2, 1]).unwrap_err();
        assert!(matches!(err, EngineError::MalformedStep { kind: "Done", .. }));
        assert!(!err.is_caller_correctable());
    }

    #[test]
    fn emission_after_done_aborts_the_run() {
        let err = TraceEngine::new(Chatty).run(&vec![1]).unwrap_err();
        assert_eq!(err, EngineError::TraceSealed);
    }

    #[test]
    fn tracer_numbers_steps_densely() {
        let mut tracer = Tracer::new("t", array(&[2, 1]));
        tracer.compare_keys(&[2, 1], 0, 1).unwrap();
        tracer.swap_keys(&[1, 2], 0, 1).unwrap();
        tracer.done_keys(&[1, 2]).unwrap();
        let trace = tracer.finish().unwrap();
        let indices: Vec<usize> = trace.steps().iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(trace.steps()[0].note, "compare 2 and 1");
    }
}

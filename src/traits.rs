//! Core trait for step-traceable algorithms.
//!
//! To plug an algorithm into the tracing engine, implement
//! [`InstrumentedAlgorithm`] for a (usually zero-sized) struct. The engine
//! takes care of validation, copying the caller's input, sealing the trace
//! and discarding partial output on failure.
//!
//! Emission rules every implementation must follow:
//! - one `Compare` per comparison that influences control flow;
//! - one `Swap` / `Overwrite` per mutation of the working container, with the
//!   snapshot taken after the mutation;
//! - `Visit` / `Mark` when a graph node is dequeued, enqueued or coloured;
//! - exactly one closing `Done`, carrying the final result;
//! - steps in the order a plain sequential run performs them.

use rand::Rng;

use crate::engine::Tracer;
use crate::error::EngineError;
use crate::step::Snapshot;

pub trait InstrumentedAlgorithm {
    /// Algorithm-specific payload (keys, search target, graph).
    type Input: Clone;

    /// Stable registry id, e.g. `"bubble-sort"`.
    fn id(&self) -> &'static str;

    /// Check the algorithm's precondition without running it.
    fn validate(&self, input: &Self::Input) -> Result<(), EngineError>;

    /// Container state shown before the first step.
    fn initial_snapshot(&self, input: &Self::Input) -> Snapshot;

    /// Run to completion, emitting every step into `tracer`.
    ///
    /// `input` is the engine's private copy and may be mutated freely.
    /// Implementations must finish with exactly one [`Tracer::done`] call.
    fn execute(&self, input: Self::Input, tracer: &mut Tracer) -> Result<(), EngineError>;

    /// Produce a random input of `size` elements (or nodes) that passes
    /// [`validate`](Self::validate).
    fn generate<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Self::Input;
}

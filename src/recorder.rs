//! Append-only step recorder.
//!
//! The recorder is the only producer of [`Trace`] values. It enforces the
//! dense `0, 1, 2, ...` index sequence and refuses further writes once sealed.

use crate::error::EngineError;
use crate::step::{Snapshot, Step, Trace};

#[derive(Debug)]
pub struct StepRecorder {
    algorithm: &'static str,
    initial: Snapshot,
    steps: Vec<Step>,
    sealed: bool,
}

impl StepRecorder {
    pub fn new(algorithm: &'static str, initial: Snapshot) -> Self {
        Self {
            algorithm,
            initial,
            steps: Vec::new(),
            sealed: false,
        }
    }

    /// Index the next recorded step must carry.
    #[inline]
    pub fn next_index(&self) -> usize {
        self.steps.len()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Append `step` to the in-progress trace.
    pub fn record(&mut self, step: Step) -> Result<(), EngineError> {
        if self.sealed {
            return Err(EngineError::TraceSealed);
        }
        let expected = self.next_index();
        if step.index != expected {
            return Err(EngineError::OrderingViolation {
                expected,
                found: step.index,
            });
        }
        self.steps.push(step);
        Ok(())
    }

    /// Seal the recorder and hand out the immutable trace.
    ///
    /// A second call fails with [`EngineError::TraceSealed`]; the steps have
    /// already been moved into the first trace.
    pub fn finalize(&mut self) -> Result<Trace, EngineError> {
        if self.sealed {
            return Err(EngineError::TraceSealed);
        }
        self.sealed = true;
        let steps = std::mem::take(&mut self.steps);
        Ok(Trace::new(self.algorithm, self.initial.clone(), steps))
    }
}

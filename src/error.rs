//! Error taxonomy for tracing and playback.
//!
//! Only the caller-correctable variants are meant to be recovered from: they
//! are turned into a [`ValidationMessage`] at the [`Visualizer`] boundary.
//! Everything else points at a broken instrumented algorithm or a registry
//! misconfiguration and is propagated unchanged.
//!
//! [`Visualizer`]: crate::session::Visualizer

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The input violates the algorithm's declared precondition.
    #[error("invalid input for {algorithm}: {message}")]
    InvalidInput {
        algorithm: &'static str,
        message: String,
    },

    /// The input is of the wrong shape entirely (e.g. a graph given to a sort).
    #[error("{algorithm} expects {expected} input")]
    InputShapeMismatch {
        algorithm: &'static str,
        expected: &'static str,
    },

    #[error("unknown algorithm id '{0}'")]
    UnknownAlgorithm(String),

    /// A step was recorded with an index other than `previous + 1`.
    #[error("step recorded out of order: expected index {expected}, found {found}")]
    OrderingViolation { expected: usize, found: usize },

    /// A step names a position outside its container.
    #[error("operand {operand} is out of range for a container of {len} positions")]
    OperandOutOfRange { operand: usize, len: usize },

    /// A step lacks operands or a value its kind requires.
    #[error("malformed {kind} step: {reason}")]
    MalformedStep {
        kind: &'static str,
        reason: &'static str,
    },

    #[error("trace is sealed; no further steps may be recorded")]
    TraceSealed,

    /// The step kind has no meaning for the container it was applied to.
    #[error("step kind {kind} is not supported on a {container} container")]
    UnsupportedStepKind {
        kind: &'static str,
        container: &'static str,
    },
}

impl EngineError {
    pub(crate) fn invalid(algorithm: &'static str, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            algorithm,
            message: message.into(),
        }
    }

    /// True for errors the caller can fix by supplying different input.
    pub fn is_caller_correctable(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidInput { .. }
                | EngineError::InputShapeMismatch { .. }
                | EngineError::UnknownAlgorithm(_)
        )
    }

    /// Convert a caller-correctable error into its user-facing form.
    ///
    /// Returns `None` for internal invariant violations.
    pub fn to_validation_message(&self) -> Option<ValidationMessage> {
        if self.is_caller_correctable() {
            Some(ValidationMessage {
                kind: "InvalidInput",
                message: self.to_string(),
            })
        } else {
            None
        }
    }
}

/// Structured validation error surfaced to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationMessage {
    pub kind: &'static str,
    pub message: String,
}

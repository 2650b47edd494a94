//! Re-deriving snapshots from step deltas.
//!
//! Each recorded step stores a full snapshot, but it also carries enough
//! information to reproduce that snapshot from the previous one. Replaying
//! the first `k + 1` steps against the initial snapshot must land exactly on
//! step `k`'s stored snapshot.

use crate::error::EngineError;
use crate::step::{Snapshot, StepKind, Trace};

/// Snapshot obtained by applying steps `0..=k` to the initial snapshot.
///
/// A `k` past the end replays the whole trace.
pub fn replay_to(trace: &Trace, k: usize) -> Result<Snapshot, EngineError> {
    let mut snapshot = trace.initial_snapshot().clone();
    for step in trace.steps().iter().take(k.saturating_add(1)) {
        snapshot.advance(step)?;
    }
    Ok(snapshot)
}

/// Where a trace first disagrees with its own replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Divergence {
    /// Step `index` carries the wrong index field.
    Index { index: usize, found: usize },
    /// A `Done` step appears before the end, or the last step is not `Done`.
    Terminal { index: usize },
    /// The stored snapshot differs from the replayed one.
    Snapshot { index: usize },
}

/// First divergence between stored and replayed state, if any.
///
/// Errors raised while applying a delta are returned as is.
pub fn first_divergence(trace: &Trace) -> Result<Option<Divergence>, EngineError> {
    let last = trace.len().checked_sub(1);
    let mut snapshot = trace.initial_snapshot().clone();
    for (i, step) in trace.steps().iter().enumerate() {
        if step.index != i {
            return Ok(Some(Divergence::Index {
                index: i,
                found: step.index,
            }));
        }
        if (step.kind == StepKind::Done) != (Some(i) == last) {
            return Ok(Some(Divergence::Terminal { index: i }));
        }
        snapshot.advance(step)?;
        if snapshot != step.snapshot {
            return Ok(Some(Divergence::Snapshot { index: i }));
        }
    }
    if last.is_none() {
        return Ok(Some(Divergence::Terminal { index: 0 }));
    }
    Ok(None)
}

/// True when every step's snapshot is reproduced by replay.
pub fn verify_replay(trace: &Trace) -> Result<bool, EngineError> {
    first_divergence(trace).map(|d| d.is_none())
}

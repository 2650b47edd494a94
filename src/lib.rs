//! Step-by-step algorithm tracing and playback
//!
//! This crate turns classic algorithms into replayable *traces*: immutable
//! sequences of atomic steps (compare, swap, overwrite, visit, mark, done),
//! each carrying the full container state after it. A deterministic playback
//! controller then walks a trace forward, backward or to any index, and a
//! renderer-agnostic adapter tells a UI what to highlight at every position.
//!
//! ## Core idea
//! 1. Implement [`InstrumentedAlgorithm`] for an algorithm: validate the
//!    input, then emit one step per observable transition.
//! 2. Let [`TraceEngine`] run it eagerly into a sealed [`Trace`].
//! 3. Hand the trace to a [`PlaybackController`], or use the [`Visualizer`]
//!    facade which wires algorithm selection, input handling and playback
//!    together and answers every request with a [`Frame`].
//!
//! ## Quick start
//! ```
//! use algo_stepper::{algorithms::bubble_sort::BubbleSort, StepKind, TraceEngine};
//!
//! let trace = TraceEngine::new(BubbleSort).run(&vec![64, 34, 25, 12, 22, 11, 90]).unwrap();
//! assert_eq!(trace.steps()[0].kind, StepKind::Compare);
//! assert_eq!(trace.steps()[0].operands, vec![0, 1]);
//! let done = trace.terminal().unwrap();
//! assert_eq!(done.snapshot.keys(), Some(&[11, 12, 22, 25, 34, 64, 90][..]));
//! ```
//!
//! ## Built-in algorithms
//! The `algorithms` module contains instrumented versions of:
//! - Bubble, insertion, quick and merge sort
//! - Binary search
//! - Breadth-first and depth-first traversal
//! - Dijkstra's shortest paths
//!
//! They are also reachable by string id through [`AlgorithmId`].

pub mod adapter;
pub mod algorithms;
pub mod batch;
pub mod builder;
pub mod controller;
pub mod engine;
pub mod error;
pub mod input;
pub mod recorder;
pub mod registry;
pub mod replay;
pub mod scheduler;
pub mod session;
pub mod step;
pub mod traits;
pub mod utils;

pub use crate::adapter::{Style, VisualAnnotation};
pub use crate::builder::VisualizerBuilder;
pub use crate::controller::{PlaybackController, PlaybackState, Status};
pub use crate::engine::{TraceEngine, Tracer};
pub use crate::error::{EngineError, ValidationMessage};
pub use crate::input::{GraphInput, Input, SearchInput};
pub use crate::registry::{AlgorithmId, AlgorithmInfo, Category};
pub use crate::scheduler::{ManualScheduler, TickScheduler, TimerId, WallClockScheduler};
pub use crate::session::{Frame, Update, Visualizer};
pub use crate::step::{Snapshot, Step, StepKind, Trace};
pub use crate::traits::InstrumentedAlgorithm;

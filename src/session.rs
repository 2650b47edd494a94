//! The visualizer facade.
//!
//! [`Visualizer`] is the single entry point a UI talks to. It owns the
//! selected algorithm, the current input, the seeded generator used for
//! "randomize", and a [`PlaybackController`]. Every verb answers with a
//! [`Frame`] describing what to draw next, or with a [`ValidationMessage`]
//! when the request was rejected; a rejected request leaves the previous run
//! untouched.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::adapter::VisualAnnotation;
use crate::controller::{PlaybackController, PlaybackState};
use crate::error::{EngineError, ValidationMessage};
use crate::input::{Input, SearchInput};
use crate::registry::{AlgorithmId, AlgorithmInfo, Category};
use crate::scheduler::TickScheduler;
use crate::step::{Snapshot, Trace};
use crate::utils::speed_from_percent;

/// Keys shown when nothing else has been configured.
pub const DEFAULT_KEYS: [i64; 7] = [64, 34, 25, 12, 22, 11, 90];

/// Everything a renderer needs after a state change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub playback_state: PlaybackState,
    pub current_annotations: Vec<VisualAnnotation>,
    pub current_snapshot: Snapshot,
    pub algorithm_metadata: AlgorithmInfo,
}

/// Answer to a request that may be rejected for bad input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Update {
    Frame(Frame),
    Rejected(ValidationMessage),
}

impl Update {
    pub fn frame(&self) -> Option<&Frame> {
        match self {
            Update::Frame(frame) => Some(frame),
            Update::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&ValidationMessage> {
        match self {
            Update::Frame(_) => None,
            Update::Rejected(msg) => Some(msg),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Update::Rejected(_))
    }
}

/// Turn caller-correctable errors into a rejection; propagate the rest.
fn recover(err: EngineError) -> Result<Update, EngineError> {
    match err.to_validation_message() {
        Some(msg) => Ok(Update::Rejected(msg)),
        None => Err(err),
    }
}

/// Input used for `algorithm` when the configured one has the wrong shape.
///
/// Sorts get `keys`; binary search gets them sorted and deduplicated with the
/// median as target; graph algorithms get a seeded random graph with as many
/// nodes as there are keys.
pub(crate) fn default_input(algorithm: AlgorithmId, keys: &[i64], seed: u64) -> Input {
    match algorithm.category() {
        Category::Sorting => Input::keys(keys.to_vec()),
        Category::Search => {
            let mut sorted = keys.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            let target = sorted.get(sorted.len() / 2).copied().unwrap_or(0);
            Input::from(SearchInput {
                keys: sorted,
                target,
            })
        }
        Category::Graph => {
            let mut rng = StdRng::seed_from_u64(seed);
            algorithm.generate(keys.len().max(1), &mut rng)
        }
    }
}

pub struct Visualizer<S: TickScheduler> {
    algorithm: AlgorithmId,
    input: Input,
    configured_input: Option<Input>,
    default_keys: Vec<i64>,
    seed: u64,
    rng: StdRng,
    max_input_size: usize,
    max_trace_cells: u128,
    controller: PlaybackController<S>,
}

impl<S: TickScheduler> Visualizer<S> {
    /// Assemble a visualizer and run `algorithm` on `input` once.
    ///
    /// Used by [`VisualizerBuilder`](crate::builder::VisualizerBuilder); every
    /// error here is returned as is, since there is no previous run to keep.
    pub(crate) fn assemble(
        algorithm: AlgorithmId,
        configured_input: Option<Input>,
        default_keys: Vec<i64>,
        seed: u64,
        max_input_size: usize,
        max_trace_cells: u128,
        controller: PlaybackController<S>,
    ) -> Result<Self, EngineError> {
        let input = match &configured_input {
            Some(input) => input.clone(),
            None => default_input(algorithm, &default_keys, seed),
        };
        let mut vis = Self {
            algorithm,
            input: input.clone(),
            configured_input,
            default_keys,
            seed,
            rng: StdRng::seed_from_u64(seed),
            max_input_size,
            max_trace_cells,
            controller,
        };
        vis.check_size(algorithm, &input)?;
        let trace = algorithm.run(&input)?;
        vis.controller.load(Arc::new(trace));
        Ok(vis)
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn max_input_size(&self) -> usize {
        self.max_input_size
    }

    pub fn max_trace_cells(&self) -> u128 {
        self.max_trace_cells
    }

    pub fn trace(&self) -> Option<&Arc<Trace>> {
        self.controller.trace()
    }

    pub fn controller(&self) -> &PlaybackController<S> {
        &self.controller
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.controller.scheduler_mut()
    }

    /// Current output, without changing anything.
    pub fn frame(&self) -> Result<Frame, EngineError> {
        let current_snapshot = match self.controller.current_snapshot() {
            Some(snapshot) => snapshot.clone(),
            None => self.algorithm.initial_snapshot(&self.input)?,
        };
        Ok(Frame {
            playback_state: self.controller.state(),
            current_annotations: self.controller.current_annotations()?,
            current_snapshot,
            algorithm_metadata: self.algorithm.info(),
        })
    }

    /// Refuse inputs that are too large, or whose trace could outgrow the
    /// cell budget.
    fn check_size(&self, algorithm: AlgorithmId, input: &Input) -> Result<(), EngineError> {
        if input.size() > self.max_input_size {
            return Err(EngineError::invalid(
                algorithm.id(),
                format!(
                    "input has {} elements, the limit is {}",
                    input.size(),
                    self.max_input_size
                ),
            ));
        }
        let cells = algorithm.trace_cells(input);
        if cells > self.max_trace_cells {
            return Err(EngineError::invalid(
                algorithm.id(),
                format!(
                    "input of {} elements could record up to {} steps ({cells} snapshot values), \
                     the limit is {} values",
                    input.size(),
                    algorithm.max_steps(input),
                    self.max_trace_cells
                ),
            ));
        }
        Ok(())
    }

    /// Run `algorithm` on `input` and, on success, make it the current run.
    fn rerun(&mut self, algorithm: AlgorithmId, input: Input) -> Result<Update, EngineError> {
        if let Err(err) = self.check_size(algorithm, &input) {
            return recover(err);
        }
        let trace = match algorithm.run(&input) {
            Ok(trace) => trace,
            Err(err) => return recover(err),
        };
        self.algorithm = algorithm;
        self.input = input;
        self.controller.load(Arc::new(trace));
        Ok(Update::Frame(self.frame()?))
    }

    /// Switch algorithms. The current input is kept when the new algorithm
    /// accepts it; otherwise a default input of the right shape is used.
    pub fn select_algorithm(&mut self, id: &str) -> Result<Update, EngineError> {
        let algorithm = match AlgorithmId::lookup(id) {
            Ok(algorithm) => algorithm,
            Err(err) => return recover(err),
        };
        let input = if algorithm.validate(&self.input).is_ok() {
            self.input.clone()
        } else {
            self.default_for(algorithm)
        };
        self.rerun(algorithm, input)
    }

    /// Replace the input for the current algorithm.
    pub fn set_input(&mut self, input: impl Into<Input>) -> Result<Update, EngineError> {
        self.rerun(self.algorithm, input.into())
    }

    /// Replace the input with a random one of `size` elements (or nodes).
    pub fn randomize_input(&mut self, size: usize) -> Result<Update, EngineError> {
        if size == 0 {
            return recover(EngineError::invalid(
                self.algorithm.id(),
                "random input size must be at least 1",
            ));
        }
        if size > self.max_input_size {
            return recover(EngineError::invalid(
                self.algorithm.id(),
                format!("random input size {size} exceeds the limit of {}", self.max_input_size),
            ));
        }
        let input = self.algorithm.generate(size, &mut self.rng);
        self.rerun(self.algorithm, input)
    }

    /// Restore the configured default input for the current algorithm.
    pub fn reset_input(&mut self) -> Result<Update, EngineError> {
        let input = self.default_for(self.algorithm);
        self.rerun(self.algorithm, input)
    }

    fn default_for(&self, algorithm: AlgorithmId) -> Input {
        match &self.configured_input {
            Some(input) if algorithm.validate(input).is_ok() => input.clone(),
            _ => default_input(algorithm, &self.default_keys, self.seed),
        }
    }

    pub fn play(&mut self) -> Result<Frame, EngineError> {
        self.controller.play();
        self.frame()
    }

    pub fn pause(&mut self) -> Result<Frame, EngineError> {
        self.controller.pause();
        self.frame()
    }

    pub fn step_forward(&mut self) -> Result<Frame, EngineError> {
        self.controller.step_forward();
        self.frame()
    }

    pub fn step_back(&mut self) -> Result<Frame, EngineError> {
        self.controller.step_back();
        self.frame()
    }

    pub fn seek(&mut self, index: isize) -> Result<Frame, EngineError> {
        self.controller.seek(index);
        self.frame()
    }

    pub fn reset(&mut self) -> Result<Frame, EngineError> {
        self.controller.reset();
        self.frame()
    }

    /// Change playback speed in steps per second.
    pub fn set_speed(&mut self, steps_per_second: f64) -> Result<Update, EngineError> {
        match self.controller.set_speed(steps_per_second) {
            Ok(_) => Ok(Update::Frame(self.frame()?)),
            Err(err) => recover(err),
        }
    }

    /// Change playback speed from a 1..=100 slider position.
    pub fn set_speed_percent(&mut self, percent: u8) -> Result<Update, EngineError> {
        self.set_speed(speed_from_percent(percent))
    }

    /// Apply due timer ticks. Returns a frame only when the cursor moved.
    pub fn pump(&mut self) -> Result<Option<Frame>, EngineError> {
        if self.controller.pump() == 0 {
            return Ok(None);
        }
        self.frame().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::VisualizerBuilder;
    use crate::controller::Status;
    use crate::input::GraphInput;
    use crate::scheduler::ManualScheduler;
    use std::time::Duration;

    fn visualizer() -> Visualizer<ManualScheduler> {
        VisualizerBuilder::new(ManualScheduler::new()).build().unwrap()
    }

    #[test]
    fn starts_on_default_bubble_sort() {
        let vis = visualizer();
        let frame = vis.frame().unwrap();
        assert_eq!(frame.algorithm_metadata.id, "bubble-sort");
        assert_eq!(frame.playback_state.status, Status::Paused);
        assert_eq!(frame.current_snapshot.keys(), Some(&DEFAULT_KEYS[..]));
    }

    #[test]
    fn invalid_input_keeps_previous_run() {
        let mut vis = visualizer();
        vis.select_algorithm("binary-search").unwrap();
        let before = vis.trace().cloned().unwrap();
        let update = vis.set_input(SearchInput {
            keys: vec![3, 1, 2],
            target: 1,
        });
        let msg = update.unwrap();
        assert_eq!(msg.rejection().map(|m| m.kind), Some("InvalidInput"));
        assert!(Arc::ptr_eq(vis.trace().unwrap(), &before));
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let mut vis = visualizer();
        let update = vis.select_algorithm("knn").unwrap();
        assert!(update.is_rejected());
        assert_eq!(vis.algorithm(), AlgorithmId::BubbleSort);
    }

    #[test]
    fn switching_shape_uses_default_input() {
        let mut vis = visualizer();
        let update = vis.select_algorithm("dijkstra").unwrap();
        let frame = update.frame().unwrap();
        assert_eq!(frame.algorithm_metadata.category, Category::Graph);
        assert_eq!(vis.input().size(), DEFAULT_KEYS.len());
        let update = vis.select_algorithm("bfs").unwrap();
        assert!(!update.is_rejected());
        assert_eq!(vis.input().shape(), "graph");
    }

    #[test]
    fn randomize_respects_limits() {
        let mut vis = VisualizerBuilder::new(ManualScheduler::new())
            .with_max_input_size(16)
            .build()
            .unwrap();
        assert!(vis.randomize_input(0).unwrap().is_rejected());
        assert!(vis.randomize_input(17).unwrap().is_rejected());
        let frame = vis.randomize_input(16).unwrap();
        assert_eq!(frame.frame().unwrap().current_snapshot.len(), 16);
    }

    #[test]
    fn quadratic_trace_over_budget_is_rejected() {
        let mut vis = visualizer();
        let before = vis.trace().map(|t| t.len());
        let update = vis.randomize_input(256).unwrap();
        let msg = update.rejection().unwrap();
        assert_eq!(msg.kind, "InvalidInput");
        assert_eq!(vis.input().size(), DEFAULT_KEYS.len());
        assert_eq!(vis.trace().map(|t| t.len()), before);

        let update = vis.select_algorithm("merge-sort").unwrap();
        assert!(!update.is_rejected());
        assert!(!vis.randomize_input(256).unwrap().is_rejected());
    }

    #[test]
    fn randomize_is_reproducible_per_seed() {
        let build = || {
            VisualizerBuilder::new(ManualScheduler::new())
                .with_seed(7)
                .build()
                .unwrap()
        };
        let (mut a, mut b) = (build(), build());
        a.randomize_input(12).unwrap();
        b.randomize_input(12).unwrap();
        assert_eq!(a.input(), b.input());
    }

    #[test]
    fn oversize_input_is_rejected() {
        let mut vis = VisualizerBuilder::new(ManualScheduler::new())
            .with_max_input_size(3)
            .with_input(Input::keys(vec![2, 1]))
            .build()
            .unwrap();
        assert!(vis.set_input(vec![4, 3, 2, 1]).unwrap().is_rejected());
        assert_eq!(vis.input(), &Input::keys(vec![2, 1]));
    }

    #[test]
    fn bad_speed_is_rejected() {
        let mut vis = visualizer();
        assert!(vis.set_speed(-2.0).unwrap().is_rejected());
        let update = vis.set_speed_percent(100).unwrap();
        assert_eq!(update.frame().unwrap().playback_state.speed, 50.0);
    }

    #[test]
    fn playing_to_the_end_sorts_defaults() {
        let mut vis = visualizer();
        vis.play().unwrap();
        vis.scheduler_mut().advance(Duration::from_secs(3600));
        let frame = vis.pump().unwrap().unwrap();
        assert_eq!(frame.playback_state.status, Status::Finished);
        assert_eq!(
            frame.current_snapshot.keys(),
            Some(&[11, 12, 22, 25, 34, 64, 90][..])
        );
        assert!(vis.pump().unwrap().is_none());
    }

    #[test]
    fn reset_input_restores_configured_graph() {
        let graph = GraphInput::undirected(3, &[(0, 1), (1, 2)], 0);
        let mut vis = VisualizerBuilder::new(ManualScheduler::new())
            .with_algorithm("bfs")
            .with_input(Input::from(graph.clone()))
            .build()
            .unwrap();
        vis.randomize_input(5).unwrap();
        assert_eq!(vis.input().size(), 5);
        vis.reset_input().unwrap();
        assert_eq!(vis.input(), &Input::from(graph));
    }
}

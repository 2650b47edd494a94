use crate::controller::PlaybackController;
use crate::error::EngineError;
use crate::input::Input;
use crate::registry::AlgorithmId;
use crate::scheduler::TickScheduler;
use crate::session::{Visualizer, DEFAULT_KEYS};
use crate::utils::{speed_from_percent, DEFAULT_SPEED_PERCENT};

/// Seed for the "randomize" generator when none is configured.
pub const DEFAULT_SEED: u64 = 0x5EED;

/// Largest input accepted by default.
pub const DEFAULT_MAX_INPUT_SIZE: usize = 512;

/// Default bound on [`AlgorithmId::trace_cells`] for one run, about 128 MiB
/// of keys.
pub const DEFAULT_MAX_TRACE_CELLS: u128 = 1 << 24;

pub struct VisualizerBuilder<S: TickScheduler> {
    scheduler: S,
    algorithm: String,
    input: Option<Input>,
    speed: Option<f64>,
    seed: u64,
    max_input_size: usize,
    max_trace_cells: u128,
}

impl<S: TickScheduler> VisualizerBuilder<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            algorithm: AlgorithmId::BubbleSort.id().to_string(),
            input: None,
            speed: None,
            seed: DEFAULT_SEED,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            max_trace_cells: DEFAULT_MAX_TRACE_CELLS,
        }
    }

    pub fn with_algorithm(mut self, id: impl Into<String>) -> Self {
        self.algorithm = id.into();
        self
    }

    /// Input for the first run, restored by [`Visualizer::reset_input`].
    pub fn with_input(mut self, input: impl Into<Input>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Playback speed in steps per second.
    pub fn with_speed(mut self, steps_per_second: f64) -> Self {
        self.speed = Some(steps_per_second);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_input_size(mut self, max_input_size: usize) -> Self {
        self.max_input_size = max_input_size;
        self
    }

    /// Largest trace a run may record, counted in snapshot values.
    pub fn with_max_trace_cells(mut self, max_trace_cells: u128) -> Self {
        self.max_trace_cells = max_trace_cells;
        self
    }

    pub fn build(self) -> Result<Visualizer<S>, EngineError> {
        let algorithm = AlgorithmId::lookup(&self.algorithm)?;
        let speed = self
            .speed
            .unwrap_or_else(|| speed_from_percent(DEFAULT_SPEED_PERCENT));
        let controller = PlaybackController::new(self.scheduler, speed)?;
        Visualizer::assemble(
            algorithm,
            self.input,
            DEFAULT_KEYS.to_vec(),
            self.seed,
            self.max_input_size,
            self.max_trace_cells,
            controller,
        )
    }
}

//! Steps, container snapshots and traces.
//!
//! A [`Trace`] is the immutable record of one algorithm run over one input.
//! Each [`Step`] carries the full observable container state *after* it was
//! applied, plus enough delta information (`operands`, `value`) for
//! [`Snapshot::advance`] to re-derive that state from the previous one.

use serde::Serialize;

use crate::error::EngineError;

/// Closed set of observable transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StepKind {
    Compare,
    Swap,
    Overwrite,
    Visit,
    Mark,
    Done,
}

impl StepKind {
    pub const ALL: [StepKind; 6] = [
        StepKind::Compare,
        StepKind::Swap,
        StepKind::Overwrite,
        StepKind::Visit,
        StepKind::Mark,
        StepKind::Done,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StepKind::Compare => "Compare",
            StepKind::Swap => "Swap",
            StepKind::Overwrite => "Overwrite",
            StepKind::Visit => "Visit",
            StepKind::Mark => "Mark",
            StepKind::Done => "Done",
        }
    }
}

/// Colour of a graph node during a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeColor {
    /// Not yet discovered.
    Unseen,
    /// Discovered and waiting in the frontier (queue, stack or heap).
    Frontier,
    /// Dequeued, finished or settled.
    Visited,
}

/// Observable state of a binary search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchState {
    pub keys: Vec<i64>,
    pub target: i64,
    /// Remaining window is `[low, high)`.
    pub low: usize,
    pub high: usize,
    /// Position most recently compared against the target.
    pub probe: Option<usize>,
    /// Found index or `-1`; set only by the terminal step.
    pub result: Option<isize>,
}

/// Observable state of a graph traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphState {
    pub colors: Vec<NodeColor>,
    /// Tentative distance (hop count or weighted) per node.
    pub dist: Vec<Option<i64>>,
    /// Traversal / shortest-path tree.
    pub parent: Vec<Option<usize>>,
    /// Frontier contents in insertion order.
    pub frontier: Vec<usize>,
    /// Start-to-end path, filled in by the terminal step.
    pub path: Vec<usize>,
}

impl GraphState {
    pub fn new(nodes: usize) -> Self {
        Self {
            colors: vec![NodeColor::Unseen; nodes],
            dist: vec![None; nodes],
            parent: vec![None; nodes],
            frontier: Vec::new(),
            path: Vec::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.colors.len()
    }

    /// Mark `node` as discovered with the given distance and parent.
    pub(crate) fn discover(&mut self, node: usize, parent: Option<usize>, dist: i64) {
        self.colors[node] = NodeColor::Frontier;
        self.dist[node] = Some(dist);
        self.parent[node] = parent;
        if !self.frontier.contains(&node) {
            self.frontier.push(node);
        }
    }

    /// Remove `node` from the frontier and colour it visited.
    pub(crate) fn settle(&mut self, node: usize) {
        if let Some(pos) = self.frontier.iter().position(|&n| n == node) {
            self.frontier.remove(pos);
        }
        self.colors[node] = NodeColor::Visited;
    }
}

/// Full container state at one point of a trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "container", rename_all = "snake_case")]
pub enum Snapshot {
    Array { keys: Vec<i64> },
    Search(SearchState),
    Graph(GraphState),
}

impl Snapshot {
    pub fn container_name(&self) -> &'static str {
        match self {
            Snapshot::Array { .. } => "array",
            Snapshot::Search(_) => "search",
            Snapshot::Graph(_) => "graph",
        }
    }

    /// Number of addressable positions (array slots or graph nodes).
    pub fn len(&self) -> usize {
        match self {
            Snapshot::Array { keys } => keys.len(),
            Snapshot::Search(s) => s.keys.len(),
            Snapshot::Graph(g) => g.node_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of an array or search container.
    pub fn keys(&self) -> Option<&[i64]> {
        match self {
            Snapshot::Array { keys } => Some(keys),
            Snapshot::Search(s) => Some(&s.keys),
            Snapshot::Graph(_) => None,
        }
    }

    pub fn as_graph(&self) -> Option<&GraphState> {
        match self {
            Snapshot::Graph(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_search(&self) -> Option<&SearchState> {
        match self {
            Snapshot::Search(s) => Some(s),
            _ => None,
        }
    }

    fn check_operands(
        &self,
        kind: StepKind,
        operands: &[usize],
        arity: usize,
    ) -> Result<(), EngineError> {
        if operands.len() < arity {
            return Err(EngineError::MalformedStep {
                kind: kind.name(),
                reason: "too few operands",
            });
        }
        let len = self.len();
        if let Some(&operand) = operands.iter().find(|&&op| op >= len) {
            return Err(EngineError::OperandOutOfRange { operand, len });
        }
        Ok(())
    }

    fn unsupported(&self, kind: StepKind) -> EngineError {
        EngineError::UnsupportedStepKind {
            kind: kind.name(),
            container: self.container_name(),
        }
    }

    /// Apply one step's delta in place.
    ///
    /// This is the replay half of the trace contract: starting from a trace's
    /// initial snapshot and advancing through steps `0..=k` must reproduce the
    /// snapshot stored on step `k`.
    pub fn advance(&mut self, step: &Step) -> Result<(), EngineError> {
        let kind = step.kind;
        let ops = step.operands.as_slice();
        match kind {
            StepKind::Compare => match self {
                Snapshot::Array { .. } | Snapshot::Graph(_) => self.check_operands(kind, ops, 2),
                Snapshot::Search(_) => {
                    self.check_operands(kind, ops, 1)?;
                    if let Snapshot::Search(s) = self {
                        s.probe = Some(ops[0]);
                    }
                    Ok(())
                }
            },
            StepKind::Swap => {
                if !matches!(self, Snapshot::Array { .. }) {
                    return Err(self.unsupported(kind));
                }
                self.check_operands(kind, ops, 2)?;
                if let Snapshot::Array { keys } = self {
                    keys.swap(ops[0], ops[1]);
                }
                Ok(())
            }
            StepKind::Overwrite => {
                if !matches!(self, Snapshot::Array { .. }) {
                    return Err(self.unsupported(kind));
                }
                self.check_operands(kind, ops, 1)?;
                let value = step.value.ok_or(EngineError::MalformedStep {
                    kind: kind.name(),
                    reason: "missing written value",
                })?;
                if let Snapshot::Array { keys } = self {
                    keys[ops[0]] = value;
                }
                Ok(())
            }
            StepKind::Visit => {
                if !matches!(self, Snapshot::Graph(_)) {
                    return Err(self.unsupported(kind));
                }
                self.check_operands(kind, ops, 1)?;
                if let Snapshot::Graph(g) = self {
                    g.settle(ops[0]);
                }
                Ok(())
            }
            StepKind::Mark => match self {
                Snapshot::Array { .. } => Err(self.unsupported(kind)),
                Snapshot::Search(s) => {
                    // `[low, high)` may legitimately equal the key count.
                    let len = s.keys.len();
                    match ops {
                        [low, high] if low <= high && *high <= len => {
                            s.low = *low;
                            s.high = *high;
                            Ok(())
                        }
                        _ => Err(EngineError::OperandOutOfRange {
                            operand: ops.iter().copied().max().unwrap_or(0),
                            len,
                        }),
                    }
                }
                Snapshot::Graph(_) => {
                    self.check_operands(kind, ops, 1)?;
                    if let Snapshot::Graph(g) = self {
                        let dist = step.value.unwrap_or(0);
                        g.discover(ops[0], ops.get(1).copied(), dist);
                    }
                    Ok(())
                }
            },
            StepKind::Done => {
                self.check_operands(kind, ops, 0)?;
                match self {
                    Snapshot::Array { .. } => {}
                    Snapshot::Search(s) => {
                        s.result = Some(ops.first().map(|&i| i as isize).unwrap_or(-1));
                    }
                    Snapshot::Graph(g) => g.path = ops.to_vec(),
                }
                Ok(())
            }
        }
    }
}

/// One atomic, observable transition inside a trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// 0-based ordinal position in the trace.
    pub index: usize,
    pub kind: StepKind,
    /// Positions or node ids involved, in a kind-specific order.
    pub operands: Vec<usize>,
    /// Written value, probed target, buffered key or assigned distance,
    /// depending on `kind` and container.
    pub value: Option<i64>,
    /// Short human-readable narration.
    pub note: String,
    /// Container state immediately after this step.
    pub snapshot: Snapshot,
}

/// Immutable ordered record of a single algorithm run.
///
/// Only [`StepRecorder::finalize`](crate::recorder::StepRecorder::finalize)
/// creates one; there is no way to append to or edit an existing trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trace {
    algorithm: &'static str,
    initial: Snapshot,
    steps: Vec<Step>,
}

impl Trace {
    pub(crate) fn new(algorithm: &'static str, initial: Snapshot, steps: Vec<Step>) -> Self {
        Self {
            algorithm,
            initial,
            steps,
        }
    }

    /// Id of the algorithm that produced this trace.
    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    /// Container state before the first step (cursor `-1`).
    pub fn initial_snapshot(&self) -> &Snapshot {
        &self.initial
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// The closing `Done` step.
    pub fn terminal(&self) -> Option<&Step> {
        self.steps.last().filter(|s| s.kind == StepKind::Done)
    }

    /// Snapshot displayed at `cursor`, where `-1` is the initial input.
    pub fn snapshot_at(&self, cursor: isize) -> &Snapshot {
        if cursor < 0 {
            return &self.initial;
        }
        self.steps
            .get(cursor as usize)
            .or_else(|| self.steps.last())
            .map(|s| &s.snapshot)
            .unwrap_or(&self.initial)
    }

    pub fn count(&self, kind: StepKind) -> usize {
        self.steps.iter().filter(|s| s.kind == kind).count()
    }
}

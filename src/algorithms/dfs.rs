//! Depth-first search with an explicit stack.
//!
//! The stack mirrors the recursive call stack: `Mark(v, u)` pushes `v`
//! when it is discovered from `u` (distance = depth in the DFS tree) and
//! `Visit(v)` pops it once all of its edges have been inspected. Neighbours
//! are explored in adjacency-list order.

use rand::Rng;

use super::graph;
use crate::engine::Tracer;
use crate::error::EngineError;
use crate::input::GraphInput;
use crate::step::{GraphState, NodeColor, Snapshot, StepKind};
use crate::traits::InstrumentedAlgorithm;

#[derive(Debug, Clone, Copy, Default)]
pub struct Dfs;

impl InstrumentedAlgorithm for Dfs {
    type Input = GraphInput;

    fn id(&self) -> &'static str {
        "dfs"
    }

    fn validate(&self, input: &Self::Input) -> Result<(), EngineError> {
        graph::validate(self.id(), input, true)
    }

    fn initial_snapshot(&self, input: &Self::Input) -> Snapshot {
        Snapshot::Graph(GraphState::new(input.node_count()))
    }

    fn execute(&self, input: Self::Input, tracer: &mut Tracer) -> Result<(), EngineError> {
        let GraphInput {
            adjacency,
            start,
            end,
        } = input;
        let mut state = GraphState::new(adjacency.len());
        // (node, index of the next edge to inspect)
        let mut stack: Vec<(usize, usize)> = Vec::new();

        state.discover(start, None, 0);
        stack.push((start, 0));
        tracer.emit(
            StepKind::Mark,
            vec![start],
            Some(0),
            format!("push start node {start}"),
            Snapshot::Graph(state.clone()),
        )?;

        while let Some(&(u, next)) = stack.last() {
            if next == adjacency[u].len() {
                stack.pop();
                state.settle(u);
                tracer.emit(
                    StepKind::Visit,
                    vec![u],
                    None,
                    format!("finish node {u}"),
                    Snapshot::Graph(state.clone()),
                )?;
                continue;
            }

            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }
            let v = adjacency[u][next].0;
            tracer.emit(
                StepKind::Compare,
                vec![u, v],
                None,
                format!("inspect edge {u} -> {v}"),
                Snapshot::Graph(state.clone()),
            )?;
            if state.colors[v] == NodeColor::Unseen {
                let depth = state.dist[u].unwrap_or(0) + 1;
                state.discover(v, Some(u), depth);
                stack.push((v, 0));
                tracer.emit(
                    StepKind::Mark,
                    vec![v, u],
                    Some(depth),
                    format!("push node {v} at depth {depth}"),
                    Snapshot::Graph(state.clone()),
                )?;
            }
        }

        let path = graph::path_to(&state, start, end);
        state.path = path.clone();
        let note = graph::done_note(&path, end);
        tracer.done(path, note, Snapshot::Graph(state))
    }

    fn generate<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Self::Input {
        graph::random_graph(size, 1, rng)
    }
}

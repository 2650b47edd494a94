//! Dijkstra's single-source shortest paths.
//!
//! Binary heap with lazy deletion. Among equal tentative distances the lower
//! node id is settled first, which keeps traces reproducible. `Mark(v, u)`
//! on every successful relaxation (insert or decrease-key), `Visit(u)` when
//! `u` is settled, `Compare(u, v)` for every edge examined from a settled
//! node. Stale heap entries are skipped silently.
//!
//! Negative edge weights are rejected up front.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rand::Rng;

use super::graph;
use crate::engine::Tracer;
use crate::error::EngineError;
use crate::input::GraphInput;
use crate::step::{GraphState, NodeColor, Snapshot, StepKind};
use crate::traits::InstrumentedAlgorithm;

#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl InstrumentedAlgorithm for Dijkstra {
    type Input = GraphInput;

    fn id(&self) -> &'static str {
        "dijkstra"
    }

    fn validate(&self, input: &Self::Input) -> Result<(), EngineError> {
        graph::validate(self.id(), input, false)
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
        let mut heap = BinaryHeap::new();

        state.discover(start, None, 0);
        heap.push(Reverse((0i64, start)));
        tracer.emit(
            StepKind::Mark,
            vec![start],
            Some(0),
            format!("source {start} at distance 0"),
            Snapshot::Graph(state.clone()),
        )?;

        while let Some(Reverse((du, u))) = heap.pop() {
            if state.colors[u] == NodeColor::Visited || state.dist[u] != Some(du) {
                continue;
            }
            state.settle(u);
            tracer.emit(
                StepKind::Visit,
                vec![u],
                None,
                format!("settle node {u} at distance {du}"),
                Snapshot::Graph(state.clone()),
            )?;

            for &(v, w) in &adjacency[u] {
                let candidate = du.saturating_add(w);
                tracer.emit(
                    StepKind::Compare,
                    vec![u, v],
                    Some(candidate),
                    format!("relax edge {u} -> {v} (weight {w})"),
                    Snapshot::Graph(state.clone()),
                )?;
                if state.colors[v] == NodeColor::Visited {
                    continue;
                }
                if state.dist[v].map_or(true, |dv| candidate < dv) {
                    state.discover(v, Some(u), candidate);
                    heap.push(Reverse((candidate, v)));
                    tracer.emit(
                        StepKind::Mark,
                        vec![v, u],
                        Some(candidate),
                        format!("distance of {v} lowered to {candidate}"),
                        Snapshot::Graph(state.clone()),
                    )?;
                }
            }
        }

        let path = graph::path_to(&state, start, end);
        state.path = path.clone();
        let note = match (end, path.is_empty()) {
            (Some(e), false) => format!(
                "{} (cost {})",
                graph::done_note(&path, end),
                state.dist[e].unwrap_or(0)
            ),
            _ => graph::done_note(&path, end),
        };
        tracer.done(path, note, Snapshot::Graph(state))
    }

    fn generate<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Self::Input {
        graph::random_graph(size, 9, rng)
    }
}

//! Breadth-first search.
//!
//! `Mark(v, u)` when `v` is enqueued from `u` (distance = hop count),
//! `Visit(u)` when `u` is dequeued, `Compare(u, v)` for every edge inspected.
//! Neighbours are explored in adjacency-list order.

use std::collections::VecDeque;

use rand::Rng;

use super::graph;
use crate::engine::Tracer;
use crate::error::EngineError;
use crate::input::GraphInput;
use crate::step::{GraphState, NodeColor, Snapshot, StepKind};
use crate::traits::InstrumentedAlgorithm;

#[derive(Debug, Clone, Copy, Default)]
pub struct Bfs;

impl InstrumentedAlgorithm for Bfs {
    type Input = GraphInput;

    fn id(&self) -> &'static str {
        "bfs"
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
        let mut queue = VecDeque::new();

        state.discover(start, None, 0);
        queue.push_back(start);
        tracer.emit(
            StepKind::Mark,
            vec![start],
            Some(0),
            format!("enqueue start node {start}"),
            Snapshot::Graph(state.clone()),
        )?;

        while let Some(u) = queue.pop_front() {
            state.settle(u);
            tracer.emit(
                StepKind::Visit,
                vec![u],
                None,
                format!("dequeue node {u}"),
                Snapshot::Graph(state.clone()),
            )?;
            let du = state.dist[u].unwrap_or(0);
            for &(v, _) in &adjacency[u] {
                tracer.emit(
                    StepKind::Compare,
                    vec![u, v],
                    None,
                    format!("inspect edge {u} -> {v}"),
                    Snapshot::Graph(state.clone()),
                )?;
                if state.colors[v] == NodeColor::Unseen {
                    state.discover(v, Some(u), du + 1);
                    queue.push_back(v);
                    tracer.emit(
                        StepKind::Mark,
                        vec![v, u],
                        Some(du + 1),
                        format!("enqueue node {v} at depth {}", du + 1),
                        Snapshot::Graph(state.clone()),
                    )?;
                }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TraceEngine;

    fn square() -> GraphInput {
        // 0 - 1
        // |   |
        // 2 - 3
        let mut g = GraphInput::undirected(4, &[(0, 1), (0, 2), (1, 3), (2, 3)], 0);
        g.end = Some(3);
        g
    }

    #[test]
    fn visits_in_level_order() {
        let trace = TraceEngine::new(Bfs).run(&square()).unwrap();
        let visits: Vec<usize> = trace
            .steps()
            .iter()
            .filter(|s| s.kind == StepKind::Visit)
            .map(|s| s.operands[0])
            .collect();
        assert_eq!(visits, vec![0, 1, 2, 3]);

        let done = trace.terminal().unwrap();
        assert_eq!(done.operands, vec![0, 1, 3]);
        let g = done.snapshot.as_graph().unwrap();
        assert_eq!(g.dist, vec![Some(0), Some(1), Some(1), Some(2)]);
        assert!(g.frontier.is_empty());
    }

    #[test]
    fn out_of_range_start_is_invalid() {
        let mut g = square();
        g.start = 9;
        let err = TraceEngine::new(Bfs).run(&g).unwrap_err();
        assert!(err.is_caller_correctable());
    }
}

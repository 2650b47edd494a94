//! Shared validation, generation and path helpers for the graph algorithms.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::EngineError;
use crate::input::GraphInput;
use crate::step::GraphState;

/// Check node ids (and, if requested, edge weights) against the graph size.
pub(crate) fn validate(
    algorithm: &'static str,
    graph: &GraphInput,
    allow_negative: bool,
) -> Result<(), EngineError> {
    let n = graph.node_count();
    if n == 0 {
        return Err(EngineError::invalid(algorithm, "graph has no nodes"));
    }
    if graph.start >= n {
        return Err(EngineError::invalid(
            algorithm,
            format!("start node {} is out of range 0..{n}", graph.start),
        ));
    }
    if let Some(end) = graph.end {
        if end >= n {
            return Err(EngineError::invalid(
                algorithm,
                format!("end node {end} is out of range 0..{n}"),
            ));
        }
    }
    for (u, edges) in graph.adjacency.iter().enumerate() {
        for &(v, w) in edges {
            if v >= n {
                return Err(EngineError::invalid(
                    algorithm,
                    format!("edge {u} -> {v} points outside 0..{n}"),
                ));
            }
            if !allow_negative && w < 0 {
                return Err(EngineError::invalid(
                    algorithm,
                    format!("edge {u} -> {v} has negative weight {w}"),
                ));
            }
        }
    }
    Ok(())
}

/// Random connected undirected graph: a shuffled spanning tree plus a few
/// extra edges. Start is node 0, end is the last node.
pub(crate) fn random_graph<R: Rng + ?Sized>(
    size: usize,
    max_weight: i64,
    rng: &mut R,
) -> GraphInput {
    let n = size.max(1);
    let mut adjacency: Vec<Vec<(usize, i64)>> = vec![Vec::new(); n];
    let mut order: Vec<usize> = (1..n).collect();
    order.shuffle(rng);

    let connect = |adjacency: &mut Vec<Vec<(usize, i64)>>, u: usize, v: usize, w: i64| {
        if u != v && !adjacency[u].iter().any(|&(x, _)| x == v) {
            adjacency[u].push((v, w));
            adjacency[v].push((u, w));
        }
    };

    let mut placed = vec![0usize];
    for v in order {
        let u = placed[rng.gen_range(0..placed.len())];
        let w = rng.gen_range(1..=max_weight);
        connect(&mut adjacency, u, v, w);
        placed.push(v);
    }
    for _ in 0..n / 2 {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        let w = rng.gen_range(1..=max_weight);
        connect(&mut adjacency, u, v, w);
    }
    for edges in &mut adjacency {
        edges.sort_unstable();
    }

    GraphInput::new(adjacency, 0, if n > 1 { Some(n - 1) } else { None })
}

/// Walk the parent tree back from `end`; empty if `end` was never reached.
pub(crate) fn path_to(state: &GraphState, start: usize, end: Option<usize>) -> Vec<usize> {
    let Some(end) = end else {
        return Vec::new();
    };
    if state.dist[end].is_none() {
        return Vec::new();
    }
    let mut path = vec![end];
    let mut node = end;
    while node != start {
        match state.parent[node] {
            Some(p) => {
                path.push(p);
                node = p;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

pub(crate) fn done_note(path: &[usize], end: Option<usize>) -> String {
    match (end, path.is_empty()) {
        (None, _) => "traversal complete".to_string(),
        (Some(end), true) => format!("node {end} is unreachable"),
        (Some(_), false) => format!(
            "path {}",
            path.iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(" -> ")
        ),
    }
}

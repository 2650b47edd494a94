use std::collections::{BTreeSet, VecDeque};

use algo_stepper::{
    algorithms::{bfs::Bfs, dfs::Dfs, dijkstra::Dijkstra},
    GraphInput, StepKind, Trace, TraceEngine,
};
use proptest::prelude::*;

fn graph() -> impl Strategy<Value = GraphInput> {
    (1usize..9).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n, 1i64..10), 0..(n * 3));
        (Just(n), edges, 0..n, 0..n).prop_map(|(n, edges, start, end)| {
            let mut adjacency = vec![Vec::new(); n];
            for (u, v, w) in edges {
                adjacency[u].push((v, w));
            }
            GraphInput::new(adjacency, start, Some(end))
        })
    })
}

fn reference_hops(g: &GraphInput) -> Vec<Option<i64>> {
    let mut dist = vec![None; g.node_count()];
    let mut queue = VecDeque::from([g.start]);
    dist[g.start] = Some(0);
    while let Some(u) = queue.pop_front() {
        for &(v, _) in &g.adjacency[u] {
            if dist[v].is_none() {
                dist[v] = Some(dist[u].unwrap_or(0) + 1);
                queue.push_back(v);
            }
        }
    }
    dist
}

fn reference_costs(g: &GraphInput) -> Vec<Option<i64>> {
    let n = g.node_count();
    let mut dist = vec![None; n];
    dist[g.start] = Some(0);
    for _ in 0..n {
        for u in 0..n {
            let Some(du) = dist[u] else { continue };
            for &(v, w) in &g.adjacency[u] {
                if dist[v].map_or(true, |dv| du + w < dv) {
                    dist[v] = Some(du + w);
                }
            }
        }
    }
    dist
}

fn final_dist(trace: &Trace) -> Vec<Option<i64>> {
    trace
        .terminal()
        .and_then(|d| d.snapshot.as_graph())
        .map(|g| g.dist.clone())
        .unwrap_or_default()
}

fn visits(trace: &Trace) -> Vec<usize> {
    trace
        .steps()
        .iter()
        .filter(|s| s.kind == StepKind::Visit)
        .map(|s| s.operands[0])
        .collect()
}

fn path_cost(g: &GraphInput, path: &[usize]) -> Option<i64> {
    path.windows(2).try_fold(0i64, |acc, w| {
        g.adjacency[w[0]]
            .iter()
            .filter(|&&(v, _)| v == w[1])
            .map(|&(_, c)| c)
            .min()
            .map(|c| acc + c)
    })
}

proptest! {
    #[test]
    fn bfs_matches_reference_hop_counts(g in graph()) {
        let trace = TraceEngine::new(Bfs).run(&g).unwrap();
        let expected = reference_hops(&g);
        prop_assert_eq!(final_dist(&trace), expected.clone());

        let reached: BTreeSet<usize> = (0..g.node_count()).filter(|&n| expected[n].is_some()).collect();
        let visited = visits(&trace);
        prop_assert_eq!(visited.len(), reached.len());
        prop_assert_eq!(visited.iter().copied().collect::<BTreeSet<_>>(), reached);
        // dequeue order never decreases in depth
        for w in visited.windows(2) {
            prop_assert!(expected[w[0]] <= expected[w[1]]);
        }
    }

    #[test]
    fn dijkstra_matches_reference_costs(g in graph()) {
        let trace = TraceEngine::new(Dijkstra).run(&g).unwrap();
        let expected = reference_costs(&g);
        prop_assert_eq!(final_dist(&trace), expected.clone());

        let done = trace.terminal().unwrap();
        let end = g.end.unwrap();
        if expected[end].is_some() {
            prop_assert_eq!(done.operands.first(), Some(&g.start));
            prop_assert_eq!(done.operands.last(), Some(&end));
            prop_assert_eq!(path_cost(&g, &done.operands), expected[end]);
        } else {
            prop_assert!(done.operands.is_empty());
        }
    }

    #[test]
    fn dfs_finishes_every_reachable_node_once(g in graph()) {
        let trace = TraceEngine::new(Dfs).run(&g).unwrap();
        let reached: BTreeSet<usize> = reference_hops(&g)
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_some())
            .map(|(n, _)| n)
            .collect();
        let visited = visits(&trace);
        prop_assert_eq!(visited.len(), reached.len());
        prop_assert_eq!(visited.last(), Some(&g.start));
        prop_assert_eq!(visited.into_iter().collect::<BTreeSet<_>>(), reached);
    }
}

#[test]
fn unreachable_end_yields_empty_path() {
    let g = GraphInput::new(vec![vec![(1, 1)], vec![], vec![]], 0, Some(2));
    for trace in [
        TraceEngine::new(Bfs).run(&g).unwrap(),
        TraceEngine::new(Dfs).run(&g).unwrap(),
        TraceEngine::new(Dijkstra).run(&g).unwrap(),
    ] {
        let done = trace.terminal().unwrap();
        assert!(done.operands.is_empty());
        assert!(done.note.contains("unreachable"));
    }
}

#[test]
fn dangling_edges_are_rejected() {
    let g = GraphInput::new(vec![vec![(4, 1)]], 0, None);
    let err = TraceEngine::new(Bfs).run(&g).unwrap_err();
    assert!(err.is_caller_correctable());
}

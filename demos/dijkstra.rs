//! Example: shortest paths with Dijkstra's algorithm.
//!
//! Run with:
//! `cargo run --example dijkstra`

use algo_stepper::{algorithms::dijkstra::Dijkstra, GraphInput, StepKind, TraceEngine};

fn main() {
    // 0 --4-- 1 --1-- 3
    //  \      |
    //   1     2
    //    \    |
    //     `-- 2
    let graph = GraphInput::new(
        vec![
            vec![(1, 4), (2, 1)],
            vec![(0, 4), (2, 2), (3, 1)],
            vec![(0, 1), (1, 2)],
            vec![(1, 1)],
        ],
        0,
        Some(3),
    );

    let trace = TraceEngine::new(Dijkstra).run(&graph).unwrap();
    for step in trace
        .steps()
        .iter()
        .filter(|s| matches!(s.kind, StepKind::Visit | StepKind::Mark))
    {
        println!("{:>3} {:<5} {}", step.index, step.kind.name(), step.note);
    }

    let done = trace.terminal().unwrap();
    let dist = &done.snapshot.as_graph().unwrap().dist;
    println!("distances: {dist:?}");
    println!("{}", done.note);
}

//! Example: trace bubble sort and print every step.
//!
//! Run with:
//! `cargo run --example bubble_sort`

use algo_stepper::{algorithms::bubble_sort::BubbleSort, StepKind, TraceEngine};

fn main() {
    let keys = vec![64, 34, 25, 12, 22, 11, 90];
    let trace = TraceEngine::new(BubbleSort).run(&keys).unwrap();

    println!("input: {keys:?}");
    for step in trace.steps() {
        let keys = step.snapshot.keys().unwrap_or(&[]);
        println!("{:>3} {:<8} {:<10} {:?}", step.index, step.kind.name(), format!("{:?}", step.operands), keys);
    }
    println!(
        "{} steps: {} compares, {} swaps",
        trace.len(),
        trace.count(StepKind::Compare),
        trace.count(StepKind::Swap)
    );
}

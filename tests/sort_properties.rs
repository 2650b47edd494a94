use algo_stepper::{
    algorithms::{
        bubble_sort::BubbleSort, insertion_sort::InsertionSort, merge_sort::MergeSort,
        quick_sort::QuickSort,
    },
    AlgorithmId, Input, InstrumentedAlgorithm, StepKind, Trace, TraceEngine,
};
use proptest::prelude::*;

fn sorted(keys: &[i64]) -> Vec<i64> {
    let mut out = keys.to_vec();
    out.sort();
    out
}

fn terminal_keys(trace: &Trace) -> Vec<i64> {
    trace
        .terminal()
        .and_then(|done| done.snapshot.keys())
        .map(<[i64]>::to_vec)
        .unwrap_or_default()
}

fn check<A>(alg: A, keys: &[i64]) -> Result<(), TestCaseError>
where
    A: InstrumentedAlgorithm<Input = Vec<i64>>,
{
    let trace = TraceEngine::new(alg).run(&keys.to_vec()).unwrap();
    prop_assert_eq!(terminal_keys(&trace), sorted(keys));
    prop_assert_eq!(trace.count(StepKind::Done), 1);
    for (i, step) in trace.steps().iter().enumerate() {
        prop_assert_eq!(step.index, i);
        for &op in &step.operands {
            prop_assert!(op < keys.len().max(1));
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn every_sort_ends_sorted(keys in prop::collection::vec(-50i64..50, 0..24)) {
        check(BubbleSort, &keys)?;
        check(InsertionSort, &keys)?;
        check(QuickSort, &keys)?;
        check(MergeSort, &keys)?;
    }

    #[test]
    fn caller_input_is_untouched(keys in prop::collection::vec(0i64..10, 0..16)) {
        let input = Input::keys(keys.clone());
        for alg in [AlgorithmId::BubbleSort, AlgorithmId::QuickSort, AlgorithmId::MergeSort] {
            let trace = alg.run(&input).unwrap();
            prop_assert_eq!(trace.initial_snapshot().keys(), Some(&keys[..]));
        }
        prop_assert_eq!(input, Input::keys(keys));
    }

    #[test]
    fn swap_sorts_only_swap_and_compare(keys in prop::collection::vec(-9i64..9, 1..16)) {
        for alg in [AlgorithmId::BubbleSort, AlgorithmId::InsertionSort, AlgorithmId::QuickSort] {
            let trace = alg.run(&Input::keys(keys.clone())).unwrap();
            prop_assert_eq!(trace.count(StepKind::Overwrite), 0);
            prop_assert_eq!(trace.count(StepKind::Visit), 0);
            prop_assert_eq!(trace.count(StepKind::Mark), 0);
        }
    }
}

#[test]
fn bubble_sort_reference_scenario() {
    let trace = TraceEngine::new(BubbleSort)
        .run(&vec![64, 34, 25, 12, 22, 11, 90])
        .unwrap();
    let first = &trace.steps()[0];
    assert_eq!(first.kind, StepKind::Compare);
    assert_eq!(first.operands, vec![0, 1]);

    let swap = trace
        .steps()
        .iter()
        .find(|s| s.kind == StepKind::Swap)
        .unwrap();
    assert_eq!(swap.operands, vec![0, 1]);
    assert_eq!(swap.snapshot.keys(), Some(&[34, 64, 25, 12, 22, 11, 90][..]));
    assert_eq!(terminal_keys(&trace), vec![11, 12, 22, 25, 34, 64, 90]);
}

#[test]
fn bubble_sort_on_sorted_input_is_one_pass() {
    let trace = TraceEngine::new(BubbleSort).run(&vec![1, 2, 3, 4]).unwrap();
    assert_eq!(trace.count(StepKind::Compare), 3);
    assert_eq!(trace.count(StepKind::Swap), 0);
}

#[test]
fn merge_sort_writes_through_overwrite() {
    let trace = TraceEngine::new(MergeSort).run(&vec![3, 1, 2]).unwrap();
    assert!(trace.count(StepKind::Overwrite) > 0);
    assert_eq!(trace.count(StepKind::Swap), 0);
    for step in trace.steps().iter().filter(|s| s.kind == StepKind::Overwrite) {
        let pos = step.operands[0];
        assert_eq!(step.snapshot.keys().unwrap()[pos], step.value.unwrap());
    }
}

#![cfg(feature = "parallel")]

use algo_stepper::{
    batch::{run_batch, BatchSummary},
    AlgorithmId, Input,
};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn inputs(alg: AlgorithmId, seed: u64, count: usize) -> Vec<Input> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|i| alg.generate(i % 17, &mut rng)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn batch_matches_sequential_runs(idx in 0usize..AlgorithmId::ALL.len(), seed in any::<u64>()) {
        let alg = AlgorithmId::ALL[idx];
        let inputs = inputs(alg, seed, 48);
        let parallel = run_batch(alg, &inputs);
        let sequential: Vec<_> = inputs.iter().map(|i| alg.run(i)).collect();
        prop_assert_eq!(parallel, sequential);
    }
}

#[test]
fn summary_counts_every_run() {
    let inputs = inputs(AlgorithmId::Dijkstra, 9, 64);
    let results = run_batch(AlgorithmId::Dijkstra, &inputs);
    let summary = BatchSummary::of(&results);
    assert_eq!(summary.runs, 64);
    assert_eq!(summary.failures, 0);
    assert!(summary.total_steps >= summary.max_steps);
}

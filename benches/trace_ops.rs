use criterion::{black_box, criterion_group, criterion_main, Criterion};
use algo_stepper::{
    adapter::{project, project_cursor},
    replay::{replay_to, verify_replay},
    AlgorithmId, ManualScheduler, PlaybackController,
};
use rand::{rngs::StdRng, SeedableRng};
use std::sync::Arc;

fn bench_projection(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5155AA55);
    let sort = Arc::new(AlgorithmId::QuickSort.run(&AlgorithmId::QuickSort.generate(256, &mut rng)).unwrap());
    let graph = Arc::new(AlgorithmId::Dijkstra.run(&AlgorithmId::Dijkstra.generate(128, &mut rng)).unwrap());

    let mut group = c.benchmark_group("projection");
    let sort_for_step = sort.clone();
    group.bench_function("array_step", move |b| {
        let mid = sort_for_step.len() / 2;
        let step = &sort_for_step.steps()[mid];
        let prior = sort_for_step.snapshot_at(mid as isize - 1);
        b.iter(|| black_box(project(black_box(step), prior)));
    });
    let graph_for_step = graph.clone();
    group.bench_function("graph_step", move |b| {
        let mid = graph_for_step.len() / 2;
        b.iter(|| black_box(project_cursor(&graph_for_step, black_box(mid as isize))));
    });
    group.finish();

    let mut group = c.benchmark_group("replay");
    let sort_for_replay = sort.clone();
    group.bench_function("replay_to_end_quick_sort_256", move |b| {
        b.iter(|| black_box(replay_to(&sort_for_replay, usize::MAX)));
    });
    group.bench_function("verify_dijkstra_128", move |b| {
        b.iter(|| black_box(verify_replay(&graph)));
    });
    group.finish();

    let mut group = c.benchmark_group("playback");
    group.bench_function("seek_sweep", move |b| {
        let mut controller = PlaybackController::new(ManualScheduler::new(), 50.0)
            .unwrap();
        controller.load(sort.clone());
        let len = sort.len() as isize;
        b.iter(|| {
            for i in (-1..len).step_by(7) {
                black_box(controller.seek(i));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_projection);
criterion_main!(benches);

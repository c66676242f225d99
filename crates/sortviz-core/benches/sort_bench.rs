//! Benchmarks for the sorting engines without step pacing.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sortviz_core::Algorithm;
use sortviz_core::rng::ShuffleRng;
use sortviz_core::step::CountingStepper;

fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("engines");
    for len in [70usize, 512] {
        let input = ShuffleRng::new(0xBA5E).values(len, 50, 450);
        for algo in Algorithm::ALL {
            group.bench_with_input(BenchmarkId::new(algo.short_name(), len), &input, |b, input| {
                b.iter(|| {
                    let mut work = input.clone();
                    let mut stepper = CountingStepper::new();
                    let _ = algo.run(work.as_mut_slice(), &mut stepper);
                    black_box(stepper.stats())
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_engines);
criterion_main!(benches);

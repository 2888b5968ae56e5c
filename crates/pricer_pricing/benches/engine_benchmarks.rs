//! Criterion benchmarks for pricer_pricing Monte Carlo pricing.
//!
//! Benchmarks cover:
//! - Normal variate generation (polar method vs Ziggurat reference)
//! - Path simulation with varying step counts
//! - European option pricing, sequential vs parallel

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::ScenarioParameters;
use pricer_pricing::mc::{
    simulate_paths, ExecutionMode, MonteCarloConfig, MonteCarloPricer,
};
use pricer_pricing::rng::{NormalVariateGenerator, PricerRng};
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

/// Benchmark normal generation (foundation for MC simulations).
fn bench_normal_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("normal_generation");

    for n_samples in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("polar", n_samples), &n_samples, |b, &n| {
            let mut normals = NormalVariateGenerator::new(PricerRng::from_seed(42));
            let mut buffer = vec![0.0; n];
            b.iter(|| {
                normals.fill_standard_normal(&mut buffer).unwrap();
                black_box(buffer.iter().sum::<f64>())
            });
        });

        // Both polar variates kept
        group.bench_with_input(
            BenchmarkId::new("polar_pairs", n_samples),
            &n_samples,
            |b, &n| {
                let mut normals = NormalVariateGenerator::new(PricerRng::from_seed(42));
                b.iter(|| {
                    let mut sum = 0.0;
                    for _ in 0..n / 2 {
                        let (x, y) = normals.next_pair().unwrap();
                        sum += x + y;
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("ziggurat", n_samples),
            &n_samples,
            |b, &n| {
                let mut rng = rand::rngs::StdRng::seed_from_u64(42);
                b.iter(|| {
                    let mut sum = 0.0;
                    for _ in 0..n {
                        let z: f64 = StandardNormal.sample(&mut rng);
                        sum += z;
                    }
                    black_box(sum)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark path simulation scaling with step count.
fn bench_path_steps_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_steps_scaling");
    group.sample_size(30);

    let scenario = ScenarioParameters::default();
    let n_runs = 10_000;

    for n_steps in [2, 12, 52, 252] {
        group.bench_with_input(BenchmarkId::new("steps", n_steps), &n_steps, |b, &steps| {
            b.iter(|| {
                let mut normals = NormalVariateGenerator::new(PricerRng::from_seed(42));
                let batch = simulate_paths(n_runs, steps, &scenario, &mut normals).unwrap();
                black_box(batch.terminal_price(0))
            });
        });
    }

    group.finish();
}

/// Benchmark end-to-end pricing, sequential vs parallel.
fn bench_mc_pricing(c: &mut Criterion) {
    let mut group = c.benchmark_group("mc_pricing");
    group.sample_size(20);

    let scenario = ScenarioParameters::default();
    let n_steps = 100;

    for n_simulations in [10_000, 100_000] {
        for (label, execution) in [
            ("sequential", ExecutionMode::Sequential),
            ("parallel", ExecutionMode::Parallel),
        ] {
            let config = MonteCarloConfig::builder()
                .n_simulations(n_simulations)
                .n_steps(n_steps)
                .seed(42)
                .execution(execution)
                .build()
                .unwrap();
            let pricer = MonteCarloPricer::new(config).unwrap();

            group.bench_with_input(
                BenchmarkId::new(label, n_simulations),
                &n_simulations,
                |b, _| b.iter(|| black_box(pricer.price(&scenario).unwrap().price)),
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_normal_generation,
    bench_path_steps_scaling,
    bench_mc_pricing,
);

criterion_main!(benches);

//! Criterion micro-benchmarks for whole solver steps.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kiln_bench::{reference_profile, stress_profile};
use kiln_core::Vec3;
use kiln_solver::{HeatSolver, InitialCondition, SolverConfig};

/// Benchmark: one explicit step on the 10K-cell reference profile.
fn bench_step_reference_10k(c: &mut Criterion) {
    let mut solver = HeatSolver::new(reference_profile(42)).unwrap();

    c.bench_function("step_reference_10k", |b| {
        b.iter(|| {
            let report = solver.step().unwrap();
            black_box(report);
        });
    });
}

/// Benchmark: one explicit step on the ~100K-cell stress profile.
fn bench_step_stress_100k(c: &mut Criterion) {
    let mut solver = HeatSolver::new(stress_profile(42)).unwrap();

    c.bench_function("step_stress_100k", |b| {
        b.iter(|| {
            let report = solver.step().unwrap();
            black_box(report);
        });
    });
}

/// Benchmark: one step on 10K three-component cells, triple the arithmetic.
fn bench_step_vec3_10k(c: &mut Criterion) {
    let mut config = SolverConfig::new(100, 100, 1.0, 1.0, 0.1);
    config.initial = InitialCondition::<Vec3>::Noise {
        mean: 0.5,
        amplitude: 0.5,
        seed: 42,
    };
    let mut solver = HeatSolver::new(config).unwrap();

    c.bench_function("step_vec3_10k", |b| {
        b.iter(|| {
            let report = solver.step().unwrap();
            black_box(report);
        });
    });
}

/// Benchmark: detaching an owned snapshot of a 10K-cell field.
fn bench_snapshot_to_owned_10k(c: &mut Criterion) {
    let solver = HeatSolver::new(reference_profile(42)).unwrap();

    c.bench_function("snapshot_to_owned_10k", |b| {
        b.iter(|| {
            let owned = solver.snapshot().to_owned();
            black_box(owned);
        });
    });
}

criterion_group!(
    benches,
    bench_step_reference_10k,
    bench_step_stress_100k,
    bench_step_vec3_10k,
    bench_snapshot_to_owned_10k
);
criterion_main!(benches);

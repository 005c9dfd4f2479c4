//! Criterion micro-benchmarks for finite-difference sweeps.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kiln_grid::Grid;
use kiln_stencil::{BoundaryRule, DifferenceOperator};

fn wavy(nx: usize, ny: usize) -> Grid<f64> {
    Grid::from_fn(nx, ny, |i, j| {
        (i as f64 * 0.1).sin() + (j as f64 * 0.1).cos()
    })
    .unwrap()
}

/// Benchmark: allocating Laplacian of a 10K-cell grid, zeroed ring.
fn bench_laplacian_copy_through_10k(c: &mut Criterion) {
    let g = wavy(100, 100);
    let op = DifferenceOperator::new(BoundaryRule::CopyThrough);

    c.bench_function("laplacian_copy_through_10k", |b| {
        b.iter(|| {
            let lap = op.laplacian(&g, 1.0, 1.0).unwrap();
            black_box(lap);
        });
    });
}

/// Benchmark: allocating Laplacian of a 10K-cell grid, one-sided ring.
fn bench_laplacian_one_sided_10k(c: &mut Criterion) {
    let g = wavy(100, 100);
    let op = DifferenceOperator::new(BoundaryRule::OneSided);

    c.bench_function("laplacian_one_sided_10k", |b| {
        b.iter(|| {
            let lap = op.laplacian(&g, 1.0, 1.0).unwrap();
            black_box(lap);
        });
    });
}

/// Benchmark: Laplacian into a reused buffer, the solver's inner loop.
fn bench_laplacian_into_reused_10k(c: &mut Criterion) {
    let g = wavy(100, 100);
    let mut out = Grid::new(100, 100).unwrap();
    let op = DifferenceOperator::default();

    c.bench_function("laplacian_into_reused_10k", |b| {
        b.iter(|| {
            op.laplacian_into(&g, &mut out, 1.0, 1.0).unwrap();
            black_box(&out);
        });
    });
}

/// Benchmark: centered first derivative along x over 10K cells.
fn bench_first_derivative_x_10k(c: &mut Criterion) {
    let g = wavy(100, 100);
    let op = DifferenceOperator::default();

    c.bench_function("first_derivative_x_10k", |b| {
        b.iter(|| {
            let ddx = op.first_derivative_x(&g, 1.0).unwrap();
            black_box(ddx);
        });
    });
}

criterion_group!(
    benches,
    bench_laplacian_copy_through_10k,
    bench_laplacian_one_sided_10k,
    bench_laplacian_into_reused_10k,
    bench_first_derivative_x_10k
);
criterion_main!(benches);

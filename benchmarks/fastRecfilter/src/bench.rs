//! Recursive filter benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Scalability (grid size)
//! - Algorithm parameters (iterations, edge width)
//! - Ensemble stacks (many slices per field)
//! - Masked and sparse fields
//!
//! For serial execution, use `FASTRECFILTER_MODE=serial cargo bench`.
//! For parallel execution, use `FASTRECFILTER_MODE=parallel cargo bench`.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fastRecfilter::prelude::*;
use ndarray::{Array, Array2, IxDyn};
use rand::prelude::*;
use rand_distr::{Normal, Uniform};
use std::env;
use std::hint::black_box;

// ============================================================================
// Helper Functions
// ============================================================================

fn get_config() -> (bool, &'static str) {
    match env::var("FASTRECFILTER_MODE").ok().as_deref() {
        Some("serial") => (false, "serial"),
        _ => (true, "parallel"),
    }
}

fn grid_points(n: usize) -> Vec<f64> {
    (0..n).map(|i| 2000.0 * i as f64).collect()
}

fn coefficients(
    ny: usize,
    nx: usize,
    value: f64,
) -> (SmoothingCoefficients<f64>, SmoothingCoefficients<f64>) {
    let (y, x) = (grid_points(ny), grid_points(nx));
    (
        SmoothingCoefficients::uniform(AxisRole::X, value, &y, &x),
        SmoothingCoefficients::uniform(AxisRole::Y, value, &y, &x),
    )
}

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Generate a (realization, y, x) stack of noisy probabilities.
fn generate_ensemble(n_real: usize, ny: usize, nx: usize, seed: u64) -> Field<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise_dist = Normal::new(0.0, 0.15).unwrap();

    let data = Array::from_shape_fn(IxDyn(&[n_real, ny, nx]), |ix| {
        let base = 0.5 + 0.4 * ((ix[1] as f64 / 8.0).sin() * (ix[2] as f64 / 11.0).cos());
        (base + noise_dist.sample(&mut rng)).clamp(0.0, 1.0)
    });
    Field::new(
        "probability_of_precipitation",
        data,
        vec![
            DimCoord::new("realization", (0..n_real).map(|r| r as f64).collect()),
            DimCoord::y("projection_y_coordinate", grid_points(ny)),
            DimCoord::x("projection_x_coordinate", grid_points(nx)),
        ],
    )
    .unwrap()
}

/// Generate a sparse field (rain in isolated cells, zero elsewhere).
fn generate_sparse_field(size: usize, seed: u64) -> Field<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = Array2::zeros((size, size));
    for _ in 0..size {
        let i = rng.random_range(0..size);
        let j = rng.random_range(0..size);
        data[[i, j]] = 1.0;
    }
    Field::from_grid("probability_of_precipitation", data, grid_points(size), grid_points(size))
        .unwrap()
}

/// Generate a land mask with roughly `fraction` of cells masked out.
fn generate_mask(size: usize, fraction: f64, seed: u64) -> Field<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Uniform::new(0.0, 1.0).unwrap();
    let data = Array2::from_shape_fn((size, size), |_| {
        if dist.sample(&mut rng) < fraction {
            0.0
        } else {
            1.0
        }
    });
    Field::from_grid("land_binary_mask", data, grid_points(size), grid_points(size)).unwrap()
}

// ============================================================================
// Benchmark Functions
// ============================================================================

fn bench_scalability(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("scalability_{}", mode_name));
    group.sample_size(30);

    for size in [64, 128, 256, 512] {
        group.throughput(Throughput::Elements((size * size) as u64));

        let field = generate_ensemble(1, size, size, 42);
        let (cx, cy) = coefficients(size, size, 0.4);

        group.bench_with_input(BenchmarkId::new("batch", size), &size, |b, _| {
            b.iter(|| {
                RecursiveFilter::new()
                    .iterations(2)
                    .edge_width(15)
                    .adapter(Batch)
                    .parallel(use_parallel)
                    .build()
                    .unwrap()
                    .process(black_box(&field), &cx, &cy, None)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_iterations(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("iterations_{}", mode_name));
    group.sample_size(50);

    let size = 200;
    let field = generate_ensemble(1, size, size, 42);
    let (cx, cy) = coefficients(size, size, 0.4);

    for iter in [1, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::new("batch", iter), &iter, |b, &iter| {
            b.iter(|| {
                RecursiveFilter::new()
                    .iterations(iter)
                    .edge_width(15)
                    .adapter(Batch)
                    .parallel(use_parallel)
                    .build()
                    .unwrap()
                    .process(black_box(&field), &cx, &cy, None)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_edge_width(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("edge_width_{}", mode_name));
    group.sample_size(50);

    let size = 200;
    let field = generate_ensemble(1, size, size, 42);
    let (cx, cy) = coefficients(size, size, 0.4);

    for width in [1, 5, 15, 30] {
        group.bench_with_input(BenchmarkId::new("batch", width), &width, |b, &width| {
            b.iter(|| {
                RecursiveFilter::new()
                    .iterations(1)
                    .edge_width(width)
                    .adapter(Batch)
                    .parallel(use_parallel)
                    .build()
                    .unwrap()
                    .process(black_box(&field), &cx, &cy, None)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_ensemble(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("ensemble_{}", mode_name));
    group.sample_size(20);

    let size = 128;
    let (cx, cy) = coefficients(size, size, 0.4);

    for members in [4, 12, 24, 48] {
        let field = generate_ensemble(members, size, size, 42);
        group.throughput(Throughput::Elements((members * size * size) as u64));

        group.bench_with_input(BenchmarkId::new("realizations", members), &members, |b, _| {
            b.iter(|| {
                RecursiveFilter::new()
                    .iterations(2)
                    .edge_width(15)
                    .adapter(Batch)
                    .parallel(use_parallel)
                    .build()
                    .unwrap()
                    .process(black_box(&field), &cx, &cy, None)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_masked(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("masked_{}", mode_name));
    group.sample_size(30);

    let size = 256;
    let (cx, cy) = coefficients(size, size, 0.4);

    // Land-sea mask with re-masking
    let field = generate_ensemble(1, size, size, 42);
    let mask = generate_mask(size, 0.3, 7);
    group.bench_function("land_mask_re_mask", |b| {
        b.iter(|| {
            RecursiveFilter::new()
                .iterations(2)
                .edge_width(15)
                .re_mask(true)
                .adapter(Batch)
                .parallel(use_parallel)
                .build()
                .unwrap()
                .process(black_box(&field), &cx, &cy, Some(&mask))
                .unwrap()
        })
    });

    // Isolated precipitation cells
    let sparse = generate_sparse_field(size, 42);
    group.bench_function("sparse", |b| {
        b.iter(|| {
            RecursiveFilter::new()
                .iterations(2)
                .edge_width(15)
                .adapter(Batch)
                .parallel(use_parallel)
                .build()
                .unwrap()
                .process(black_box(&sparse), &cx, &cy, None)
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_scalability,
    bench_iterations,
    bench_edge_width,
    bench_ensemble,
    bench_masked,
);
criterion_main!(benches);

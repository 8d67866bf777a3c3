/*
 * Particle Field Benchmark
 *
 * Measures the per-frame cost of the field: the O(n) simulation step, the
 * O(n^2) connection pass, and a full step-plus-render frame.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nannou::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::time::Duration;

use neural_field::renderer::render_frame;
use neural_field::{FieldParams, ParticleField, RecordingSurface, Theme, Viewport};

const VIEWPORT: Viewport = Viewport {
    width: 1920.0,
    height: 1080.0,
};

fn field_with(n: usize) -> (ParticleField, FieldParams) {
    let params = FieldParams {
        particle_count: n,
        ..FieldParams::default()
    };
    let mut rng = Pcg64::seed_from_u64(0xf1e1d);
    (ParticleField::new(&mut rng, VIEWPORT, &params), params)
}

// Benchmark the kinematics update
fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for n in [70usize, 200, 400].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, &n| {
            let (mut field, params) = field_with(n);
            let pointer = vec2(960.0, 540.0);
            b.iter(|| field.step(black_box(pointer), &params, 1.0));
        });
    }

    group.finish();
}

// Benchmark the pairwise connection pass
fn bench_edges(c: &mut Criterion) {
    let mut group = c.benchmark_group("edges");

    for n in [70usize, 200, 400].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, &n| {
            let (field, params) = field_with(n);
            b.iter(|| black_box(field.edges(params.connection_distance).count()));
        });
    }

    group.finish();
}

// Benchmark a whole frame into a recording surface
fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");

    for n in [70usize, 200, 400].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, &n| {
            let (mut field, params) = field_with(n);
            let mut surface = RecordingSurface::new();
            let palette = Theme::Dark.palette();
            b.iter(|| {
                surface.reset();
                field.step(vec2(-1000.0, -1000.0), &params, 1.0);
                black_box(render_frame(Some(&mut surface), &field, palette, &params))
            });
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_step, bench_edges, bench_frame
}

criterion_main!(benches);

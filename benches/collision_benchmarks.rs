//! Benchmarks for the collision scan and the bare predicate.
//!
//! Run with: cargo bench
//!
//! To compare against baseline:
//! 1. First run: cargo bench -- --save-baseline main
//! 2. After changes: cargo bench -- --baseline main

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use nalgebra::{Point3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tri_collide::{Triangle, find_intersecting_triangles, intersects};

fn ball_offset<R: Rng>(rng: &mut R, radius: f64) -> Vector3<f64> {
    loop {
        let v = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if v.norm_squared() <= 1.0 {
            return v * radius;
        }
    }
}

fn cluster_scene(count: usize, cluster_radius: f64) -> Vec<Triangle> {
    let mut rng = ChaCha8Rng::seed_from_u64(0xbe9c_0000 + count as u64);
    (0..count)
        .map(|_| {
            let center = Point3::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            );
            Triangle::new(
                center + ball_offset(&mut rng, cluster_radius),
                center + ball_offset(&mut rng, cluster_radius),
                center + ball_offset(&mut rng, cluster_radius),
            )
        })
        .collect()
}

fn bench_collision_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_intersecting_triangles");
    for &size in &[100usize, 1_000, 10_000] {
        let scene = cluster_scene(size, 1.0);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &scene, |b, scene| {
            b.iter(|| find_intersecting_triangles(black_box(scene)));
        });
    }
    group.finish();
}

fn bench_predicate(c: &mut Criterion) {
    let crossing = (
        Triangle::new(
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ),
        Triangle::new(
            Point3::new(-1.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, -1.0),
            Point3::new(0.0, 0.0, 1.0),
        ),
    );
    let separated = (
        crossing.0,
        crossing.1.translated(Vector3::new(0.0, 10.0, 0.0)),
    );
    let coplanar = (
        crossing.0,
        crossing.0.translated(Vector3::new(0.5, 0.0, 0.0)),
    );

    let mut group = c.benchmark_group("intersects");
    group.bench_function("crossing", |b| {
        b.iter(|| intersects(black_box(&crossing.0), black_box(&crossing.1)));
    });
    group.bench_function("separated", |b| {
        b.iter(|| intersects(black_box(&separated.0), black_box(&separated.1)));
    });
    group.bench_function("coplanar_overlap", |b| {
        b.iter(|| intersects(black_box(&coplanar.0), black_box(&coplanar.1)));
    });
    group.finish();
}

criterion_group!(benches, bench_collision_scan, bench_predicate);
criterion_main!(benches);

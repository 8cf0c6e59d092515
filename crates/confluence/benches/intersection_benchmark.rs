//! # Intersection Benchmark
//!
//! Measures entity queries over sorted component sets:
//! - Balanced: three sets of similar size, half overlap
//! - Skewed: one huge set against a tiny one (linear in the huge set)
//! - Point lookups: O(k log n) finds
//!
//! Run with: `cargo bench --package confluence`

// Benchmarks don't need docs and fixture fields are only written
#![allow(missing_docs)]
#![allow(dead_code)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use confluence::{entities, entities_begin, ComponentSet, ElementId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy)]
struct Position {
    id: u32,
    x: f32,
}

#[derive(Debug, Clone, Copy)]
struct Velocity {
    id: u32,
    dx: f32,
}

#[derive(Debug, Clone, Copy)]
struct Health {
    id: u32,
    hp: u32,
}

impl ElementId for Position {
    type Id = u32;
    fn element_id(&self) -> u32 {
        self.id
    }
}

impl ElementId for Velocity {
    type Id = u32;
    fn element_id(&self) -> u32 {
        self.id
    }
}

impl ElementId for Health {
    type Id = u32;
    fn element_id(&self) -> u32 {
        self.id
    }
}

fn sampled(rng: &mut StdRng, universe: u32, density: f64) -> Vec<u32> {
    (0..universe).filter(|_| rng.gen_bool(density)).collect()
}

fn positions(ids: &[u32]) -> ComponentSet<Position> {
    ids.iter().map(|&id| Position { id, x: 0.0 }).collect()
}

fn velocities(ids: &[u32]) -> ComponentSet<Velocity> {
    ids.iter().map(|&id| Velocity { id, dx: 1.0 }).collect()
}

fn healths(ids: &[u32]) -> ComponentSet<Health> {
    ids.iter().map(|&id| Health { id, hp: 100 }).collect()
}

/// Benchmark: integrate positions over two and three half-overlapping sets.
fn bench_balanced(c: &mut Criterion) {
    let mut group = c.benchmark_group("balanced");
    let mut rng = StdRng::seed_from_u64(1);

    for size in [10_000u32, 100_000, 1_000_000] {
        let mut pos = positions(&sampled(&mut rng, size, 0.5));
        let vel = velocities(&sampled(&mut rng, size, 0.5));
        let hp = healths(&sampled(&mut rng, size, 0.5));

        group.bench_with_input(BenchmarkId::new("two_sets", size), &size, |b, _| {
            b.iter(|| {
                for mut e in entities((&mut pos, &vel)) {
                    let dx = e.get::<Velocity, _>().dx;
                    e.get_mut::<Position, _>().x += dx;
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("three_sets", size), &size, |b, _| {
            b.iter(|| {
                entities_begin((&pos, &vel, &hp))
                    .map(|e| e.get::<Health, _>().hp)
                    .sum::<u32>()
            });
        });
    }

    group.finish();
}

/// Benchmark: a dense set against a single-entity set.
fn bench_skewed(c: &mut Criterion) {
    let mut group = c.benchmark_group("skewed");

    for size in [10_000u32, 1_000_000] {
        let all: Vec<u32> = (0..size).collect();
        let pos = positions(&all);
        let vel = velocities(&[size / 2]);

        group.bench_with_input(BenchmarkId::new("dense_first", size), &size, |b, _| {
            b.iter(|| black_box(entities_begin((&pos, &vel)).count()));
        });

        group.bench_with_input(BenchmarkId::new("sparse_first", size), &size, |b, _| {
            b.iter(|| black_box(entities_begin((&vel, &pos)).count()));
        });
    }

    group.finish();
}

/// Benchmark: 10K point lookups across three sets.
fn bench_find(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let size = 1_000_000u32;
    let pos = positions(&sampled(&mut rng, size, 0.8));
    let vel = velocities(&sampled(&mut rng, size, 0.8));
    let hp = healths(&sampled(&mut rng, size, 0.8));
    let probes: Vec<u32> = (0..10_000).map(|_| rng.gen_range(0..size)).collect();

    c.bench_function("find_10K_three_sets", |b| {
        let mut union = entities((&pos, &vel, &hp));
        b.iter(|| {
            let mut hits = 0usize;
            for &id in &probes {
                if union.contains(black_box(id)) {
                    hits += 1;
                }
            }
            hits
        });
    });
}

criterion_group!(benches, bench_balanced, bench_skewed, bench_find);
criterion_main!(benches);

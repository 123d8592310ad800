//! Criterion benchmarks for the whole network.
//!
//! Benchmarks:
//!   - building the default layout from its config
//!   - one fixed tick of every train on the default layout
//!
//! Run with: cargo bench -p simulation --bench network_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use simulation::config::FIXED_HZ;
use simulation::crossing::CrossingBarrier;
use simulation::network::RailNetwork;
use simulation::network_config::NetworkConfig;
use simulation::train_motion::TickContext;

// ---------------------------------------------------------------------------
// Benchmark: build
// ---------------------------------------------------------------------------

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("network_build");
    group.sample_size(10);
    let config = NetworkConfig::default();

    group.bench_function("default_layout", |b| {
        b.iter(|| black_box(RailNetwork::build(black_box(&config))));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: tick
// ---------------------------------------------------------------------------

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("network_tick");
    let config = NetworkConfig::default();
    let RailNetwork {
        routes,
        mut trains,
        mut doors,
        ..
    } = RailNetwork::build(&config);
    let mut barrier = CrossingBarrier::new(config.crossing_permutation.clone());
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let dt = (1.0 / FIXED_HZ) as f32;

    group.bench_function("all_trains", |b| {
        b.iter(|| {
            let mut ctx = TickContext {
                doors: &mut doors,
                barrier: &mut barrier,
                rng: &mut rng,
                ambient: true,
                dt,
            };
            for train in &mut trains {
                if let Some(route) = routes.get(train.route) {
                    black_box(train.tick(route, &mut ctx));
                }
            }
            for door_group in &mut ctx.doors.groups {
                door_group.advance(dt);
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_tick);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use highway_watch::geo::haversine_km;
use highway_watch::simulation::engine::SimulationEngine;
use highway_watch::simulation::route::{RouteConfig, BANGALORE, MYSORE};

fn bench_haversine(c: &mut Criterion) {
    c.bench_function("haversine_km", |b| {
        b.iter(|| haversine_km(black_box(BANGALORE), black_box(MYSORE)))
    });
}

fn bench_step(c: &mut Criterion) {
    let config = RouteConfig {
        seed: Some(1),
        ..Default::default()
    };
    let mut engine = SimulationEngine::new(&config);
    c.bench_function("engine_step", |b| b.iter(|| black_box(engine.step())));
}

criterion_group!(benches, bench_haversine, bench_step);
criterion_main!(benches);

//! Benchmarks for the per-tick cost of the two rule families: pure rules
//! on the parallel path and agent rules on the sequential path.

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cellarium::config::SimulationSpec;
use cellarium::geometry::CellShape;
use cellarium::grid::Topology;
use cellarium::neighborhood::Neighborhood;
use cellarium::rules::RuleKind;
use cellarium::simulation::Simulation;

fn params(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

fn life_sim(side: usize) -> Simulation {
    let states = (0..side * side)
        .map(|i| (i.wrapping_mul(2654435761) % 3 == 0) as i32)
        .collect();
    let spec = SimulationSpec {
        width: side,
        height: side,
        topology: Topology::Wrapped,
        shape: CellShape::Square,
        neighborhood: Neighborhood::Adjacent,
        rule: RuleKind::GameOfLife,
        parameters: params(&[
            ("aliveToAliveMin", 2.0),
            ("aliveToAliveMax", 3.0),
            ("deadToAliveMin", 3.0),
            ("deadToAliveMax", 3.0),
        ]),
        initial_states: states,
        seed: 42,
    };
    Simulation::new(&spec).expect("bench spec is valid")
}

fn wator_sim(side: usize) -> Simulation {
    let states = (0..side * side)
        .map(|i| match i.wrapping_mul(2654435761) % 10 {
            0 | 1 | 2 => 1,
            3 => 2,
            _ => 0,
        })
        .collect();
    let spec = SimulationSpec {
        width: side,
        height: side,
        topology: Topology::Wrapped,
        shape: CellShape::Square,
        neighborhood: Neighborhood::Adjacent,
        rule: RuleKind::Wator,
        parameters: params(&[
            ("fishAgeOfReproduction", 4.0),
            ("sharkAgeOfReproduction", 12.0),
            ("initialEnergy", 5.0),
            ("energyBoost", 3.0),
        ]),
        initial_states: states,
        seed: 42,
    };
    Simulation::new(&spec).expect("bench spec is valid")
}

fn bench_life(c: &mut Criterion) {
    c.bench_function("life_tick_128x128", |b| {
        let mut sim = life_sim(128);
        b.iter(|| {
            sim.tick().expect("tick succeeds");
            black_box(sim.ticks())
        })
    });

    c.bench_function("life_tick_16x16", |b| {
        let mut sim = life_sim(16);
        b.iter(|| {
            sim.tick().expect("tick succeeds");
            black_box(sim.ticks())
        })
    });
}

fn bench_wator(c: &mut Criterion) {
    c.bench_function("wator_tick_64x64", |b| {
        let mut sim = wator_sim(64);
        b.iter(|| {
            sim.tick().expect("tick succeeds");
            black_box(sim.ticks())
        })
    });
}

criterion_group!(benches, bench_life, bench_wator);
criterion_main!(benches);

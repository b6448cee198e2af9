use criterion::{black_box, criterion_group, criterion_main, Criterion};

use caravel::agents::{Agent, CaravelConfig, StatusStore};
use caravel::env::{Command, Constants, PlayerId};
use caravel::simulate::Simulation;

/// Plays the early game to get a map with a decent fleet.
fn midgame(width: usize, height: usize, turns: usize) -> Simulation {
    let constants = Constants {
        max_turns: 400,
        ..Constants::default()
    };
    let agent = Agent::Caravel(CaravelConfig::default());
    let mut statuses = StatusStore::new();
    let mut sim = Simulation::new(width, height, 1, constants, 42);
    for _ in 0..turns {
        let commands = agent.step(&sim.snapshot(PlayerId(0)), &mut statuses);
        sim.step(&[commands]);
    }
    sim
}

fn caravel_step(c: &mut Criterion) {
    let sim = midgame(64, 64, 150);
    let snapshot = sim.snapshot(PlayerId(0));
    let config = CaravelConfig::default();

    c.bench_function("caravel_step", |b| {
        b.iter(|| {
            let mut statuses = StatusStore::new();
            config.step(black_box(&snapshot), &mut statuses)
        })
    });
}

fn simulation_step(c: &mut Criterion) {
    let sim = midgame(32, 32, 100);
    let agent = Agent::Caravel(CaravelConfig::default());

    c.bench_function("simulation_step", |b| {
        b.iter(|| {
            let mut sim = sim.clone();
            let mut statuses = StatusStore::new();
            for _ in 0..10 {
                let commands: Vec<Command> = agent.step(&sim.snapshot(PlayerId(0)), &mut statuses);
                sim.step(black_box(&[commands]));
            }
        })
    });
}

criterion_group!(benches, caravel_step, simulation_step);
criterion_main!(benches);

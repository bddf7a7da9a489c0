use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hedging_engine::core::lever::{Direction, LeverId};
use hedging_engine::core::strategy::Strategy;
use hedging_engine::engine::ScenarioEngine;
use hedging_engine::simulation::stress::{run_stress, StressConfig};
use rust_decimal_macros::dec;

fn configured_engine() -> ScenarioEngine {
    let mut engine = ScenarioEngine::new();
    engine.set_value(LeverId::Premium, dec!(1.00)).unwrap();
    engine.set_scenario(LeverId::BasePrice, Direction::Up, dec!(12.0));
    engine.set_scenario(LeverId::ExchangeRate, Direction::Up, dec!(8.0));
    engine
}

fn bench_single_evaluation(c: &mut Criterion) {
    c.bench_function("evaluate_no_lock", |b| {
        b.iter(|| {
            let mut engine = configured_engine();
            engine.evaluate(black_box(Strategy::NoLock)).unwrap()
        })
    });
}

fn bench_compare_all(c: &mut Criterion) {
    c.bench_function("compare_all_strategies", |b| {
        b.iter(|| {
            let mut engine = configured_engine();
            engine.compare(black_box(&Strategy::ALL)).unwrap()
        })
    });
}

fn bench_stress_100_runs(c: &mut Criterion) {
    let engine = configured_engine();
    let config = StressConfig {
        runs: 100,
        ..Default::default()
    };
    c.bench_function("stress_100_runs", |b| {
        b.iter(|| run_stress(black_box(&engine), &config, &Strategy::ALL).unwrap())
    });
}

criterion_group!(
    benches,
    bench_single_evaluation,
    bench_compare_all,
    bench_stress_100_runs
);
criterion_main!(benches);

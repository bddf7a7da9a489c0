use approx::assert_relative_eq;
use hedging_engine::core::lever::{Direction, LeverId};
use hedging_engine::core::strategy::Strategy;
use hedging_engine::engine::{best_by_domestic, ScenarioEngine};
use hedging_engine::simulation::stress::{run_stress, StressConfig};
use hedging_engine::simulation::sweep::magnitude_sweep;
use hedging_engine::snapshot::Snapshot;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::PathBuf;

/// The reference configuration: premium 1.00 flat, base price 15.00 up
/// 12%, exchange rate 5.20 up 8%.
fn reference_engine() -> ScenarioEngine {
    let mut engine = ScenarioEngine::new();
    engine.set_value(LeverId::Premium, dec!(1.00)).unwrap();
    engine.set_scenario(LeverId::BasePrice, Direction::Up, dec!(12.0));
    engine.set_scenario(LeverId::ExchangeRate, Direction::Up, dec!(8.0));
    engine
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("hedging-engine-{}-{}.json", name, std::process::id()))
}

/// Full pipeline: configure → evaluate every strategy → inspect prices,
/// exposure, and history.
#[test]
fn full_pipeline_reference_scenario() {
    let mut engine = reference_engine();

    // Scenario projection: 1.00 + 16.80 = 17.80 foreign, × 5.616 domestic.
    let scenario = engine.scenario_price();
    assert_eq!(scenario.foreign, dec!(17.80));
    assert_eq!(scenario.domestic, dec!(99.9648));
    let reference = engine.reference_price();
    assert_eq!(reference.domestic, dec!(83.20));

    let results = engine.compare(&Strategy::ALL).unwrap();
    assert_eq!(results.len(), 5);

    let no_lock = &results[0];
    assert_eq!(no_lock.final_price().domestic, dec!(99.9648));
    assert_relative_eq!(no_lock.variation_percent(), 20.15, max_relative = 1e-9);

    let lock_rate = &results[1];
    assert_eq!(lock_rate.final_price().domestic, dec!(92.56));
    assert!(!lock_rate.exposure().exchange_rate);

    let lock_domestic = &results[2];
    assert_eq!(lock_domestic.final_price().domestic, dec!(83.20));
    assert_eq!(lock_domestic.variation(), Decimal::ZERO);

    let lock_foreign = &results[3];
    assert_eq!(lock_foreign.final_price().foreign, dec!(16.00));
    assert_eq!(lock_foreign.final_price().domestic, dec!(89.856));

    let combined = &results[4];
    assert!(combined.exposure().is_fully_hedged());
    assert_eq!(combined.final_price(), reference);

    // With every lever rising, riding the scenario beats every hedge.
    assert_eq!(best_by_domestic(&results).unwrap().strategy(), Strategy::NoLock);

    // History recorded one entry per evaluation, in order.
    let history = engine.history();
    assert_eq!(history.len(), 5);
    let tags: Vec<Strategy> = history.iter().map(|h| h.result().strategy()).collect();
    assert_eq!(tags, Strategy::ALL.to_vec());
}

/// Snapshot file round-trip reproduces lever values, directions, and
/// magnitudes exactly.
#[test]
fn snapshot_file_round_trip() {
    let engine = reference_engine();
    let path = temp_path("round-trip");

    engine.export_snapshot(&path).unwrap();
    let mut restored = ScenarioEngine::new();
    restored.import_snapshot(&path).unwrap();
    std::fs::remove_file(&path).ok();

    for (original, loaded) in engine.levers().zip(restored.levers()) {
        assert_eq!(loaded.current_value(), original.current_value());
        assert_eq!(loaded.direction(), original.direction());
        assert_eq!(loaded.magnitude(), original.magnitude());
    }

    // Identical state produces identical simulations.
    let mut engine = engine;
    let a = engine.evaluate(Strategy::LockExchangeRate).unwrap();
    let b = restored.evaluate(Strategy::LockExchangeRate).unwrap();
    assert_eq!(a, b);
}

/// The exported document uses the stable lever keys and scenario labels.
#[test]
fn snapshot_document_is_stable_json() {
    let engine = reference_engine();
    let json = Snapshot::capture(&engine).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    for key in ["premium", "base_price", "exchange_rate"] {
        assert!(value["levers"][key].is_object(), "missing lever '{}'", key);
    }
    assert_eq!(value["levers"]["base_price"]["scenario"], "up");
    assert_eq!(value["levers"]["base_price"]["magnitude"], "12.0");
    assert_eq!(value["levers"]["premium"]["scenario"], "flat");
}

/// Simulation results serialize with the strategy tag and exposure map.
#[test]
fn simulation_result_serializes() {
    let mut engine = reference_engine();
    let result = engine.evaluate(Strategy::LockDomesticPrice).unwrap();
    let json = serde_json::to_string_pretty(&result).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["strategy"], "lock_domestic_price");
    assert_eq!(parsed["exposure"]["premium"], false);
    assert_eq!(parsed["exposure"]["exchange_rate"], true);
    assert_eq!(parsed["breakdown"]["locked_domestic_price"], "83.20");
}

/// Comparing the same tags twice without mutation yields identical
/// ordered sequences.
#[test]
fn repeated_compare_is_stable() {
    let mut engine = reference_engine();
    let first = engine.compare(&Strategy::ALL).unwrap();
    let second = engine.compare(&Strategy::ALL).unwrap();
    assert_eq!(first, second);
}

/// A rejected write never corrupts state for later operations.
#[test]
fn rejected_input_leaves_engine_usable() {
    let mut engine = reference_engine();
    let before = engine.evaluate(Strategy::NoLock).unwrap();

    assert!(engine.set_value(LeverId::BasePrice, dec!(200)).is_err());
    assert!(engine.set_value(LeverId::Premium, dec!(-3)).is_err());

    let after = engine.evaluate(Strategy::NoLock).unwrap();
    assert_eq!(before, after);
}

/// Sweep and stress run off clones: the configured engine is unchanged
/// and their outputs are consistent with direct evaluation.
#[test]
fn analysis_tools_agree_with_engine() {
    let engine = reference_engine();

    let sweep = magnitude_sweep(
        &engine,
        LeverId::ExchangeRate,
        Strategy::NoLock,
        dec!(8),
        dec!(8),
        dec!(1),
    )
    .unwrap();
    assert_eq!(sweep.points.len(), 1);
    // The configured scenario already has the rate up 8%.
    assert_eq!(sweep.points[0].domestic_price, dec!(99.9648));

    let stats = run_stress(
        &engine,
        &StressConfig {
            runs: 30,
            ..Default::default()
        },
        &[Strategy::Combined, Strategy::NoLock],
    )
    .unwrap();
    assert_eq!(stats[0].strategy, Strategy::Combined);
    assert_eq!(stats[0].best_variation, Decimal::ZERO);
    assert!(stats[1].worst_variation <= stats[1].best_variation);

    assert!(engine.history().is_empty());
}

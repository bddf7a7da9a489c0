//! Basic hedging walkthrough.
//!
//! Configures the levers, projects an optimistic and a pessimistic
//! scenario, and compares every strategy under each.

use hedging_engine::core::lever::{Direction, LeverId};
use hedging_engine::core::strategy::Strategy;
use hedging_engine::engine::{best_by_domestic, ScenarioEngine};
use rust_decimal_macros::dec;

fn print_comparison(engine: &mut ScenarioEngine) {
    let results = engine.compare(&Strategy::ALL).unwrap();

    println!(
        "{:<22} {:>12} {:>10}  {}",
        "Strategy", "Domestic", "Var", "Exposure"
    );
    println!("{}", "-".repeat(64));
    for result in &results {
        let exposed = result.exposure().exposed_levers();
        let exposure = if exposed.is_empty() {
            "none".to_string()
        } else {
            exposed
                .iter()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "{:<22} {:>12.4} {:>9.2}%  {}",
            result.strategy().label(),
            result.final_price().domestic,
            result.variation_percent(),
            exposure
        );
    }

    let best = best_by_domestic(&results).unwrap();
    println!(
        "\nBest strategy: {} at {:.4} domestic\n",
        best.strategy().label(),
        best.final_price().domestic
    );
}

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║   hedging-engine: Basic Hedge Example    ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut engine = ScenarioEngine::new();
    engine.set_value(LeverId::Premium, dec!(1.20)).unwrap();
    engine.set_value(LeverId::BasePrice, dec!(14.50)).unwrap();
    engine.set_value(LeverId::ExchangeRate, dec!(5.30)).unwrap();

    let reference = engine.reference_price();
    println!(
        "Current price: {} foreign = {} domestic\n",
        reference.foreign, reference.domestic
    );

    // --- Scenario 1: everything rises ---
    println!("━━━ Scenario 1: Optimistic (premium +15%, base +12%, rate +8%) ━━━\n");
    engine.set_scenario(LeverId::Premium, Direction::Up, dec!(15.0));
    engine.set_scenario(LeverId::BasePrice, Direction::Up, dec!(12.0));
    engine.set_scenario(LeverId::ExchangeRate, Direction::Up, dec!(8.0));
    print_comparison(&mut engine);

    // --- Scenario 2: everything falls ---
    println!("━━━ Scenario 2: Pessimistic (premium -25%, base -18%, rate -12%) ━━━\n");
    engine.set_scenario(LeverId::Premium, Direction::Down, dec!(25.0));
    engine.set_scenario(LeverId::BasePrice, Direction::Down, dec!(18.0));
    engine.set_scenario(LeverId::ExchangeRate, Direction::Down, dec!(12.0));
    print_comparison(&mut engine);

    println!("Simulations recorded: {}", engine.history().len());
}

//! Sensitivity walkthrough: sweep the exchange-rate scenario and watch
//! how each strategy's domestic price responds.

use hedging_engine::core::lever::LeverId;
use hedging_engine::core::strategy::Strategy;
use hedging_engine::engine::ScenarioEngine;
use hedging_engine::simulation::sweep::magnitude_sweep;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  hedging-engine: Magnitude Sweep Example ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut engine = ScenarioEngine::new();
    engine.set_value(LeverId::Premium, dec!(1.00)).unwrap();

    println!("Exchange-rate scenario from -20% to +20%, domestic price per strategy:\n");

    let strategies = [
        Strategy::NoLock,
        Strategy::LockExchangeRate,
        Strategy::LockForeignPrice,
    ];

    let sweeps: Vec<_> = strategies
        .iter()
        .map(|s| {
            magnitude_sweep(
                &engine,
                LeverId::ExchangeRate,
                *s,
                dec!(-20),
                dec!(20),
                dec!(5),
            )
            .unwrap()
        })
        .collect();

    print!("{:>10}", "Magnitude");
    for strategy in &strategies {
        print!(" {:>20}", strategy.label());
    }
    println!();
    println!("{}", "-".repeat(74));

    for i in 0..sweeps[0].points.len() {
        print!("{:>9}%", sweeps[0].points[i].magnitude);
        for sweep in &sweeps {
            print!(" {:>20.4}", sweep.points[i].domestic_price);
        }
        println!();
    }

    println!("\nLocking the rate flattens the curve; locking the foreign price");
    println!("keeps the domestic price moving with the rate alone.");
}

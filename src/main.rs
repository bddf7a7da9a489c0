//! hedging-engine CLI
//!
//! Run hedging-strategy simulations from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show the lever summary for a configuration
//! hedging-engine summary --config levers.json
//!
//! # Simulate a single strategy
//! hedging-engine simulate --strategy lock_exchange_rate --config levers.json
//!
//! # Compare all strategies under an ad-hoc scenario
//! hedging-engine compare --set premium=1.00 --scenario base_price=up:12 \
//!     --scenario exchange_rate=up:8
//!
//! # Random stress run
//! hedging-engine stress --runs 500 --max-magnitude 25
//!
//! # Write a default configuration file
//! hedging-engine init --output levers.json
//! ```

use hedging_engine::core::lever::{Direction, LeverId};
use hedging_engine::core::strategy::Strategy;
use hedging_engine::engine::{best_by_domestic, ScenarioEngine};
use hedging_engine::simulation::stress::{run_stress, StressConfig};
use hedging_engine::snapshot::Snapshot;
use rust_decimal::Decimal;
use std::path::Path;
use std::process;

fn print_usage() {
    eprintln!(
        r#"hedging-engine — hedging-strategy simulator for a two-currency commodity

USAGE:
    hedging-engine <COMMAND> [OPTIONS]

COMMANDS:
    summary     Show per-lever current and scenario-adjusted values
    simulate    Evaluate one hedging strategy
    compare     Evaluate several strategies side by side
    stress      Evaluate strategies under random scenarios
    init        Write a default configuration file
    help        Show this message

SHARED OPTIONS:
    --config <FILE>            Load lever configuration from a snapshot JSON file
    --set <lever=value>        Override a lever's current value (repeatable)
    --scenario <lever=dir[:m]> Override a lever's scenario, e.g. base_price=up:12
    --format <FORMAT>          Output format: text (default) or json

OPTIONS (simulate):
    --strategy <TAG>           One of: no_lock, lock_exchange_rate,
                               lock_domestic_price, lock_foreign_price, combined

OPTIONS (compare):
    --strategies <LIST>        Comma-separated strategy tags (default: all)

OPTIONS (stress):
    --runs <N>                 Number of random scenarios (default: 100)
    --max-magnitude <PCT>      Upper bound for random magnitudes (default: 20)

OPTIONS (init):
    --output <FILE>            Destination file (default: levers.json)

EXAMPLES:
    hedging-engine summary --scenario exchange_rate=down:10
    hedging-engine simulate --strategy combined --config levers.json
    hedging-engine compare --strategies no_lock,lock_exchange_rate --format json
    hedging-engine stress --runs 1000"#
    );
}

/// Options shared by the simulation commands.
#[derive(Default)]
struct CommonOpts {
    config: Option<String>,
    sets: Vec<(LeverId, Decimal)>,
    scenarios: Vec<(LeverId, Direction, Decimal)>,
    format: String,
}

fn parse_lever(s: &str) -> LeverId {
    s.parse().unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    })
}

fn parse_decimal(s: &str, what: &str) -> Decimal {
    s.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {} '{}'", what, s);
        process::exit(1);
    })
}

/// Parse a `lever=value` override.
fn parse_set(spec: &str) -> (LeverId, Decimal) {
    let (lever, value) = spec.split_once('=').unwrap_or_else(|| {
        eprintln!("--set expects lever=value, got '{}'", spec);
        process::exit(1);
    });
    (parse_lever(lever), parse_decimal(value, "value"))
}

/// Parse a `lever=direction[:magnitude]` override.
fn parse_scenario(spec: &str) -> (LeverId, Direction, Decimal) {
    let (lever, rest) = spec.split_once('=').unwrap_or_else(|| {
        eprintln!("--scenario expects lever=direction[:magnitude], got '{}'", spec);
        process::exit(1);
    });
    let (direction, magnitude) = match rest.split_once(':') {
        Some((d, m)) => (d, parse_decimal(m, "magnitude")),
        None => (rest, Decimal::ZERO),
    };
    let direction: Direction = direction.parse().unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });
    (parse_lever(lever), direction, magnitude)
}

fn parse_strategy(s: &str) -> Strategy {
    s.parse().unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    })
}

/// Consume one shared option if `args[i]` matches; returns the new index.
fn take_common(opts: &mut CommonOpts, args: &[String], i: usize) -> Option<usize> {
    let value = |idx: usize, flag: &str| -> String {
        args.get(idx).cloned().unwrap_or_else(|| {
            eprintln!("{} requires a value", flag);
            process::exit(1);
        })
    };
    match args[i].as_str() {
        "--config" => {
            opts.config = Some(value(i + 1, "--config"));
            Some(i + 2)
        }
        "--set" => {
            opts.sets.push(parse_set(&value(i + 1, "--set")));
            Some(i + 2)
        }
        "--scenario" => {
            opts.scenarios.push(parse_scenario(&value(i + 1, "--scenario")));
            Some(i + 2)
        }
        "--format" => {
            opts.format = value(i + 1, "--format");
            Some(i + 2)
        }
        _ => None,
    }
}

/// Build an engine from a config file plus command-line overrides.
fn build_engine(opts: &CommonOpts) -> ScenarioEngine {
    let mut engine = ScenarioEngine::new();

    if let Some(path) = &opts.config {
        engine.import_snapshot(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Error loading '{}': {}", path, e);
            process::exit(1);
        });
    }

    for (lever, value) in &opts.sets {
        engine.set_value(*lever, *value).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });
    }
    for (lever, direction, magnitude) in &opts.scenarios {
        engine.set_scenario(*lever, *direction, *magnitude);
    }
    engine
}

fn cmd_summary(args: &[String]) {
    let mut opts = CommonOpts {
        format: "text".to_string(),
        ..Default::default()
    };
    let mut i = 0;
    while i < args.len() {
        match take_common(&mut opts, args, i) {
            Some(next) => i = next,
            None => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
    }

    let engine = build_engine(&opts);
    let summary = engine.summary();

    if opts.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary).unwrap());
    } else {
        let reference = engine.reference_price();
        let scenario = engine.scenario_price();

        println!(
            "{:<14} {:>10} {:>12} {:>6} {:>10}  {}",
            "Lever", "Current", "Scenario", "Dir", "Magnitude", "Unit"
        );
        println!("{}", "-".repeat(68));
        for row in &summary {
            println!(
                "{:<14} {:>10} {:>12} {:>6} {:>9}%  {}",
                row.name,
                row.current_value,
                row.scenario_value,
                row.direction.as_str(),
                row.magnitude,
                row.unit
            );
        }
        println!();
        println!("Reference price: {}", reference);
        println!("Scenario price:  {}", scenario);
    }
}

fn cmd_simulate(args: &[String]) {
    let mut opts = CommonOpts {
        format: "text".to_string(),
        ..Default::default()
    };
    let mut strategy = None;
    let mut i = 0;
    while i < args.len() {
        if let Some(next) = take_common(&mut opts, args, i) {
            i = next;
            continue;
        }
        match args[i].as_str() {
            "--strategy" => {
                i += 1;
                strategy = Some(parse_strategy(&args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--strategy requires a tag");
                    process::exit(1);
                })));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let strategy = strategy.unwrap_or_else(|| {
        eprintln!("Error: --strategy <TAG> is required");
        process::exit(1);
    });

    let mut engine = build_engine(&opts);
    let result = engine.evaluate(strategy).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if opts.format == "json" {
        println!("{}", serde_json::to_string_pretty(&result).unwrap());
    } else {
        print!("{}", result);
        let breakdown = result.breakdown();
        println!();
        println!("Scenario values:");
        println!("  premium:       {}", breakdown.premium_scenario);
        println!("  base price:    {}", breakdown.base_price_scenario);
        println!("  exchange rate: {}", breakdown.exchange_rate_scenario);
        if let Some(rate) = breakdown.locked_exchange_rate {
            println!("Locked exchange rate:  {}", rate);
        }
        if let Some(price) = breakdown.locked_domestic_price {
            println!("Locked domestic price: {}", price);
        }
        if let Some(price) = breakdown.locked_foreign_price {
            println!("Locked foreign price:  {}", price);
        }
    }
}

fn cmd_compare(args: &[String]) {
    let mut opts = CommonOpts {
        format: "text".to_string(),
        ..Default::default()
    };
    let mut strategies: Vec<Strategy> = Strategy::ALL.to_vec();
    let mut i = 0;
    while i < args.len() {
        if let Some(next) = take_common(&mut opts, args, i) {
            i = next;
            continue;
        }
        match args[i].as_str() {
            "--strategies" => {
                i += 1;
                let list = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--strategies requires a comma-separated list");
                    process::exit(1);
                });
                strategies = list.split(',').map(|s| parse_strategy(s.trim())).collect();
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut engine = build_engine(&opts);
    let results = engine.compare(&strategies).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if opts.format == "json" {
        println!("{}", serde_json::to_string_pretty(&results).unwrap());
    } else {
        println!(
            "{:<22} {:>12} {:>12} {:>9}  {}",
            "Strategy", "Domestic", "Foreign", "Var", "Exposure"
        );
        println!("{}", "-".repeat(72));
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
                "{:<22} {:>12.4} {:>12.4} {:>8.2}%  {}",
                result.strategy().label(),
                result.final_price().domestic,
                result.final_price().foreign,
                result.variation_percent(),
                exposure
            );
        }
        if let Some(best) = best_by_domestic(&results) {
            println!();
            println!(
                "Best domestic price: {} ({})",
                best.final_price().domestic,
                best.strategy().label()
            );
        }
    }
}

fn cmd_stress(args: &[String]) {
    let mut opts = CommonOpts {
        format: "text".to_string(),
        ..Default::default()
    };
    let mut config = StressConfig::default();
    let mut i = 0;
    while i < args.len() {
        if let Some(next) = take_common(&mut opts, args, i) {
            i = next;
            continue;
        }
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                config.runs = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--runs requires a number");
                    process::exit(1);
                });
            }
            "--max-magnitude" => {
                i += 1;
                config.max_magnitude = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--max-magnitude requires a number");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let engine = build_engine(&opts);
    let stats = run_stress(&engine, &config, &Strategy::ALL).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if opts.format == "json" {
        println!("{}", serde_json::to_string_pretty(&stats).unwrap());
    } else {
        println!("Random scenarios: {} (magnitudes up to {}%)", config.runs, config.max_magnitude);
        println!();
        println!(
            "{:<22} {:>10} {:>10} {:>10}",
            "Strategy", "Worst", "Best", "Mean"
        );
        println!("{}", "-".repeat(56));
        for stat in &stats {
            println!(
                "{:<22} {:>9.2}% {:>9.2}% {:>9.2}%",
                stat.strategy.label(),
                decimal_to_f64(stat.worst_variation),
                decimal_to_f64(stat.best_variation),
                decimal_to_f64(stat.mean_variation)
            );
        }
    }
}

fn cmd_init(args: &[String]) {
    let mut output = "levers.json".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                i += 1;
                output = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let engine = ScenarioEngine::new();
    Snapshot::capture(&engine)
        .save(Path::new(&output))
        .unwrap_or_else(|e| {
            eprintln!("Error writing '{}': {}", output, e);
            process::exit(1);
        });
    eprintln!("Default configuration written to {}", output);
}

fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "summary" => cmd_summary(rest),
        "simulate" => cmd_simulate(rest),
        "compare" => cmd_compare(rest),
        "stress" => cmd_stress(rest),
        "init" => cmd_init(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}

//! Randomized stress runs: evaluate strategies under many random
//! scenarios and summarize the spread of outcomes.

use crate::core::lever::{Direction, LeverId};
use crate::core::strategy::Strategy;
use crate::engine::{EngineError, ScenarioEngine};
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;

/// Configuration for a stress run.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of random scenarios to draw.
    pub runs: usize,
    /// Upper bound for random scenario magnitudes, in percent.
    pub max_magnitude: Decimal,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            runs: 100,
            max_magnitude: Decimal::from(20),
        }
    }
}

/// Variation spread of one strategy across all stress runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyStress {
    pub strategy: Strategy,
    pub runs: usize,
    /// Lowest variation seen, in percent.
    pub worst_variation: Decimal,
    /// Highest variation seen, in percent.
    pub best_variation: Decimal,
    pub mean_variation: Decimal,
}

/// Evaluate `strategies` under `config.runs` random scenarios.
///
/// Each run draws a fresh direction and magnitude for every lever, then
/// evaluates all strategies against that scenario on a clone of the
/// engine. The caller's engine state and history stay untouched.
pub fn run_stress(
    engine: &ScenarioEngine,
    config: &StressConfig,
    strategies: &[Strategy],
) -> Result<Vec<StrategyStress>, EngineError> {
    if config.runs == 0 || strategies.is_empty() {
        return Ok(Vec::new());
    }

    let mut rng = rand::thread_rng();
    let max_magnitude: f64 = config.max_magnitude.to_string().parse().unwrap_or(20.0);

    let mut worst = vec![Decimal::MAX; strategies.len()];
    let mut best = vec![Decimal::MIN; strategies.len()];
    let mut sum = vec![Decimal::ZERO; strategies.len()];

    for _ in 0..config.runs {
        let mut probe = engine.clone();
        for id in LeverId::ALL {
            let direction = match rng.gen_range(0..3) {
                0 => Direction::Up,
                1 => Direction::Down,
                _ => Direction::Flat,
            };
            let magnitude = if max_magnitude > 0.0 {
                Decimal::from_f64_retain(rng.gen_range(0.0..max_magnitude))
                    .unwrap_or(Decimal::ZERO)
                    .round_dp(1)
            } else {
                Decimal::ZERO
            };
            probe.set_scenario(id, direction, magnitude);
        }

        for (i, strategy) in strategies.iter().enumerate() {
            let result = probe.evaluate(*strategy)?;
            let variation = result.variation();
            if variation < worst[i] {
                worst[i] = variation;
            }
            if variation > best[i] {
                best[i] = variation;
            }
            sum[i] += variation;
        }
    }

    let runs_decimal = Decimal::from(config.runs as u64);
    Ok(strategies
        .iter()
        .enumerate()
        .map(|(i, strategy)| StrategyStress {
            strategy: *strategy,
            runs: config.runs,
            worst_variation: worst[i],
            best_variation: best[i],
            mean_variation: sum[i] / runs_decimal,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stress_summary_shape() {
        let engine = ScenarioEngine::new();
        let config = StressConfig {
            runs: 25,
            ..Default::default()
        };

        let stats = run_stress(&engine, &config, &Strategy::ALL).unwrap();
        assert_eq!(stats.len(), Strategy::ALL.len());
        for stat in &stats {
            assert_eq!(stat.runs, 25);
            assert!(stat.worst_variation <= stat.mean_variation);
            assert!(stat.mean_variation <= stat.best_variation);
        }
    }

    #[test]
    fn test_combined_never_varies() {
        let engine = ScenarioEngine::new();
        let config = StressConfig {
            runs: 50,
            ..Default::default()
        };

        let stats = run_stress(&engine, &config, &[Strategy::Combined]).unwrap();
        assert_eq!(stats[0].worst_variation, Decimal::ZERO);
        assert_eq!(stats[0].best_variation, Decimal::ZERO);
        assert_eq!(stats[0].mean_variation, Decimal::ZERO);
    }

    #[test]
    fn test_stress_leaves_engine_untouched() {
        let engine = ScenarioEngine::new();
        run_stress(&engine, &StressConfig::default(), &[Strategy::NoLock]).unwrap();
        assert!(engine.history().is_empty());
        for lever in engine.levers() {
            assert_eq!(lever.direction(), Direction::Flat);
        }
    }

    #[test]
    fn test_zero_runs_yields_nothing() {
        let engine = ScenarioEngine::new();
        let config = StressConfig {
            runs: 0,
            ..Default::default()
        };
        assert!(run_stress(&engine, &config, &Strategy::ALL).unwrap().is_empty());
    }
}

//! Magnitude sweeps: how a strategy's price responds as one lever's
//! scenario magnitude steps across a signed range.
//!
//! Each probe runs on a clone of the engine, so the caller's lever state
//! and history never change. The sign of the magnitude selects the
//! direction: negative is a down scenario, zero is flat.

use crate::core::lever::{Direction, LeverId};
use crate::core::strategy::Strategy;
use crate::engine::{EngineError, ScenarioEngine};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One sampled point of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Signed magnitude in percent.
    pub magnitude: Decimal,
    pub domestic_price: Decimal,
    pub variation: Decimal,
}

/// A full sweep over one lever for one strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepResult {
    pub lever: LeverId,
    pub strategy: Strategy,
    pub points: Vec<SweepPoint>,
}

/// Sweep `lever`'s scenario magnitude from `from` to `to` (inclusive) in
/// `step` increments, evaluating `strategy` at each point.
///
/// The other levers keep whatever scenario the engine already carries.
///
/// # Panics
///
/// Panics if `step` is not positive.
pub fn magnitude_sweep(
    engine: &ScenarioEngine,
    lever: LeverId,
    strategy: Strategy,
    from: Decimal,
    to: Decimal,
    step: Decimal,
) -> Result<SweepResult, EngineError> {
    assert!(step > Decimal::ZERO, "sweep step must be positive, got {}", step);

    let mut points = Vec::new();
    let mut magnitude = from;
    while magnitude <= to {
        let (direction, size) = if magnitude > Decimal::ZERO {
            (Direction::Up, magnitude)
        } else if magnitude < Decimal::ZERO {
            (Direction::Down, -magnitude)
        } else {
            (Direction::Flat, Decimal::ZERO)
        };

        let mut probe = engine.clone();
        probe.set_scenario(lever, direction, size);
        let result = probe.evaluate(strategy)?;
        points.push(SweepPoint {
            magnitude,
            domestic_price: result.final_price().domestic,
            variation: result.variation(),
        });

        magnitude += step;
    }

    Ok(SweepResult {
        lever,
        strategy,
        points,
    })
}

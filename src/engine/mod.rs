//! The scenario engine: lever state, price derivation, and strategy
//! evaluation.

pub mod result;

use crate::core::lever::{Direction, Lever, LeverId};
use crate::core::price::PricePair;
use crate::core::strategy::{RiskExposure, Strategy};
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use thiserror::Error;

use result::{HistoryEntry, PriceBreakdown, SimulationResult};

/// Errors arising from engine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("value {value} for lever '{lever}' outside valid range [{min}, {max}]")]
    ValueOutOfRange {
        lever: LeverId,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },
    #[error("reference domestic price is zero; variation is undefined")]
    ZeroReferencePrice,
    #[error("scenario exchange rate is zero; cannot convert a locked domestic price")]
    ZeroExchangeRate,
}

/// Per-lever summary row for presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeverSummary {
    pub id: LeverId,
    pub name: String,
    pub unit: String,
    pub current_value: Decimal,
    pub scenario_value: Decimal,
    pub direction: Direction,
    pub magnitude: Decimal,
}

/// The scenario engine.
///
/// Owns the three market levers and an audit history of every simulation
/// it has produced. All queries derive from lever state on demand;
/// nothing is cached between calls.
///
/// # Examples
///
/// ```
/// use hedging_engine::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let mut engine = ScenarioEngine::new();
/// engine.set_value(LeverId::Premium, dec!(1.00)).unwrap();
/// engine.set_scenario(LeverId::BasePrice, Direction::Up, dec!(12.0));
/// engine.set_scenario(LeverId::ExchangeRate, Direction::Up, dec!(8.0));
///
/// let result = engine.evaluate(Strategy::NoLock).unwrap();
/// assert_eq!(result.final_price().domestic, dec!(99.9648));
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioEngine {
    levers: [Lever; 3],
    history: Vec<HistoryEntry>,
}

impl Default for ScenarioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioEngine {
    /// Create an engine with the standard lever set: a premium and a base
    /// price in the foreign quote currency, plus the exchange rate into
    /// the domestic currency.
    pub fn new() -> Self {
        let levers = [
            Lever::new(
                LeverId::Premium,
                "Premium",
                "USD/bushel",
                dec!(0.00),
                dec!(-0.50),
                dec!(2.50),
            ),
            Lever::new(
                LeverId::BasePrice,
                "Base Price",
                "USD/bushel",
                dec!(15.00),
                dec!(10.00),
                dec!(25.00),
            ),
            Lever::new(
                LeverId::ExchangeRate,
                "Exchange Rate",
                "BRL/USD",
                dec!(5.20),
                dec!(4.50),
                dec!(6.50),
            ),
        ];
        Self {
            levers,
            history: Vec::new(),
        }
    }

    fn index(id: LeverId) -> usize {
        match id {
            LeverId::Premium => 0,
            LeverId::BasePrice => 1,
            LeverId::ExchangeRate => 2,
        }
    }

    /// Look up a lever by id.
    pub fn lever(&self, id: LeverId) -> &Lever {
        &self.levers[Self::index(id)]
    }

    /// The three levers, in display order.
    pub fn levers(&self) -> impl Iterator<Item = &Lever> {
        self.levers.iter()
    }

    /// Set a lever's current value.
    ///
    /// Validates against the lever's inclusive range before committing;
    /// a rejected value leaves the lever untouched.
    pub fn set_value(&mut self, id: LeverId, value: Decimal) -> Result<(), EngineError> {
        let lever = &mut self.levers[Self::index(id)];
        if !lever.in_range(value) {
            return Err(EngineError::ValueOutOfRange {
                lever: id,
                value,
                min: lever.min_value(),
                max: lever.max_value(),
            });
        }
        debug!("lever {} value {} -> {}", id, lever.current_value(), value);
        lever.set_current_value(value);
        Ok(())
    }

    /// Set a lever's scenario direction and magnitude.
    ///
    /// The engine imposes no upper bound on the magnitude; interactive
    /// callers apply their own input limits.
    pub fn set_scenario(&mut self, id: LeverId, direction: Direction, magnitude: Decimal) {
        debug!("lever {} scenario {} {}%", id, direction, magnitude);
        self.levers[Self::index(id)].set_scenario(direction, magnitude);
    }

    /// A lever's scenario-adjusted value, recomputed from its state.
    pub fn scenario_value(&self, id: LeverId) -> Decimal {
        self.lever(id).scenario_value()
    }

    /// The price pair with every lever projected through its scenario.
    ///
    /// Foreign price = premium + base price (both scenario-adjusted);
    /// domestic price = foreign price × scenario exchange rate.
    pub fn scenario_price(&self) -> PricePair {
        let foreign = self.scenario_value(LeverId::Premium) + self.scenario_value(LeverId::BasePrice);
        let domestic = foreign * self.scenario_value(LeverId::ExchangeRate);
        PricePair::new(foreign, domestic)
    }

    /// The unscenario'd price pair built from current lever values.
    ///
    /// This is the baseline every strategy measures its variation
    /// against. It only coincides with [`scenario_price`] when all
    /// scenarios are flat or zero-magnitude.
    ///
    /// [`scenario_price`]: ScenarioEngine::scenario_price
    pub fn reference_price(&self) -> PricePair {
        let foreign =
            self.lever(LeverId::Premium).current_value() + self.lever(LeverId::BasePrice).current_value();
        let domestic = foreign * self.lever(LeverId::ExchangeRate).current_value();
        PricePair::new(foreign, domestic)
    }

    /// Evaluate one strategy against the current lever state.
    ///
    /// Pure given the lever state; the only side effect is appending the
    /// result to the engine's history.
    pub fn evaluate(&mut self, strategy: Strategy) -> Result<SimulationResult, EngineError> {
        let result = self.project(strategy)?;
        debug!(
            "evaluated {}: domestic {} ({:+.2}%)",
            strategy,
            result.final_price().domestic,
            result.variation_percent()
        );
        self.history.push(HistoryEntry::new(result.clone()));
        Ok(result)
    }

    /// Evaluate several strategies, preserving input order.
    pub fn compare(&mut self, strategies: &[Strategy]) -> Result<Vec<SimulationResult>, EngineError> {
        strategies.iter().map(|s| self.evaluate(*s)).collect()
    }

    /// Every result produced so far, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Per-lever summary rows: current value, scenario value, direction,
    /// magnitude. Consumed verbatim by presentation layers.
    pub fn summary(&self) -> Vec<LeverSummary> {
        self.levers
            .iter()
            .map(|lever| LeverSummary {
                id: lever.id(),
                name: lever.name().to_string(),
                unit: lever.unit().to_string(),
                current_value: lever.current_value(),
                scenario_value: lever.scenario_value(),
                direction: lever.direction(),
                magnitude: lever.magnitude(),
            })
            .collect()
    }

    fn project(&self, strategy: Strategy) -> Result<SimulationResult, EngineError> {
        let scenario = self.scenario_price();
        let reference = self.reference_price();
        if reference.domestic == Decimal::ZERO {
            return Err(EngineError::ZeroReferencePrice);
        }

        let rate_scenario = self.scenario_value(LeverId::ExchangeRate);
        let rate_current = self.lever(LeverId::ExchangeRate).current_value();

        let mut breakdown = PriceBreakdown {
            premium_scenario: self.scenario_value(LeverId::Premium),
            base_price_scenario: self.scenario_value(LeverId::BasePrice),
            exchange_rate_scenario: rate_scenario,
            scenario_price: scenario,
            locked_exchange_rate: None,
            locked_domestic_price: None,
            locked_foreign_price: None,
        };

        let (final_price, exposure) = match strategy {
            Strategy::NoLock => (scenario, RiskExposure::FULL),
            Strategy::LockExchangeRate => {
                breakdown.locked_exchange_rate = Some(rate_current);
                (
                    PricePair::new(scenario.foreign, scenario.foreign * rate_current),
                    RiskExposure {
                        premium: true,
                        base_price: true,
                        exchange_rate: false,
                    },
                )
            }
            Strategy::LockDomesticPrice => {
                if rate_scenario == Decimal::ZERO {
                    return Err(EngineError::ZeroExchangeRate);
                }
                breakdown.locked_domestic_price = Some(reference.domestic);
                (
                    PricePair::new(reference.domestic / rate_scenario, reference.domestic),
                    RiskExposure {
                        premium: false,
                        base_price: false,
                        exchange_rate: true,
                    },
                )
            }
            Strategy::LockForeignPrice => {
                breakdown.locked_foreign_price = Some(reference.foreign);
                (
                    PricePair::new(reference.foreign, reference.foreign * rate_scenario),
                    RiskExposure {
                        premium: false,
                        base_price: false,
                        exchange_rate: true,
                    },
                )
            }
            Strategy::Combined => {
                breakdown.locked_exchange_rate = Some(rate_current);
                breakdown.locked_domestic_price = Some(reference.domestic);
                (
                    reference,
                    RiskExposure {
                        premium: false,
                        base_price: false,
                        exchange_rate: false,
                    },
                )
            }
        };

        let variation =
            (final_price.domestic - reference.domestic) / reference.domestic * Decimal::ONE_HUNDRED;

        Ok(SimulationResult::new(
            strategy,
            final_price,
            variation,
            exposure,
            breakdown,
        ))
    }
}

/// The result with the highest final domestic price, if any.
///
/// The comparison view uses this to flag the best-performing strategy
/// under the configured scenario.
pub fn best_by_domestic(results: &[SimulationResult]) -> Option<&SimulationResult> {
    results.iter().max_by_key(|r| r.final_price().domestic)
}

use crate::core::price::PricePair;
use crate::core::strategy::{RiskExposure, Strategy};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Intermediate values behind a simulation result.
///
/// Carries each lever's scenario-adjusted value, the scenario price pair,
/// and whichever figures the strategy locked. Kept on the result so
/// presentation layers can explain a price without re-deriving it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub premium_scenario: Decimal,
    pub base_price_scenario: Decimal,
    pub exchange_rate_scenario: Decimal,
    pub scenario_price: PricePair,
    /// Exchange rate frozen by the strategy, if any.
    pub locked_exchange_rate: Option<Decimal>,
    /// Domestic price frozen by the strategy, if any.
    pub locked_domestic_price: Option<Decimal>,
    /// Foreign price frozen by the strategy, if any.
    pub locked_foreign_price: Option<Decimal>,
}

/// Outcome of evaluating one hedging strategy against the current lever
/// state.
///
/// Results are immutable snapshots: evaluating the same strategy twice
/// without mutating the levers yields equal results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    strategy: Strategy,
    final_price: PricePair,
    /// Percent change of the final domestic price against the
    /// unscenario'd reference price.
    variation: Decimal,
    exposure: RiskExposure,
    breakdown: PriceBreakdown,
}

impl SimulationResult {
    pub(crate) fn new(
        strategy: Strategy,
        final_price: PricePair,
        variation: Decimal,
        exposure: RiskExposure,
        breakdown: PriceBreakdown,
    ) -> Self {
        Self {
            strategy,
            final_price,
            variation,
            exposure,
            breakdown,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn final_price(&self) -> PricePair {
        self.final_price
    }

    /// Variation against the reference price, in percent.
    pub fn variation(&self) -> Decimal {
        self.variation
    }

    /// Variation as an `f64` for display.
    pub fn variation_percent(&self) -> f64 {
        self.variation.to_string().parse::<f64>().unwrap_or(0.0)
    }

    pub fn exposure(&self) -> RiskExposure {
        self.exposure
    }

    pub fn breakdown(&self) -> &PriceBreakdown {
        &self.breakdown
    }
}

impl std::fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== {} ===", self.strategy.label())?;
        writeln!(f, "Domestic price: {}", self.final_price.domestic)?;
        writeln!(f, "Foreign price:  {}", self.final_price.foreign)?;
        writeln!(f, "Variation:      {:+.2}%", self.variation_percent())?;
        let exposed = self.exposure.exposed_levers();
        if exposed.is_empty() {
            writeln!(f, "Exposure:       none (fully hedged)")?;
        } else {
            let names: Vec<&str> = exposed.iter().map(|id| id.as_str()).collect();
            writeln!(f, "Exposure:       {}", names.join(", "))?;
        }
        Ok(())
    }
}

/// One line of the engine's audit history.
///
/// The engine appends an entry for every successful evaluation. Entries
/// carry their own id and timestamp; the wrapped result stays exactly
/// what the caller received.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    id: Uuid,
    evaluated_at: DateTime<Utc>,
    result: SimulationResult,
}

impl HistoryEntry {
    pub(crate) fn new(result: SimulationResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            evaluated_at: Utc::now(),
            result,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn evaluated_at(&self) -> DateTime<Utc> {
        self.evaluated_at
    }

    pub fn result(&self) -> &SimulationResult {
        &self.result
    }
}

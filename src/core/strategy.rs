use crate::core::lever::LeverId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A hedging strategy: a policy describing which levers are locked
/// against scenario movement.
///
/// Strategies are stateless tags; the engine computes their effect from
/// the current lever state on every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Take the scenario as-is; every lever stays exposed.
    NoLock,
    /// Fix the exchange rate at its current value; the commodity legs
    /// stay exposed.
    LockExchangeRate,
    /// Fix the domestic-currency price at today's level; only the
    /// exchange rate still moves the foreign leg.
    LockDomesticPrice,
    /// Fix the foreign-currency price at today's level; the domestic
    /// price still follows the exchange rate.
    LockForeignPrice,
    /// Lock the exchange rate and the domestic price at once: a full
    /// hedge with no remaining exposure.
    Combined,
}

impl Strategy {
    /// All strategies, in display order.
    pub const ALL: [Strategy; 5] = [
        Strategy::NoLock,
        Strategy::LockExchangeRate,
        Strategy::LockDomesticPrice,
        Strategy::LockForeignPrice,
        Strategy::Combined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::NoLock => "no_lock",
            Strategy::LockExchangeRate => "lock_exchange_rate",
            Strategy::LockDomesticPrice => "lock_domestic_price",
            Strategy::LockForeignPrice => "lock_foreign_price",
            Strategy::Combined => "combined",
        }
    }

    /// Human-readable label for tables and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::NoLock => "No lock",
            Strategy::LockExchangeRate => "Lock exchange rate",
            Strategy::LockDomesticPrice => "Lock domestic price",
            Strategy::LockForeignPrice => "Lock foreign price",
            Strategy::Combined => "Combined",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error produced when a strategy tag string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy '{0}'")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no_lock" => Ok(Strategy::NoLock),
            "lock_exchange_rate" => Ok(Strategy::LockExchangeRate),
            "lock_domestic_price" => Ok(Strategy::LockDomesticPrice),
            "lock_foreign_price" => Ok(Strategy::LockForeignPrice),
            "combined" => Ok(Strategy::Combined),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

/// Per-lever risk exposure left open by a strategy.
///
/// `true` means the lever still moves with its scenario; `false` means
/// the strategy locked it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskExposure {
    pub premium: bool,
    pub base_price: bool,
    pub exchange_rate: bool,
}

impl RiskExposure {
    /// Exposure of a strategy that locks nothing.
    pub const FULL: RiskExposure = RiskExposure {
        premium: true,
        base_price: true,
        exchange_rate: true,
    };

    pub fn get(&self, id: LeverId) -> bool {
        match id {
            LeverId::Premium => self.premium,
            LeverId::BasePrice => self.base_price,
            LeverId::ExchangeRate => self.exchange_rate,
        }
    }

    /// Levers still exposed, in display order.
    pub fn exposed_levers(&self) -> Vec<LeverId> {
        LeverId::ALL.into_iter().filter(|id| self.get(*id)).collect()
    }

    pub fn is_fully_hedged(&self) -> bool {
        !self.premium && !self.base_price && !self.exchange_rate
    }
}

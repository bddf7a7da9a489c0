use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of one of the three market levers.
///
/// The lever set is closed: a premium over the board price, the board
/// (base) price itself, and the exchange rate connecting the foreign
/// quote currency to the domestic currency. String forms (`premium`,
/// `base_price`, `exchange_rate`) are used in snapshot documents and on
/// the command line.
///
/// # Examples
///
/// ```
/// use hedging_engine::core::lever::LeverId;
///
/// let id: LeverId = "base_price".parse().unwrap();
/// assert_eq!(id, LeverId::BasePrice);
/// assert!("spot_price".parse::<LeverId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeverId {
    Premium,
    BasePrice,
    ExchangeRate,
}

impl LeverId {
    /// All levers, in display order.
    pub const ALL: [LeverId; 3] = [LeverId::Premium, LeverId::BasePrice, LeverId::ExchangeRate];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeverId::Premium => "premium",
            LeverId::BasePrice => "base_price",
            LeverId::ExchangeRate => "exchange_rate",
        }
    }
}

impl fmt::Display for LeverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error produced when a lever identifier string does not name one of the
/// three configured levers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown lever '{0}'")]
pub struct UnknownLever(pub String);

impl FromStr for LeverId {
    type Err = UnknownLever;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "premium" => Ok(LeverId::Premium),
            "base_price" => Ok(LeverId::BasePrice),
            "exchange_rate" => Ok(LeverId::ExchangeRate),
            other => Err(UnknownLever(other.to_string())),
        }
    }
}

/// Direction of a scenario applied to a lever.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    #[default]
    Flat,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Flat => "flat",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error produced when a scenario direction string is not `up`, `down`,
/// or `flat`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scenario direction '{0}'")]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "flat" => Ok(Direction::Flat),
            other => Err(UnknownDirection(other.to_string())),
        }
    }
}

/// One adjustable market quantity.
///
/// A lever holds a current value constrained to an inclusive `[min, max]`
/// range, plus the scenario (direction and percentage magnitude) that
/// projects it forward. The projected value is always derived on demand by
/// [`Lever::scenario_value`]; it is never stored.
///
/// Levers are created once at engine construction with fixed identities
/// and ranges. Only the current value, direction, and magnitude change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lever {
    id: LeverId,
    /// Human-readable name for display.
    name: String,
    /// Unit label, e.g. "USD/bushel".
    unit: String,
    current_value: Decimal,
    min_value: Decimal,
    max_value: Decimal,
    direction: Direction,
    /// Scenario magnitude in percent. Zero when the scenario is flat.
    magnitude: Decimal,
}

impl Lever {
    /// Create a new lever with a flat scenario.
    ///
    /// # Panics
    ///
    /// Panics if `current` lies outside `[min, max]`.
    pub fn new(
        id: LeverId,
        name: impl Into<String>,
        unit: impl Into<String>,
        current: Decimal,
        min: Decimal,
        max: Decimal,
    ) -> Self {
        assert!(
            min <= current && current <= max,
            "lever {} initial value {} outside [{}, {}]",
            id,
            current,
            min,
            max
        );
        Self {
            id,
            name: name.into(),
            unit: unit.into(),
            current_value: current,
            min_value: min,
            max_value: max,
            direction: Direction::Flat,
            magnitude: Decimal::ZERO,
        }
    }

    // --- Accessors ---

    pub fn id(&self) -> LeverId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn current_value(&self) -> Decimal {
        self.current_value
    }

    pub fn min_value(&self) -> Decimal {
        self.min_value
    }

    pub fn max_value(&self) -> Decimal {
        self.max_value
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn magnitude(&self) -> Decimal {
        self.magnitude
    }

    /// Whether `value` lies within this lever's inclusive valid range.
    pub fn in_range(&self, value: Decimal) -> bool {
        self.min_value <= value && value <= self.max_value
    }

    /// The lever's value projected through its scenario.
    ///
    /// `current × (1 + m/100)` for an up scenario, `current × (1 − m/100)`
    /// for a down scenario, the current value unchanged when flat.
    pub fn scenario_value(&self) -> Decimal {
        let factor = self.magnitude / Decimal::ONE_HUNDRED;
        match self.direction {
            Direction::Up => self.current_value * (Decimal::ONE + factor),
            Direction::Down => self.current_value * (Decimal::ONE - factor),
            Direction::Flat => self.current_value,
        }
    }

    /// Overwrite the current value. The caller validates the range first.
    pub(crate) fn set_current_value(&mut self, value: Decimal) {
        self.current_value = value;
    }

    /// Overwrite the scenario direction and magnitude.
    pub(crate) fn set_scenario(&mut self, direction: Direction, magnitude: Decimal) {
        self.direction = direction;
        self.magnitude = magnitude;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn board_price() -> Lever {
        Lever::new(
            LeverId::BasePrice,
            "Base Price",
            "USD/bushel",
            dec!(15.00),
            dec!(10.00),
            dec!(25.00),
        )
    }

    #[test]
    fn test_scenario_value_up() {
        let mut lever = board_price();
        lever.set_scenario(Direction::Up, dec!(12.0));
        assert_eq!(lever.scenario_value(), dec!(16.80));
    }

    #[test]
    fn test_scenario_value_down() {
        let mut lever = board_price();
        lever.set_scenario(Direction::Down, dec!(20.0));
        assert_eq!(lever.scenario_value(), dec!(12.00));
    }

    #[test]
    fn test_flat_ignores_magnitude() {
        let mut lever = board_price();
        lever.set_scenario(Direction::Flat, dec!(35.0));
        assert_eq!(lever.scenario_value(), dec!(15.00));
    }

    #[test]
    fn test_scenario_value_not_cached() {
        let mut lever = board_price();
        lever.set_scenario(Direction::Up, dec!(10.0));
        assert_eq!(lever.scenario_value(), dec!(16.50));
        lever.set_current_value(dec!(20.00));
        assert_eq!(lever.scenario_value(), dec!(22.00));
    }

    #[test]
    fn test_in_range_inclusive() {
        let lever = board_price();
        assert!(lever.in_range(dec!(10.00)));
        assert!(lever.in_range(dec!(25.00)));
        assert!(!lever.in_range(dec!(9.99)));
        assert!(!lever.in_range(dec!(25.01)));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_initial_value_outside_range() {
        Lever::new(
            LeverId::Premium,
            "Premium",
            "USD/bushel",
            dec!(5.00),
            dec!(-0.50),
            dec!(2.50),
        );
    }

    #[test]
    fn test_lever_id_round_trip() {
        for id in LeverId::ALL {
            assert_eq!(id.as_str().parse::<LeverId>().unwrap(), id);
        }
        assert_eq!(
            "dollar".parse::<LeverId>(),
            Err(UnknownLever("dollar".to_string()))
        );
    }

    #[test]
    fn test_direction_round_trip() {
        for dir in [Direction::Up, Direction::Down, Direction::Flat] {
            assert_eq!(dir.as_str().parse::<Direction>().unwrap(), dir);
        }
        assert!("sideways".parse::<Direction>().is_err());
    }
}

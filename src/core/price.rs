use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A commodity price expressed in both currencies.
///
/// The foreign price is quoted in the commodity's trading currency
/// (premium + base price); the domestic price is the foreign price
/// converted through the exchange-rate lever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePair {
    pub foreign: Decimal,
    pub domestic: Decimal,
}

impl PricePair {
    pub fn new(foreign: Decimal, domestic: Decimal) -> Self {
        Self { foreign, domestic }
    }
}

impl fmt::Display for PricePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} foreign / {} domestic", self.foreign, self.domestic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_pair_display() {
        let pair = PricePair::new(dec!(16.00), dec!(83.20));
        assert_eq!(format!("{}", pair), "16.00 foreign / 83.20 domestic");
    }
}

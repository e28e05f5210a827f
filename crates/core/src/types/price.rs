//! Type-safe price representation using decimal arithmetic.
//!
//! The commerce API quotes every amount in a single currency (US dollars),
//! sometimes as a JSON number and sometimes as a string. [`Price`] accepts
//! both and never goes through floating point.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A monetary amount in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Returns the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Round to whole cents, halves away from zero.
    #[must_use]
    pub fn round_cents(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Format for display, e.g. `$19.99`.
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.round_cents().0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Mul<Decimal> for Price {
    type Output = Self;

    fn mul(self, rate: Decimal) -> Self {
        Self(self.0 * rate)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl core::str::FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<Decimal>().map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Price::from_cents(2000).to_string(), "$20.00");
        assert_eq!(Price::from_cents(5).to_string(), "$0.05");
        assert_eq!("7.5".parse::<Price>().unwrap().display(), "$7.50");
    }

    #[test]
    fn test_display_rounds_half_cents_up() {
        let half = Price::from_cents(25) * Decimal::new(10, 2);
        assert_eq!(half.amount(), Decimal::new(250, 4));
        assert_eq!(half.to_string(), "$0.03");
        assert_eq!(half.round_cents(), Price::from_cents(3));
        assert_eq!(Price::new(Decimal::new(50_550, 4)).to_string(), "$5.06");
    }

    #[test]
    fn test_deserializes_numbers_and_strings() {
        let from_number: Price = serde_json::from_str("19.99").unwrap();
        let from_string: Price = serde_json::from_str("\"19.99\"").unwrap();
        assert_eq!(from_number, Price::from_cents(1999));
        assert_eq!(from_string, Price::from_cents(1999));
    }

    #[test]
    fn test_line_multiplication_and_sum() {
        let lines = [Price::from_cents(2000) * 3, Price::from_cents(150) * 2];
        let total: Price = lines.into_iter().sum();
        assert_eq!(total, Price::from_cents(6300));
    }
}

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// A currency amount rounded to cents, used where amounts are shown to people.
/// The split calculator works on unrounded `Decimal`s; convert at the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::from(cents) / Decimal::from(100))
    }

    /// Saturates at `i64::MAX` (or `i64::MIN`) cents for amounts too large to express.
    pub fn to_cents(self) -> i64 {
        self.0
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .unwrap_or(if self.0.is_sign_negative() { i64::MIN } else { i64::MAX })
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal.round_dp(2))
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl From<Decimal> for Money {
    fn from(decimal: Decimal) -> Self {
        Money::from_decimal(decimal)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |a, b| a + b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn rounds_to_cents_on_construction() {
        let m = Money::from_decimal(Decimal::from_str("3.33333").unwrap());
        assert_eq!(m.to_cents(), 333);
        assert_eq!(m.to_string(), "$3.33");
    }

    #[test]
    fn display_pads_two_places() {
        assert_eq!(Money::from_cents(550).to_string(), "$5.50");
        assert_eq!(Money::from_cents(1100).to_string(), "$11.00");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn to_cents_saturates_for_huge_amounts() {
        assert_eq!(Money::from_decimal(Decimal::MAX).to_cents(), i64::MAX);
        assert_eq!(Money::from_decimal(Decimal::MIN).to_cents(), i64::MIN);
        assert_eq!(Money::from_decimal(Decimal::from(10_i64.pow(18))).to_cents(), i64::MAX);
    }

    #[test]
    fn sum_and_arithmetic() {
        let total: Money = [150, 250, 100].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.to_cents(), 500);
        assert!((total - Money::from_cents(500)).is_zero());
    }
}

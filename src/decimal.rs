use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Div;
use std::str::FromStr;

use crate::errors::ValidationError;

/// internal precision kept for intermediate currency arithmetic
const MONEY_SCALE: u32 = 8;

/// places shown to members
pub const DISPLAY_SCALE: u32 = 2;

/// round half away from zero, the way currency figures are shown on screen
pub fn round_currency(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// format with exactly two decimal places ("650" -> "650.00")
pub fn to_fixed_2(d: Decimal) -> String {
    let mut rounded = round_currency(d);
    rounded.rescale(DISPLAY_SCALE);
    rounded.to_string()
}

/// shilling amount; arithmetic keeps 8 places, display uses 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(MONEY_SCALE))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp(MONEY_SCALE)))
    }

    /// create from whole shillings
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from a JSON-style double; NaN and infinities are rejected
    pub fn from_f64(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteAmount { value });
        }
        Decimal::from_f64(value)
            .map(Money::from_decimal)
            .ok_or(ValidationError::NonFiniteAmount { value })
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round to specified decimal places
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp(dp))
    }

    /// round to cents, half away from zero
    pub fn to_cents(&self) -> Self {
        Money(round_currency(self.0))
    }

    /// round to whole shillings, half away from zero
    pub fn to_whole(&self) -> Self {
        Money(self.0.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
    }

    /// display string with exactly two decimals
    pub fn to_fixed(&self) -> String {
        to_fixed_2(self.0)
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// maximum of two values
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// multiply by a whole number of periods
    pub fn times(&self, periods: u32) -> Result<Self, ValidationError> {
        self.0
            .checked_mul(Decimal::from(periods))
            .map(|product| Money(product.round_dp(MONEY_SCALE)))
            .ok_or_else(|| ValidationError::AmountOutOfRange {
                message: format!("{} x {} periods", self, periods),
            })
    }

    /// addition that reports overflow instead of panicking
    pub fn checked_add(self, other: Money) -> Result<Self, ValidationError> {
        self.0
            .checked_add(other.0)
            .map(|sum| Money(sum.round_dp(MONEY_SCALE)))
            .ok_or_else(|| ValidationError::AmountOutOfRange {
                message: format!("{} + {}", self, other),
            })
    }

    /// subtraction that reports overflow instead of panicking
    pub fn checked_sub(self, other: Money) -> Result<Self, ValidationError> {
        self.0
            .checked_sub(other.0)
            .map(|difference| Money(difference.round_dp(MONEY_SCALE)))
            .ok_or_else(|| ValidationError::AmountOutOfRange {
                message: format!("{} - {}", self, other),
            })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fixed())
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money((self.0 / other).round_dp(MONEY_SCALE))
    }
}

/// rate type for the flat loan rate, as a fraction of the principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from decimal (e.g., 0.065 for 6.5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from percentage (e.g., 5 for 5%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::from(100))
    }

    /// get as decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// get as percentage
    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::from(100)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_display_has_two_places() {
        assert_eq!(Money::from_major(650).to_string(), "650.00");
        assert_eq!(Money::from_str_exact("541.666666").unwrap().to_string(), "541.67");
        assert_eq!(Money::from_str_exact("-12.5").unwrap().to_string(), "-12.50");
    }

    #[test]
    fn test_half_rounds_away_from_zero() {
        assert_eq!(to_fixed_2(dec!(0.125)), "0.13");
        assert_eq!(to_fixed_2(dec!(-0.125)), "-0.13");
        assert_eq!(Money::from_str_exact("2500.5").unwrap().to_whole(), Money::from_major(2501));
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert!(Money::from_f64(f64::NAN).is_err());
        assert!(Money::from_f64(f64::INFINITY).is_err());
        assert_eq!(Money::from_f64(1234.5).unwrap(), Money::from_str_exact("1234.5").unwrap());
    }

    #[test]
    fn test_sign_checks_ignore_zero() {
        assert!(!Money::ZERO.is_negative());
        assert!(!Money::ZERO.is_positive());
        assert!(Money::from(-1).is_negative());
        assert!(Money::from(500).is_positive());
    }

    #[test]
    fn test_times_and_add() {
        let monthly = Money::from_str_exact("833.33").unwrap();
        assert_eq!(monthly.times(3).unwrap(), Money::from_str_exact("2499.99").unwrap());
        assert_eq!(
            Money::from(10).checked_add(Money::from(15)).unwrap(),
            Money::from(25)
        );
        assert_eq!(
            Money::from(10).checked_sub(Money::from(15)).unwrap(),
            Money::from(-5)
        );
    }

    #[test]
    fn test_overflow_is_an_error() {
        let huge = Money::from_decimal(Decimal::MAX);
        assert!(matches!(
            huge.times(2),
            Err(ValidationError::AmountOutOfRange { .. })
        ));
        assert!(matches!(
            huge.checked_add(Money::from(1)),
            Err(ValidationError::AmountOutOfRange { .. })
        ));
        assert!(matches!(
            Money::from_decimal(Decimal::MIN).checked_sub(Money::from(1)),
            Err(ValidationError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_rate_display() {
        assert_eq!(Rate::from_decimal(dec!(0.065)).to_string(), "6.5%");
        assert_eq!(Rate::from_percentage(5).as_decimal(), dec!(0.05));
    }
}

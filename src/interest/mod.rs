pub mod flat;

use crate::decimal::Money;
use crate::errors::Result;

pub use flat::{FlatInterest, InterestCalculator};

/// per-period flat interest under the default policy, formatted to two places
///
/// `interest(12, 120000)` is `"650.00"`; a period of zero or less is a
/// validation error.
pub fn interest(repayment_period_months: i64, loan_amount: Money) -> Result<String> {
    InterestCalculator::default()
        .calculate(repayment_period_months, loan_amount)
        .map(|calculation| calculation.per_period_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{LoanError, ValidationError};

    #[test]
    fn test_interest_text() {
        assert_eq!(interest(12, Money::from_major(120_000)).unwrap(), "650.00");
        assert_eq!(interest(24, Money::from_major(50_000)).unwrap(), "260.42");
    }

    #[test]
    fn test_interest_zero_period() {
        let err = interest(0, Money::from_major(100_000)).unwrap_err();
        assert!(matches!(
            err,
            LoanError::Validation(ValidationError::InvalidRepaymentPeriod { months: 0 })
        ));
    }
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LoanError, Result};

/// lending rules applied by the calculators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanPolicy {
    /// days late after which an unfinished month still counts as overdue
    pub grace_period_days: u32,
    /// flat-rate divisor: total interest = amount * (months + 1) / divisor
    pub interest_divisor: Decimal,
    /// penalty pre-filled per overdue month
    pub penalty_per_overdue_month: Money,
    /// term assumed when projecting an end date for an open loan
    pub expected_term_months: u32,
    /// zero-padding applied to the sequence part of a loan reference
    pub reference_sequence_width: usize,
}

impl LoanPolicy {
    /// rules the cooperative currently runs with
    pub fn sacco_default() -> Self {
        Self {
            grace_period_days: 7,
            interest_divisor: dec!(200),
            penalty_per_overdue_month: Money::from_major(1_000),
            expected_term_months: 36,
            reference_sequence_width: 4,
        }
    }

    /// same rules without the late-payment penalty
    pub fn without_penalty() -> Self {
        Self {
            penalty_per_overdue_month: Money::ZERO,
            ..Self::sacco_default()
        }
    }

    /// load from JSON; missing fields fall back to the defaults
    pub fn from_json(raw: &str) -> Result<Self> {
        let policy: LoanPolicy = serde_json::from_str(raw)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        if self.interest_divisor <= Decimal::ZERO {
            return Err(LoanError::InvalidConfiguration {
                message: format!(
                    "interest divisor must be positive, got {}",
                    self.interest_divisor
                ),
            });
        }

        if self.penalty_per_overdue_month.is_negative() {
            return Err(LoanError::InvalidConfiguration {
                message: format!(
                    "penalty per overdue month cannot be negative, got {}",
                    self.penalty_per_overdue_month
                ),
            });
        }

        if self.reference_sequence_width == 0 {
            return Err(LoanError::InvalidConfiguration {
                message: "reference sequence width must be at least 1".to_string(),
            });
        }

        if self.expected_term_months == 0 {
            return Err(LoanError::InvalidConfiguration {
                message: "expected term must be at least one month".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self::sacco_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        let policy = LoanPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.grace_period_days, 7);
        assert_eq!(policy.interest_divisor, dec!(200));
        assert_eq!(policy.penalty_per_overdue_month, Money::from_major(1_000));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let policy = LoanPolicy::from_json(r#"{ "grace_period_days": 14 }"#).unwrap();
        assert_eq!(policy.grace_period_days, 14);
        assert_eq!(policy.reference_sequence_width, 4);
        assert_eq!(policy.expected_term_months, 36);
    }

    #[test]
    fn test_rejects_zero_divisor() {
        let err = LoanPolicy::from_json(r#"{ "interest_divisor": "0" }"#).unwrap_err();
        assert!(matches!(err, LoanError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_rejects_negative_penalty() {
        let mut policy = LoanPolicy::sacco_default();
        policy.penalty_per_overdue_month = Money::from(-5);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = LoanPolicy::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LoanError::Serialization(_)));
    }

    #[test]
    fn test_without_penalty() {
        let policy = LoanPolicy::without_penalty();
        assert!(policy.penalty_per_overdue_month.is_zero());
        assert_eq!(policy.grace_period_days, 7);
    }
}

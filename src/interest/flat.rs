use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LoanPolicy;
use crate::decimal::{to_fixed_2, Money, Rate};
use crate::errors::{Result, ValidationError};

/// flat-rate interest for a loan, split evenly over its repayment period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatInterest {
    pub loan_amount: Money,
    pub repayment_period_months: u32,
    /// total interest as a fraction of the principal
    pub flat_rate: Rate,
    /// interest over the whole period, unrounded
    pub total_interest: Money,
    /// interest charged each month, unrounded
    pub per_period: Money,
}

impl FlatInterest {
    /// per-period interest as shown on the payment form, e.g. "650.00"
    pub fn per_period_text(&self) -> String {
        to_fixed_2(self.per_period.as_decimal())
    }

    /// per-period interest rounded to cents
    pub fn per_period_cents(&self) -> Money {
        self.per_period.to_cents()
    }
}

/// computes `amount * (months + 1) / divisor`, spread over `months`
///
/// This is the cooperative's flat approximation: no compounding and no
/// reducing balance. Confirm with the product owner before changing it.
#[derive(Debug, Clone, Default)]
pub struct InterestCalculator {
    policy: LoanPolicy,
}

impl InterestCalculator {
    pub fn new(policy: LoanPolicy) -> Self {
        Self { policy }
    }

    pub fn calculate(&self, repayment_period_months: i64, loan_amount: Money) -> Result<FlatInterest> {
        if repayment_period_months <= 0 {
            warn!(
                "refusing interest for repayment period of {} months",
                repayment_period_months
            );
            return Err(ValidationError::InvalidRepaymentPeriod {
                months: repayment_period_months,
            }
            .into());
        }
        let months = u32::try_from(repayment_period_months).map_err(|_| {
            ValidationError::InvalidRepaymentPeriod {
                months: repayment_period_months,
            }
        })?;

        let out_of_range = || {
            warn!(
                "flat interest on {} over {} months does not fit a decimal",
                loan_amount, months
            );
            ValidationError::AmountOutOfRange {
                message: format!("interest on {} over {} months", loan_amount, months),
            }
        };

        let periods = Decimal::from(months);
        let flat_rate = (periods + Decimal::ONE)
            .checked_div(self.policy.interest_divisor)
            .ok_or_else(out_of_range)?;
        let raw_interest = loan_amount
            .as_decimal()
            .checked_mul(flat_rate)
            .ok_or_else(out_of_range)?;
        let per_period = raw_interest.checked_div(periods).ok_or_else(out_of_range)?;

        debug!(
            "flat interest on {} over {} months: total {}, per month {}",
            loan_amount,
            months,
            to_fixed_2(raw_interest),
            to_fixed_2(per_period)
        );

        Ok(FlatInterest {
            loan_amount,
            repayment_period_months: months,
            flat_rate: Rate::from_decimal(flat_rate),
            total_interest: Money::from_decimal(raw_interest),
            per_period: Money::from_decimal(per_period),
        })
    }
}

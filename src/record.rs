use chrono::{DateTime, FixedOffset, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::{add_months, iso_date};
use crate::config::LoanPolicy;
use crate::decimal::Money;
use crate::errors::{Result, ValidationError};
use crate::interest::{FlatInterest, InterestCalculator};
use crate::reference::format_reference_padded;
use crate::status::classify;
use crate::types::{DisplayStatus, LoanStatus, LoanType};

/// loan as returned by the member API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    // identification
    pub id: String,
    /// running number within the loan type, used in references
    #[serde(rename = "loanId")]
    pub sequence: u32,
    pub loan_type: LoanType,
    /// kept in the offset the API wrote it in, so the reference year matches the portal
    #[serde(with = "iso_date::with_offset")]
    pub application_date: DateTime<FixedOffset>,

    // terms
    pub loan_amount: Money,
    pub repayment_period: u32,

    // backend lifecycle
    pub loan_status: LoanStatus,
    #[serde(default, with = "iso_date::option")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, with = "iso_date::option")]
    pub next_due_date: Option<DateTime<Utc>>,
    #[serde(default, alias = "loanBalance")]
    pub balance: Option<Money>,
    #[serde(default)]
    pub written_off: bool,

    // free text
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl LoanRecord {
    /// parse a single record and check its terms
    pub fn from_json(raw: &str) -> Result<Self> {
        let record: LoanRecord = serde_json::from_str(raw)?;
        record.validate()?;
        Ok(record)
    }

    /// parse a list of records, failing on the first malformed one
    pub fn list_from_json(raw: &str) -> Result<Vec<Self>> {
        let records: Vec<LoanRecord> = serde_json::from_str(raw)?;
        for record in &records {
            record.validate()?;
        }
        Ok(records)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.loan_amount.is_positive() {
            return Err(ValidationError::InvalidLoanAmount {
                amount: self.loan_amount,
            }
            .into());
        }

        if self.repayment_period == 0 {
            return Err(ValidationError::InvalidRepaymentPeriod { months: 0 }.into());
        }

        Ok(())
    }

    /// remaining balance, zero when the API omitted it
    pub fn balance_or_zero(&self) -> Money {
        self.balance.unwrap_or(Money::ZERO)
    }

    /// status against the provider's clock
    pub fn display_status(&self, time_provider: &SafeTimeProvider) -> DisplayStatus {
        self.status_at(time_provider.now())
    }

    /// status at an explicit instant
    pub fn status_at(&self, now: DateTime<Utc>) -> DisplayStatus {
        classify(
            self.loan_status,
            self.completed_at,
            self.next_due_date,
            self.balance_or_zero(),
            self.written_off,
            now,
        )
    }

    pub fn reference(&self, policy: &LoanPolicy) -> Result<String> {
        format_reference_padded(
            &self.loan_type.alias,
            self.application_date,
            i64::from(self.sequence),
            policy.reference_sequence_width,
        )
    }

    /// principal due each month, rounded to whole shillings
    pub fn monthly_principal(&self) -> Result<Money> {
        self.validate()?;
        let monthly = self.loan_amount / Decimal::from(self.repayment_period);
        Ok(monthly.to_whole())
    }

    pub fn monthly_interest(&self, policy: &LoanPolicy) -> Result<FlatInterest> {
        InterestCalculator::new(policy.clone())
            .calculate(i64::from(self.repayment_period), self.loan_amount)
    }

    /// share of the principal already repaid, in percent with two places
    pub fn progress_percentage(&self) -> Result<Decimal> {
        self.validate()?;
        let repaid = self.loan_amount.checked_sub(self.balance_or_zero())?;
        let percent = repaid
            .as_decimal()
            .checked_div(self.loan_amount.as_decimal())
            .and_then(|share| share.checked_mul(Decimal::from(100)))
            .ok_or_else(|| ValidationError::AmountOutOfRange {
                message: format!("progress of {} repaid on {}", repaid, self.loan_amount),
            })?;
        Ok(percent.round_dp(2))
    }

    /// completion date for settled loans, otherwise the projected end of term
    pub fn expected_end_date(&self, status: DisplayStatus, policy: &LoanPolicy) -> DateTime<Utc> {
        match (status, self.completed_at) {
            (DisplayStatus::Completed, Some(completed_at)) => completed_at,
            _ => add_months(
                self.application_date.with_timezone(&Utc),
                policy.expected_term_months,
            ),
        }
    }

    /// members can only pay into approved loans
    pub fn can_make_payment(&self) -> bool {
        self.loan_status == LoanStatus::Approved
    }

    /// statements exist once money has moved
    pub fn has_statement(&self) -> bool {
        matches!(self.loan_status, LoanStatus::Approved | LoanStatus::Repaid)
    }
}

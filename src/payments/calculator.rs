use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::calendar::{parse_iso_date, whole_days_between, whole_months_between};
use crate::config::LoanPolicy;
use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::payments::quote::PaymentQuote;
use crate::record::LoanRecord;

/// amount due right now, catching up any missed months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    pub total_principal: Money,
    pub total_interest: Money,
    pub months_overdue: u32,
    pub is_overdue: bool,
}

impl PaymentBreakdown {
    /// number of installments this payment covers
    pub fn periods_covered(&self) -> u32 {
        self.months_overdue.saturating_add(1)
    }
}

/// works out what a member owes for the current installment
#[derive(Debug, Clone, Default)]
pub struct PaymentCalculator {
    policy: LoanPolicy,
}

impl PaymentCalculator {
    pub fn new(policy: LoanPolicy) -> Self {
        Self { policy }
    }

    /// months the installment is behind
    ///
    /// Whole calendar months since the due date, except that being more than
    /// `grace_period_days` late always counts as at least one month.
    pub fn overdue_months(&self, next_due_date: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
        if now <= next_due_date {
            return 0;
        }

        let months = whole_months_between(next_due_date, now);
        let days = whole_days_between(next_due_date, now);

        if months == 0 && days > self.policy.grace_period_days {
            debug!(
                "{} days late with no full month elapsed, counting one overdue month",
                days
            );
            return 1;
        }

        months
    }

    pub fn breakdown(
        &self,
        next_due_date: DateTime<Utc>,
        monthly_principal: Money,
        monthly_interest: Money,
        now: DateTime<Utc>,
    ) -> Result<PaymentBreakdown> {
        let months_overdue = self.overdue_months(next_due_date, now);
        let periods = months_overdue.saturating_add(1);

        Ok(PaymentBreakdown {
            total_principal: monthly_principal.times(periods)?.to_cents(),
            total_interest: monthly_interest.times(periods)?.to_cents(),
            months_overdue,
            is_overdue: months_overdue > 0,
        })
    }

    /// breakdown plus penalty and the total to pre-fill on the payment form
    pub fn quote(
        &self,
        next_due_date: DateTime<Utc>,
        monthly_principal: Money,
        monthly_interest: Money,
        now: DateTime<Utc>,
    ) -> Result<PaymentQuote> {
        let breakdown = self.breakdown(next_due_date, monthly_principal, monthly_interest, now)?;
        let penalty = self.policy.penalty_per_overdue_month.times(breakdown.months_overdue)?;
        let quote = PaymentQuote::new(breakdown, penalty, Money::ZERO)?;

        debug!(
            "quoted principal {} interest {} penalty {} total {} ({} months overdue)",
            quote.breakdown.total_principal,
            quote.breakdown.total_interest,
            quote.penalty,
            quote.total_payable,
            quote.breakdown.months_overdue
        );

        Ok(quote)
    }

    /// quote for a loan record, using its own installment figures
    ///
    /// A loan with no next due date is quoted as due now, so the member pays
    /// one installment.
    pub fn quote_for(&self, loan: &LoanRecord, time_provider: &SafeTimeProvider) -> Result<PaymentQuote> {
        if !loan.can_make_payment() {
            warn!("payment requested for loan {} in status {}", loan.id, loan.loan_status);
            return Err(LoanError::PaymentNotAllowed {
                status: loan.loan_status,
            });
        }

        let now = time_provider.now();
        let monthly_principal = loan.monthly_principal()?;
        let monthly_interest = loan.monthly_interest(&self.policy)?.per_period_cents();
        let next_due_date = loan.next_due_date.unwrap_or(now);

        self.quote(next_due_date, monthly_principal, monthly_interest, now)
    }
}

/// breakdown under the default seven-day grace rule
pub fn compute_payment(
    next_due_date: DateTime<Utc>,
    monthly_principal: Money,
    monthly_interest: Money,
    now: DateTime<Utc>,
) -> Result<PaymentBreakdown> {
    PaymentCalculator::default().breakdown(next_due_date, monthly_principal, monthly_interest, now)
}

/// same as `compute_payment` with the due date still in its API text form
pub fn compute_payment_from_str(
    next_due_date: &str,
    monthly_principal: Money,
    monthly_interest: Money,
    now: DateTime<Utc>,
) -> Result<PaymentBreakdown> {
    let due = parse_iso_date(next_due_date)?;
    compute_payment(due, monthly_principal, monthly_interest, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use crate::record::fixtures::approved_loan;
    use crate::types::LoanStatus;
    use chrono::{Duration, TimeZone};
    use hourglass_rs::TimeSource;
    use test_log::test;

    fn today() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_ten_days_late_counts_one_month() {
        let result = compute_payment(
            today() - Duration::days(10),
            Money::from_major(1_000),
            Money::from_major(200),
            today(),
        )
        .unwrap();

        assert_eq!(result.months_overdue, 1);
        assert_eq!(result.total_principal, Money::from_major(2_000));
        assert_eq!(result.total_interest, Money::from_major(400));
        assert_eq!(result.total_principal.to_string(), "2000.00");
        assert!(result.is_overdue);
    }

    #[test]
    fn test_future_due_date_is_one_period() {
        let result = compute_payment(
            today() + Duration::days(5),
            Money::from_major(1_000),
            Money::from_major(200),
            today(),
        )
        .unwrap();

        assert_eq!(result.months_overdue, 0);
        assert_eq!(result.total_principal, Money::from_major(1_000));
        assert_eq!(result.total_interest, Money::from_major(200));
        assert!(!result.is_overdue);
        assert_eq!(result.periods_covered(), 1);
    }

    #[test]
    fn test_within_grace_week() {
        let calculator = PaymentCalculator::default();
        assert_eq!(calculator.overdue_months(today() - Duration::days(7), today()), 0);
        assert_eq!(calculator.overdue_months(today() - Duration::days(3), today()), 0);
        assert_eq!(calculator.overdue_months(today() - Duration::days(8), today()), 1);
    }

    #[test]
    fn test_whole_calendar_months() {
        let due = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
        let calculator = PaymentCalculator::default();

        assert_eq!(calculator.overdue_months(due, today()), 3);

        let result = calculator
            .breakdown(
                due,
                Money::from_major(10_000),
                Money::from_str_exact("650.00").unwrap(),
                today(),
            )
            .unwrap();
        assert_eq!(result.total_principal, Money::from_major(40_000));
        assert_eq!(result.total_interest, Money::from_major(2_600));
    }

    #[test]
    fn test_one_month_and_a_bit() {
        // 40 days late is one full month, grace rule not needed
        let calculator = PaymentCalculator::default();
        assert_eq!(calculator.overdue_months(today() - Duration::days(40), today()), 1);
    }

    #[test]
    fn test_totals_round_to_cents() {
        let result = compute_payment(
            today() - Duration::days(70),
            Money::from_str_exact("833.333").unwrap(),
            Money::from_str_exact("541.6666").unwrap(),
            today(),
        )
        .unwrap();
        assert_eq!(result.months_overdue, 2);
        assert_eq!(result.total_principal, Money::from_str_exact("2500.00").unwrap());
        assert_eq!(result.total_interest, Money::from_str_exact("1625.00").unwrap());
    }

    #[test]
    fn test_custom_grace_period() {
        let mut policy = LoanPolicy::sacco_default();
        policy.grace_period_days = 14;
        let calculator = PaymentCalculator::new(policy);
        assert_eq!(calculator.overdue_months(today() - Duration::days(10), today()), 0);
        assert_eq!(calculator.overdue_months(today() - Duration::days(15), today()), 1);
    }

    #[test]
    fn test_same_clock_same_breakdown() {
        let time = SafeTimeProvider::new(TimeSource::Test(today()));
        let due = today() - Duration::days(45);

        let first = compute_payment(due, Money::from(1_000), Money::from(200), time.now()).unwrap();
        let second = compute_payment(due, Money::from(1_000), Money::from(200), time.now()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_str_due_date() {
        let result = compute_payment_from_str(
            "2024-06-05",
            Money::from(1_000),
            Money::from(200),
            today(),
        )
        .unwrap();
        assert_eq!(result.months_overdue, 1);

        let err = compute_payment_from_str("June fifth", Money::from(1_000), Money::from(200), today())
            .unwrap_err();
        assert!(matches!(
            err,
            LoanError::Validation(ValidationError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_quote_adds_penalty() {
        let calculator = PaymentCalculator::default();
        let quote = calculator
            .quote(
                today() - Duration::days(70),
                Money::from_major(1_000),
                Money::from_major(200),
                today(),
            )
            .unwrap();

        assert_eq!(quote.breakdown.months_overdue, 2);
        assert_eq!(quote.penalty, Money::from_major(2_000));
        assert_eq!(quote.insurance, Money::ZERO);
        assert_eq!(quote.total_payable, Money::from_major(3_000 + 600 + 2_000));
    }

    #[test]
    fn test_quote_for_record() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 7, 12, 0, 0, 0).unwrap(),
        ));
        let loan = approved_loan();

        let quote = PaymentCalculator::default().quote_for(&loan, &time).unwrap();
        assert_eq!(quote.breakdown.months_overdue, 1);
        assert_eq!(quote.breakdown.total_principal, Money::from_major(20_000));
        assert_eq!(quote.breakdown.total_interest, Money::from_major(1_300));
        assert_eq!(quote.penalty, Money::from_major(1_000));
    }

    #[test]
    fn test_quote_for_loan_without_due_date() {
        let time = SafeTimeProvider::new(TimeSource::Test(today()));
        let mut loan = approved_loan();
        loan.next_due_date = None;

        let quote = PaymentCalculator::default().quote_for(&loan, &time).unwrap();
        assert!(!quote.breakdown.is_overdue);
        assert_eq!(quote.breakdown.total_principal, Money::from_major(10_000));
        assert_eq!(quote.penalty, Money::ZERO);
    }

    #[test]
    fn test_quote_for_refuses_unapproved_loans() {
        let time = SafeTimeProvider::new(TimeSource::Test(today()));
        let mut loan = approved_loan();
        loan.loan_status = LoanStatus::Repaid;

        let err = PaymentCalculator::default().quote_for(&loan, &time).unwrap_err();
        assert!(matches!(
            err,
            LoanError::PaymentNotAllowed { status: LoanStatus::Repaid }
        ));
    }

    #[test]
    fn test_oversized_installment_is_an_error() {
        let huge = Money::from_decimal(rust_decimal::Decimal::MAX);
        let err = compute_payment(today() - Duration::days(70), huge, Money::from(200), today())
            .unwrap_err();
        assert!(matches!(
            err,
            LoanError::Validation(ValidationError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_quote_for_oversized_record_is_an_error() {
        let time = SafeTimeProvider::new(TimeSource::Test(today()));
        let mut loan = approved_loan();
        loan.loan_amount = Money::from_str_exact("10000000000000000000000").unwrap();
        loan.repayment_period = 4_000_000_000;
        assert!(loan.validate().is_ok());

        let err = PaymentCalculator::default().quote_for(&loan, &time).unwrap_err();
        assert!(matches!(
            err.as_validation(),
            Some(ValidationError::AmountOutOfRange { .. })
        ));
    }
}

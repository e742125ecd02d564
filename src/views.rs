//! serializable loan rows for tables and dashboards

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LoanPolicy;
use crate::decimal::Money;
use crate::errors::Result;
use crate::record::LoanRecord;
use crate::types::{DisplayStatus, StatusTone};

/// one row of the loans table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanView {
    pub id: String,
    pub reference: String,
    pub loan_type: String,
    pub status: DisplayStatus,
    pub status_label: String,
    pub tone: StatusTone,
    pub loan_amount: Money,
    pub balance: Money,
    pub monthly_payment: Money,
    pub monthly_interest: Money,
    pub progress: Decimal,
    pub next_due_date: Option<DateTime<Utc>>,
    pub expected_end_date: DateTime<Utc>,
    pub can_make_payment: bool,
    pub has_statement: bool,
}

impl LoanView {
    pub fn from_record(
        loan: &LoanRecord,
        policy: &LoanPolicy,
        time_provider: &SafeTimeProvider,
    ) -> Result<Self> {
        let status = loan.display_status(time_provider);

        Ok(LoanView {
            id: loan.id.clone(),
            reference: loan.reference(policy)?,
            loan_type: loan.loan_type.name.clone(),
            status,
            status_label: status.label().to_string(),
            tone: status.tone(),
            loan_amount: loan.loan_amount,
            balance: loan.balance_or_zero(),
            monthly_payment: loan.monthly_principal()?,
            monthly_interest: loan.monthly_interest(policy)?.per_period_cents(),
            progress: loan.progress_percentage()?,
            next_due_date: loan.next_due_date,
            expected_end_date: loan.expected_end_date(status, policy),
            can_make_payment: loan.can_make_payment(),
            has_statement: loan.has_statement(),
        })
    }
}

/// member-level totals over all loans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub as_of: DateTime<Utc>,
    pub loan_count: usize,
    pub by_status: BTreeMap<DisplayStatus, usize>,
    /// sum of positive balances; overpayments do not offset other loans
    pub total_outstanding: Money,
    pub overdue_count: usize,
    pub next_due_date: Option<DateTime<Utc>>,
}

impl PortfolioSummary {
    pub fn from_loans(loans: &[LoanRecord], time_provider: &SafeTimeProvider) -> Result<Self> {
        let now = time_provider.now();
        let mut by_status = BTreeMap::new();
        let mut total_outstanding = Money::ZERO;
        let mut next_due_date: Option<DateTime<Utc>> = None;

        for loan in loans {
            let status = loan.status_at(now);
            *by_status.entry(status).or_insert(0) += 1;

            if status.is_open() {
                total_outstanding =
                    total_outstanding.checked_add(loan.balance_or_zero().max(Money::ZERO))?;
            }

            if status == DisplayStatus::Active {
                if let Some(due) = loan.next_due_date.filter(|due| *due >= now) {
                    next_due_date = Some(next_due_date.map_or(due, |current| current.min(due)));
                }
            }
        }

        Ok(PortfolioSummary {
            as_of: now,
            loan_count: loans.len(),
            overdue_count: by_status.get(&DisplayStatus::Overdue).copied().unwrap_or(0),
            by_status,
            total_outstanding,
            next_due_date,
        })
    }

    pub fn count(&self, status: DisplayStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

use chrono::{DateTime, Utc};
use log::trace;

use crate::decimal::Money;
use crate::types::{DisplayStatus, LoanStatus};

/// project the backend fields of a loan onto the status shown to the member
///
/// Rules are checked in order and the first match wins, so a settled loan is
/// never reported overdue and a loan past its due date is reported overdue
/// even while it is otherwise active:
///
/// 1. `completed_at` set, status `repaid` or a negative balance: `Completed`
/// 2. `next_due_date` strictly before `now`: `Overdue`
/// 3. approved with a positive balance and not written off: `Active`
/// 4. `pending`: `Pending`
/// 5. `rejected`: `Rejected`
/// 6. written off: `WrittenOff`
/// 7. anything else: `Unknown`
///
/// The result depends on `now`; the same record flips from `Active` to
/// `Overdue` once its due date passes.
pub fn classify(
    loan_status: LoanStatus,
    completed_at: Option<DateTime<Utc>>,
    next_due_date: Option<DateTime<Utc>>,
    balance: Money,
    written_off: bool,
    now: DateTime<Utc>,
) -> DisplayStatus {
    let status = if completed_at.is_some()
        || loan_status == LoanStatus::Repaid
        || balance.is_negative()
    {
        DisplayStatus::Completed
    } else if next_due_date.map_or(false, |due| due < now) {
        DisplayStatus::Overdue
    } else if loan_status == LoanStatus::Approved && balance.is_positive() && !written_off {
        DisplayStatus::Active
    } else if loan_status == LoanStatus::Pending {
        DisplayStatus::Pending
    } else if loan_status == LoanStatus::Rejected {
        DisplayStatus::Rejected
    } else if written_off {
        DisplayStatus::WrittenOff
    } else {
        DisplayStatus::Unknown
    };

    trace!(
        "classified loan_status={} balance={} written_off={} as {}",
        loan_status, balance, written_off, status
    );

    status
}

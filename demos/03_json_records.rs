/// json records - turn an API response into table rows and a dashboard summary
use chrono::{TimeZone, Utc};
use sacco_loans::{LoanPolicy, LoanRecord, LoanView, PortfolioSummary, SafeTimeProvider, TimeSource};

const LOANS: &str = r#"[
    {
        "id": "1", "loanId": 7,
        "loanType": { "name": "Business Loan", "alias": "biz" },
        "applicationDate": "2024-03-01", "loanAmount": 120000, "repaymentPeriod": 12,
        "loanStatus": "approved", "nextDueDate": "2024-07-01", "loanBalance": 90000,
        "writtenOff": false
    },
    {
        "id": "2", "loanId": 2,
        "loanType": { "name": "School Fees", "alias": "sch" },
        "applicationDate": "2023-01-15", "loanAmount": 45000, "repaymentPeriod": 9,
        "loanStatus": "repaid", "completedAt": "2023-10-15T12:00:00Z", "loanBalance": 0,
        "writtenOff": false
    },
    {
        "id": "3", "loanId": 1,
        "loanType": { "name": "Asset Finance", "alias": "ast" },
        "applicationDate": "2024-06-01", "loanAmount": 200000, "repaymentPeriod": 24,
        "loanStatus": "pending", "writtenOff": false
    }
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 6, 20, 0, 0, 0).unwrap()
    ));
    let policy = LoanPolicy::default();
    let loans = LoanRecord::list_from_json(LOANS)?;

    for loan in &loans {
        let view = LoanView::from_record(loan, &policy, &time)?;
        println!(
            "{:<15} {:<18} {:>10} {:>6}%",
            view.reference, view.status_label, view.balance, view.progress
        );
    }

    let summary = PortfolioSummary::from_loans(&loans, &time)?;
    println!("\n{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

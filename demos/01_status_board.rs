/// status board - the same loan seen at different points in time
use chrono::{Duration, TimeZone, Utc};
use log::LevelFilter;
use sacco_loans::{LoanRecord, SafeTimeProvider, TimeSource};
use simple_logger::SimpleLogger;

const LOAN: &str = r#"{
    "id": "a41e",
    "loanId": 12,
    "loanType": { "name": "Development Loan", "alias": "dev" },
    "applicationDate": "2024-01-10T00:00:00.000Z",
    "loanAmount": 60000,
    "repaymentPeriod": 6,
    "loanStatus": "approved",
    "nextDueDate": "2024-03-10",
    "loanBalance": 40000,
    "writtenOff": false
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new().with_level(LevelFilter::Trace).init()?;

    let loan = LoanRecord::from_json(LOAN)?;

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    for _ in 0..4 {
        let status = loan.display_status(&time);
        println!(
            "{}  {:<16} {}",
            time.now().format("%Y-%m-%d"),
            status.label(),
            if status.is_open() { "collecting" } else { "-" }
        );
        controller.advance(Duration::days(7));
    }

    Ok(())
}

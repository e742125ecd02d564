/// payment dialog - quote and pre-fill a payment for an overdue loan
use chrono::{TimeZone, Utc};
use log::LevelFilter;
use sacco_loans::{
    LoanPolicy, LoanRecord, PaymentCalculator, PaymentDraft, PaymentMethod, SafeTimeProvider,
    TimeSource,
};
use simple_logger::SimpleLogger;

const LOAN: &str = r#"{
    "id": "77c0",
    "loanId": 3,
    "loanType": { "name": "Emergency Loan", "alias": "emg" },
    "applicationDate": "2024-02-01",
    "loanAmount": 30000,
    "repaymentPeriod": 3,
    "loanStatus": "approved",
    "nextDueDate": "2024-04-01",
    "balance": 20000,
    "writtenOff": false
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new().with_level(LevelFilter::Debug).init()?;

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 5, 20, 8, 0, 0).unwrap()
    ));
    let loan = LoanRecord::from_json(LOAN)?;
    let policy = LoanPolicy::sacco_default();

    println!("loan {} is {}", loan.reference(&policy)?, loan.display_status(&time));

    let calculator = PaymentCalculator::new(policy);
    let quote = calculator.quote_for(&loan, &time)?;
    println!("{}", serde_json::to_string_pretty(&quote)?);

    let draft = PaymentDraft::from_quote(loan.id.clone(), &quote).with_method(PaymentMethod::Mpesa);
    println!("pay {} with reference {}", draft.total_payable()?, draft.payment_reference);

    Ok(())
}

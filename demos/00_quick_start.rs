/// quick start - the four loan calculations on their own
use chrono::{Duration, TimeZone, Utc};
use sacco_loans::{classify, compute_payment, format_reference, interest, LoanStatus, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap();

    // 120,000 over 12 months
    let monthly_interest = interest(12, Money::from_major(120_000))?;
    println!("monthly interest: {}", monthly_interest);

    // installment due ten days ago
    let breakdown = compute_payment(
        now - Duration::days(10),
        Money::from_major(10_000),
        Money::from_str_exact(&monthly_interest)?,
        now,
    )?;
    println!(
        "due now: principal {} interest {} ({} months overdue)",
        breakdown.total_principal, breakdown.total_interest, breakdown.months_overdue
    );

    let status = classify(
        LoanStatus::Approved,
        None,
        Some(now - Duration::days(10)),
        Money::from_major(90_000),
        false,
        now,
    );
    println!("status: {}", status);

    let applied = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    println!("reference: {}", format_reference("biz", applied, 7)?);

    Ok(())
}

pub mod calendar;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod payments;
pub mod record;
pub mod reference;
pub mod status;
pub mod types;
pub mod views;

// re-export key types
pub use calendar::{parse_iso_date, parse_iso_date_with_offset};
pub use config::LoanPolicy;
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result, ValidationError};
pub use interest::{interest, FlatInterest, InterestCalculator};
pub use payments::{
    compute_payment, compute_payment_from_str, PaymentBreakdown, PaymentCalculator,
    PaymentDraft, PaymentQuote,
};
pub use record::LoanRecord;
pub use reference::{format_reference, format_reference_padded, sequence_from_f64};
pub use status::classify;
pub use types::{DisplayStatus, LoanStatus, LoanType, PaymentMethod, StatusTone};
pub use views::{LoanView, PortfolioSummary};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;

pub mod calculator;
pub mod quote;

pub use calculator::{compute_payment, compute_payment_from_str, PaymentBreakdown, PaymentCalculator};
pub use quote::{PaymentDraft, PaymentQuote};

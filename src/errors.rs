use thiserror::Error;

use crate::decimal::Money;
use crate::types::LoanStatus;

/// precondition violations on loan inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("invalid repayment period: {months} months, must be greater than zero")]
    InvalidRepaymentPeriod {
        months: i64,
    },

    #[error("invalid loan amount: {amount}, must be greater than zero")]
    InvalidLoanAmount {
        amount: Money,
    },

    #[error("amount is not a finite number: {value}")]
    NonFiniteAmount {
        value: f64,
    },

    #[error("amount out of range: {message}")]
    AmountOutOfRange {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid loan sequence number: {value}")]
    InvalidSequenceNumber {
        value: String,
    },
}

#[derive(Error, Debug)]
pub enum LoanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("loan does not accept payments in status {status}")]
    PaymentNotAllowed {
        status: LoanStatus,
    },

    #[error("malformed loan data: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LoanError {
    /// the validation failure behind this error, if any
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            LoanError::Validation(inner) => Some(inner),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;

use serde::{Deserialize, Serialize};
use std::fmt;

/// lifecycle state owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// application awaiting approval
    Pending,
    /// disbursed and being repaid
    Approved,
    /// application declined
    Rejected,
    /// fully paid off
    Repaid,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "pending",
            LoanStatus::Approved => "approved",
            LoanStatus::Rejected => "rejected",
            LoanStatus::Repaid => "repaid",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// status shown to the member, derived from the record on every evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayStatus {
    Completed,
    Overdue,
    Active,
    Pending,
    Rejected,
    WrittenOff,
    Unknown,
}

impl DisplayStatus {
    pub const ALL: [DisplayStatus; 7] = [
        DisplayStatus::Completed,
        DisplayStatus::Overdue,
        DisplayStatus::Active,
        DisplayStatus::Pending,
        DisplayStatus::Rejected,
        DisplayStatus::WrittenOff,
        DisplayStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::Completed => "completed",
            DisplayStatus::Overdue => "overdue",
            DisplayStatus::Active => "active",
            DisplayStatus::Pending => "pending",
            DisplayStatus::Rejected => "rejected",
            DisplayStatus::WrittenOff => "written-off",
            DisplayStatus::Unknown => "unknown",
        }
    }

    /// badge text
    pub fn label(&self) -> &'static str {
        match self {
            DisplayStatus::Pending => "Pending Approval",
            DisplayStatus::Completed => "Completed",
            other => other.as_str(),
        }
    }

    /// badge colour family
    pub fn tone(&self) -> StatusTone {
        match self {
            DisplayStatus::Completed => StatusTone::Success,
            DisplayStatus::Active | DisplayStatus::Pending => StatusTone::Info,
            DisplayStatus::Overdue => StatusTone::Error,
            DisplayStatus::WrittenOff => StatusTone::Secondary,
            DisplayStatus::Rejected => StatusTone::Warning,
            DisplayStatus::Unknown => StatusTone::Default,
        }
    }

    /// still carries a balance the member is expected to pay
    pub fn is_open(&self) -> bool {
        matches!(self, DisplayStatus::Active | DisplayStatus::Overdue)
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// visual tone of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Success,
    Info,
    Error,
    Secondary,
    Warning,
    Default,
}

/// how a member pays an installment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    #[default]
    Mpesa,
    Cheque,
    Bank,
}

/// loan product as embedded in a loan record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanType {
    pub name: String,
    /// short code used in loan references, e.g. "biz"
    pub alias: String,
}

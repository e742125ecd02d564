use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::Result;
use crate::payments::calculator::PaymentBreakdown;
use crate::types::PaymentMethod;

/// what the payment dialog opens with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuote {
    #[serde(flatten)]
    pub breakdown: PaymentBreakdown,
    pub penalty: Money,
    pub insurance: Money,
    pub total_payable: Money,
}

impl PaymentQuote {
    pub fn new(breakdown: PaymentBreakdown, penalty: Money, insurance: Money) -> Result<Self> {
        let total_payable = breakdown
            .total_principal
            .checked_add(breakdown.total_interest)?
            .checked_add(penalty)?
            .checked_add(insurance)?;
        Ok(Self {
            breakdown,
            penalty,
            insurance,
            total_payable,
        })
    }
}

/// editable payment form, pre-filled from a quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraft {
    pub loan_id: String,
    pub payment_method: PaymentMethod,
    pub principal_amount: Money,
    pub interest_amount: Money,
    pub penalty_amount: Money,
    pub insurance: Money,
    pub payment_reference: String,
}

impl PaymentDraft {
    pub fn from_quote(loan_id: impl Into<String>, quote: &PaymentQuote) -> Self {
        Self {
            loan_id: loan_id.into(),
            payment_method: PaymentMethod::default(),
            principal_amount: quote.breakdown.total_principal,
            interest_amount: quote.breakdown.total_interest,
            penalty_amount: quote.penalty,
            insurance: quote.insurance,
            payment_reference: format!("payment-{}", Uuid::new_v4()),
        }
    }

    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    /// sum of the editable fields, recomputed as the member changes them
    pub fn total_payable(&self) -> Result<Money> {
        Ok(self
            .principal_amount
            .checked_add(self.interest_amount)?
            .checked_add(self.penalty_amount)?
            .checked_add(self.insurance)?)
    }
}

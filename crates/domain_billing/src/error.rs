//! Billing domain errors

use thiserror::Error;

use core_kernel::{Money, MoneyError, PortError, ValidationErrors};

use crate::invoice::InvoiceStatus;

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// Operation not legal in the invoice's current status
    #[error("Cannot {action} invoice in {status} state")]
    InvalidTransition {
        status: InvoiceStatus,
        action: &'static str,
    },

    /// Sending requires at least one line item
    #[error("Cannot send an invoice without line items")]
    NoLineItems,

    /// The operation was refused for another reason
    #[error("{0}")]
    Precondition(String),

    /// A payment would leave a negative remainder; only the backend decides
    #[error("Payment exceeds balance by {excess}; outcome decided by the server")]
    UndeterminedOutcome {
        excess: Money,
    },

    /// User input was rejected before any request was sent
    #[error("Invalid input: {0}")]
    Invalid(ValidationErrors),

    /// Status string not recognized
    #[error("Unknown invoice status: {0}")]
    UnknownStatus(String),

    /// Calculation error
    #[error("Calculation error: {0}")]
    Calculation(#[from] MoneyError),

    /// Invoice not found
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    /// Payment not found
    #[error("Payment not found: {0}")]
    PaymentNotFound(String),
}

impl BillingError {
    /// Creates a Precondition error with a message
    pub fn precondition(message: impl Into<String>) -> Self {
        BillingError::Precondition(message.into())
    }

    pub fn invalid_transition(status: InvoiceStatus, action: &'static str) -> Self {
        BillingError::InvalidTransition { status, action }
    }

    pub fn invoice_not_found(id: impl std::fmt::Display) -> Self {
        BillingError::InvoiceNotFound(id.to_string())
    }

    pub fn payment_not_found(id: impl std::fmt::Display) -> Self {
        BillingError::PaymentNotFound(id.to_string())
    }
}

impl From<ValidationErrors> for BillingError {
    fn from(errors: ValidationErrors) -> Self {
        BillingError::Invalid(errors)
    }
}

impl From<BillingError> for PortError {
    fn from(error: BillingError) -> Self {
        match error {
            BillingError::Invalid(errors) => PortError::validation(errors),
            BillingError::InvoiceNotFound(id) => PortError::not_found("Invoice", id),
            BillingError::PaymentNotFound(id) => PortError::not_found("Payment", id),
            BillingError::UnknownStatus(status) => PortError::Transformation {
                message: format!("Unknown invoice status: {}", status),
            },
            other => PortError::precondition(other.to_string()),
        }
    }
}

//! User-facing action errors
//!
//! Every action returns `ActionError` on failure. Messages coming from the
//! server are kept verbatim; field errors are kept separately so the view
//! can show them next to the inputs.

use serde::Serialize;
use thiserror::Error;

use core_kernel::{ErrorKind, MoneyError, PortError, ValidationErrors};
use domain_billing::BillingError;
use domain_customer::CustomerError;
use infra_http::HttpError;

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to continue";
pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong on the server. Please try again.";

/// Failure of a user action
#[derive(Debug, Clone, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ActionError {
    #[serde(skip)]
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "ValidationErrors::is_empty")]
    pub field_errors: ValidationErrors,
}

impl ActionError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: ValidationErrors::new(),
        }
    }

    pub fn login_required() -> Self {
        Self::new(ErrorKind::Auth, LOGIN_REQUIRED_MESSAGE)
    }

    /// True when the view must return to the login entry point
    pub fn requires_login(&self) -> bool {
        self.kind == ErrorKind::Auth
    }

    /// Message to show next to a form input
    pub fn field(&self, name: &str) -> Option<&str> {
        self.field_errors.for_field(name)
    }
}

impl From<ValidationErrors> for ActionError {
    fn from(errors: ValidationErrors) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: errors
                .first_message()
                .unwrap_or("Validation failed")
                .to_string(),
            field_errors: errors,
        }
    }
}

impl From<PortError> for ActionError {
    fn from(error: PortError) -> Self {
        let kind = error.kind();
        let message = match &error {
            PortError::Server { message, .. } if message.trim().is_empty() => {
                SERVER_ERROR_MESSAGE.to_string()
            }
            PortError::Transformation { .. } => SERVER_ERROR_MESSAGE.to_string(),
            other => other.message(),
        };
        Self {
            kind,
            message,
            field_errors: error.field_errors(),
        }
    }
}

impl From<BillingError> for ActionError {
    fn from(error: BillingError) -> Self {
        PortError::from(error).into()
    }
}

impl From<MoneyError> for ActionError {
    fn from(error: MoneyError) -> Self {
        BillingError::from(error).into()
    }
}

impl From<CustomerError> for ActionError {
    fn from(error: CustomerError) -> Self {
        PortError::from(error).into()
    }
}

/// Failure while starting the client
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Client(#[from] HttpError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_billing::InvoiceStatus;

    #[test]
    fn test_validation_errors_keep_every_field() {
        let mut errors = ValidationErrors::new();
        errors.add("quantity", "Quantity must be greater than zero");
        errors.add("unitPrice", "Unit price must be greater than zero");

        let action: ActionError = errors.into();
        assert_eq!(action.kind, ErrorKind::Validation);
        assert_eq!(action.message, "Quantity must be greater than zero");
        assert!(action.field("unitPrice").is_some());
    }

    #[test]
    fn test_server_message_is_verbatim() {
        let action: ActionError =
            PortError::precondition("Payment amount cannot exceed invoice balance").into();
        assert_eq!(action.kind, ErrorKind::PreconditionFailed);
        assert_eq!(action.to_string(), "Payment amount cannot exceed invoice balance");
    }

    #[test]
    fn test_illegal_transition_is_precondition() {
        let action: ActionError =
            BillingError::invalid_transition(InvoiceStatus::Paid, "send").into();
        assert_eq!(action.kind, ErrorKind::PreconditionFailed);
        assert!(!action.requires_login());
    }

    #[test]
    fn test_auth_requires_login() {
        let action: ActionError = PortError::unauthorized("expired").into();
        assert!(action.requires_login());
        assert!(ActionError::login_required().requires_login());
    }

    #[test]
    fn test_undecodable_response_gets_generic_message() {
        let action: ActionError = PortError::Transformation {
            message: "missing field `status`".to_string(),
        }
        .into();
        assert_eq!(action.message, SERVER_ERROR_MESSAGE);
    }
}

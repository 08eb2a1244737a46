//! Customer domain errors

use thiserror::Error;

use core_kernel::{PortError, ValidationErrors};

/// Errors that can occur in the customer domain
#[derive(Debug, Error)]
pub enum CustomerError {
    /// Form input was rejected before any request was sent
    #[error("Invalid customer data: {0}")]
    Invalid(ValidationErrors),

    /// Another customer already uses this email address
    #[error("Duplicate customer email: {0}")]
    DuplicateEmail(String),

    /// Customer with the given ID was not found
    #[error("Customer not found: {0}")]
    NotFound(String),
}

impl CustomerError {
    /// Creates a NotFound error from any ID type
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        CustomerError::NotFound(id.to_string())
    }
}

impl From<ValidationErrors> for CustomerError {
    fn from(errors: ValidationErrors) -> Self {
        CustomerError::Invalid(errors)
    }
}

impl From<CustomerError> for PortError {
    fn from(error: CustomerError) -> Self {
        match error {
            CustomerError::Invalid(errors) => PortError::validation(errors),
            CustomerError::DuplicateEmail(_) => {
                PortError::conflict("Email already exists", Some("email".to_string()))
            }
            CustomerError::NotFound(id) => PortError::not_found("Customer", id),
        }
    }
}

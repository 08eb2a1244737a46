//! Customer records and form validation
//!
//! # Validation Rules
//!
//! - Name must be non-empty after trimming
//! - Email must be non-empty after trimming
//! - Email must have a valid address shape
//!
//! Uniqueness of the email address is enforced by the backend and reported
//! as a conflict on the `email` field.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use core_kernel::{CustomerId, ValidationErrors};

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email must be valid";

/// A customer as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Customer {
    /// Label used in pickers, e.g. `Acme Corp (billing@acme.test)`
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.email)
    }
}

/// Raw user input for creating or updating a customer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
}

/// Input that passed validation, trimmed and ready to send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidCustomerForm {
    pub name: String,
    pub email: String,
}

impl CustomerForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Pre-fills the edit form from an existing customer
    pub fn from_customer(customer: &Customer) -> Self {
        Self::new(customer.name.clone(), customer.email.clone())
    }

    /// Validates every field, collecting one message per failing field
    pub fn validate(&self) -> Result<ValidCustomerForm, ValidationErrors> {
        let name = self.name.trim();
        let email = self.email.trim();
        let mut errors = ValidationErrors::new();

        if name.is_empty() {
            errors.add("name", NAME_REQUIRED);
        }

        if email.is_empty() {
            errors.add("email", EMAIL_REQUIRED);
        } else if !email.validate_email() {
            errors.add("email", EMAIL_INVALID);
        }

        errors.into_result(ValidCustomerForm {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

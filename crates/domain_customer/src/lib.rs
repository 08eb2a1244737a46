//! Customer Domain
//!
//! Customers are the parties invoices are addressed to. The backend owns
//! every customer record; this crate holds the client-side view of a
//! customer, the form validation applied before any request is sent, and
//! the port through which customers are created, read, updated and deleted.
//!
//! # Examples
//!
//! ```rust
//! use domain_customer::CustomerForm;
//!
//! let form = CustomerForm::new("  Acme Corp ", "billing@acme.test");
//! let valid = form.validate().unwrap();
//! assert_eq!(valid.name, "Acme Corp");
//!
//! let errors = CustomerForm::new("Acme", "invalid-email").validate().unwrap_err();
//! assert_eq!(errors.for_field("email"), Some("Email must be valid"));
//! ```

pub mod customer;
pub mod error;
pub mod ports;

pub use customer::{Customer, CustomerForm, ValidCustomerForm};
pub use error::CustomerError;
pub use ports::CustomerPort;

#[cfg(any(test, feature = "mock"))]
pub use ports::mock;

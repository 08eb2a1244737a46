//! Billing Domain - Invoice Lifecycle
//!
//! This crate holds the invoice lifecycle model the client observes and
//! displays: which operations are legal in which status, how the balance is
//! derived from line items and payments, and the status that results from
//! each operation.
//!
//! # Lifecycle
//!
//! - **DRAFT**: created empty; line items may be added
//! - **SENT**: no more line items; payments may be recorded
//! - **PAID**: balance reached zero; terminal
//!
//! # Balance
//!
//! `balance = Σ(quantity × unit price) − Σ(payment amounts)`
//!
//! The backend is the system of record. Predictions made here are shown
//! immediately and replaced by the refetched server value.
//!
//! # Example
//!
//! ```rust
//! use core_kernel::{CustomerId, InvoiceId, Money};
//! use domain_billing::lifecycle::{can_send, project_line_item};
//! use domain_billing::validation::LineItemForm;
//! use domain_billing::Invoice;
//!
//! let invoice = Invoice::draft(InvoiceId::new(), CustomerId::new());
//! assert!(!can_send(&invoice));
//!
//! let item = LineItemForm::new("Item 1", "2", "10.00").validate().unwrap();
//! let projected = project_line_item(&invoice, &item).unwrap();
//! assert!(can_send(&projected));
//! assert_eq!(projected.balance.to_string(), "$20.00");
//! ```

pub mod error;
pub mod invoice;
pub mod lifecycle;
pub mod payment;
pub mod ports;
pub mod validation;

pub use error::BillingError;
pub use invoice::{Invoice, InvoiceStatus, LineItem};
pub use lifecycle::{
    can_add_line_item, can_record_payment, can_send, compute_balance, next_status,
    suggested_payment_amount, AvailableActions, InvoiceEvent, PaymentPrediction,
};
pub use payment::Payment;
pub use ports::{InvoicePort, InvoiceQuery, PaymentPort, PaymentPortExt};
pub use validation::{LineItemForm, NewLineItem, NewPayment, PaymentForm};

#[cfg(any(test, feature = "mock"))]
pub use ports::mock;

//! Core Kernel - Foundational types and utilities for the invoicing client
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Typed identifiers for customers, invoices, line items and payments
//! - Naive timestamp helpers for payment dates
//! - Field-level validation errors and the port error taxonomy
//! - The explicit authenticated session

pub mod error;
pub mod identifiers;
pub mod money;
pub mod ports;
pub mod session;
pub mod temporal;

pub use error::{FieldError, ValidationErrors};
pub use identifiers::{CustomerId, InvoiceId, LineItemId, PaymentId};
pub use money::{Money, MoneyError};
pub use ports::{DomainPort, ErrorKind, Fetched, PartialResults, PortError};
pub use session::{AuthPort, LoginResponse, Session, SessionSnapshot};
pub use temporal::{naive_timestamp, strip_to_naive, TemporalError};

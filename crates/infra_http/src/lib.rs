//! HTTP Infrastructure Layer
//!
//! This crate implements the domain ports against the invoicing REST API
//! using `reqwest`. It owns everything that knows about the wire: URLs,
//! JSON bodies, the bearer header and the mapping from HTTP statuses to
//! [`PortError`](core_kernel::PortError).
//!
//! # Architecture
//!
//! - [`client`]: shared client carrying the base URL, timeout and session
//! - [`resources`]: request and response bodies
//! - [`adapters`]: one port implementation per resource
//! - [`error`]: HTTP failures and their port error mapping
//!
//! # Example
//!
//! ```rust,no_run
//! use core_kernel::Session;
//! use domain_billing::{InvoicePort, InvoiceQuery};
//! use infra_http::{ApiClient, HttpClientConfig, HttpInvoiceAdapter};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(HttpClientConfig::default(), Session::new())?;
//! let invoices = HttpInvoiceAdapter::new(client);
//! let drafts = invoices.list_invoices(InvoiceQuery::all()).await?;
//! # let _ = drafts;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod client;
pub mod error;
pub mod resources;

pub use adapters::{HttpAuthAdapter, HttpCustomerAdapter, HttpInvoiceAdapter, HttpPaymentAdapter};
pub use client::{ApiClient, HttpClientConfig};
pub use error::{ApiErrorBody, HttpError};

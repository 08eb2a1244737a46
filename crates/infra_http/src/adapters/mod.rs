//! Port adapters
//!
//! Each adapter implements one domain port over the shared [`ApiClient`]:
//! it serializes the request resource, calls the endpoint and converts the
//! response resource back into the domain type.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_http::{ApiClient, HttpClientConfig, HttpInvoiceAdapter};
//! use domain_billing::InvoicePort;
//!
//! let client = ApiClient::new(HttpClientConfig::default(), session)?;
//! let invoices = HttpInvoiceAdapter::new(client);
//! let invoice = invoices.get_invoice(invoice_id).await?;
//! ```
//!
//! [`ApiClient`]: crate::ApiClient

pub mod auth;
pub mod customer;
pub mod invoice;
pub mod payment;

pub use auth::HttpAuthAdapter;
pub use customer::HttpCustomerAdapter;
pub use invoice::HttpInvoiceAdapter;
pub use payment::HttpPaymentAdapter;

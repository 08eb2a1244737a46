//! Wire resources
//!
//! Request and response bodies exactly as the API exchanges them
//! (camelCase, amounts as JSON numbers, naive timestamps). Each response
//! resource converts into its domain type; anything the domain cannot
//! accept becomes a `HttpError::Decode`.

pub mod auth;
pub mod customer;
pub mod invoice;
pub mod payment;

pub use auth::CredentialsRequest;
pub use customer::{CustomerRequest, CustomerResource};
pub use invoice::{AddLineItemRequest, CreateInvoiceRequest, InvoiceResource, LineItemResource};
pub use payment::{PaymentResource, RecordPaymentRequest};

//! Billing Domain Ports
//!
//! `InvoicePort` and `PaymentPort` define the invoice and payment resources
//! the client depends on. Adapters:
//!
//! - **HTTP Adapter**: Calls the remote API (infra_http)
//! - **Mock Adapter**: [`mock::InMemoryBilling`], an in-memory backend that
//!   enforces the same rules as the real one
//!
//! # Batch reads
//!
//! [`PaymentPortExt::list_payments_for`] fetches payments for many invoices
//! concurrently. A failure for one invoice is recorded as
//! [`Fetched::Unavailable`] for that invoice only.

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, warn};

use core_kernel::{CustomerId, DomainPort, Fetched, InvoiceId, PartialResults, PaymentId, PortError};

use crate::invoice::{Invoice, InvoiceStatus};
use crate::payment::Payment;
use crate::validation::{NewLineItem, NewPayment};

/// Filters for listing invoices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvoiceQuery {
    pub customer_id: Option<CustomerId>,
    pub status: Option<InvoiceStatus>,
}

impl InvoiceQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_customer(customer_id: CustomerId) -> Self {
        Self {
            customer_id: Some(customer_id),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Query string pairs; absent filters are omitted
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(customer_id) = self.customer_id {
            pairs.push(("customerId", customer_id.as_uuid().to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs
    }

    pub fn matches(&self, invoice: &Invoice) -> bool {
        self.customer_id.map_or(true, |id| invoice.customer_id == id)
            && self.status.map_or(true, |status| invoice.status == status)
    }
}

/// The port trait for invoice resource operations
#[async_trait]
pub trait InvoicePort: DomainPort {
    /// Creates a DRAFT invoice with no line items
    async fn create_invoice(&self, customer_id: CustomerId) -> Result<Invoice, PortError>;

    /// Retrieves an invoice by ID
    async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, PortError>;

    /// Lists invoices matching the query
    async fn list_invoices(&self, query: InvoiceQuery) -> Result<Vec<Invoice>, PortError>;

    /// Adds a line item and returns the updated invoice
    async fn add_line_item(&self, id: InvoiceId, item: NewLineItem) -> Result<Invoice, PortError>;

    /// Sends the invoice and returns it in SENT status
    async fn send_invoice(&self, id: InvoiceId) -> Result<Invoice, PortError>;
}

/// The port trait for payment resource operations
#[async_trait]
pub trait PaymentPort: DomainPort {
    /// Records a payment against an invoice
    async fn record_payment(&self, payment: NewPayment) -> Result<Payment, PortError>;

    /// Retrieves a payment by ID
    async fn get_payment(&self, id: PaymentId) -> Result<Payment, PortError>;

    /// Lists the payments recorded against one invoice
    async fn list_payments(&self, invoice_id: InvoiceId) -> Result<Vec<Payment>, PortError>;
}

/// Extension trait with batch reads
#[async_trait]
pub trait PaymentPortExt: PaymentPort {
    /// Fetches payments for every invoice concurrently, isolating failures
    async fn list_payments_for(
        &self,
        invoice_ids: &[InvoiceId],
    ) -> PartialResults<InvoiceId, Vec<Payment>> {
        let fetches = invoice_ids.iter().map(|&id| async move {
            let result = self.list_payments(id).await;
            if let Err(ref e) = result {
                warn!(invoice_id = %id, error = %e, "Payments unavailable for invoice");
            }
            (id, Fetched::from(result))
        });

        let results: PartialResults<InvoiceId, Vec<Payment>> =
            join_all(fetches).await.into_iter().collect();
        debug!(
            requested = invoice_ids.len(),
            unavailable = results.unavailable().len(),
            "Batch payment fetch complete"
        );
        results
    }
}

// Blanket implementation for all PaymentPort implementors
impl<T: PaymentPort + ?Sized> PaymentPortExt for T {}

/// In-memory backend for testing
///
/// Holds invoices and payments and applies the backend's rules: line items
/// only in DRAFT, send only from DRAFT, payments only in SENT, balance
/// decremented per payment, PAID at exactly zero, and overpayment refused.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::{LineItemId, Money};

    use crate::invoice::LineItem;

    pub const OVERPAYMENT_MESSAGE: &str = "Payment amount cannot exceed invoice balance";

    #[derive(Debug, Default)]
    struct Store {
        invoices: HashMap<InvoiceId, Invoice>,
        payments: HashMap<PaymentId, Payment>,
        failing_payment_lists: HashSet<InvoiceId>,
        accept_overpayment: bool,
    }

    /// In-memory implementation of InvoicePort and PaymentPort
    #[derive(Debug, Default, Clone)]
    pub struct InMemoryBilling {
        store: Arc<RwLock<Store>>,
    }

    impl InMemoryBilling {
        pub fn new() -> Self {
            Self::default()
        }

        /// Backend variant that accepts overpayments and stops at PAID
        pub fn accepting_overpayment() -> Self {
            Self {
                store: Arc::new(RwLock::new(Store {
                    accept_overpayment: true,
                    ..Default::default()
                })),
            }
        }

        /// Makes `list_payments` fail for the given invoice
        pub async fn fail_payment_listing_for(&self, invoice_id: InvoiceId) {
            self.store.write().await.failing_payment_lists.insert(invoice_id);
        }

        /// Replaces an invoice snapshot directly
        pub async fn insert_invoice(&self, invoice: Invoice) {
            self.store.write().await.invoices.insert(invoice.id, invoice);
        }

        pub async fn payment_count(&self) -> usize {
            self.store.read().await.payments.len()
        }
    }

    impl DomainPort for InMemoryBilling {}

    #[async_trait]
    impl InvoicePort for InMemoryBilling {
        async fn create_invoice(&self, customer_id: CustomerId) -> Result<Invoice, PortError> {
            let mut invoice = Invoice::draft(InvoiceId::new_v7(), customer_id);
            invoice.created_at = Some(Utc::now().naive_utc());
            self.store.write().await.invoices.insert(invoice.id, invoice.clone());
            Ok(invoice)
        }

        async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, PortError> {
            self.store
                .read()
                .await
                .invoices
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Invoice", id))
        }

        async fn list_invoices(&self, query: InvoiceQuery) -> Result<Vec<Invoice>, PortError> {
            let store = self.store.read().await;
            let mut invoices: Vec<Invoice> = store
                .invoices
                .values()
                .filter(|invoice| query.matches(invoice))
                .cloned()
                .collect();
            invoices.sort_by_key(|invoice| invoice.id);
            Ok(invoices)
        }

        async fn add_line_item(&self, id: InvoiceId, item: NewLineItem) -> Result<Invoice, PortError> {
            let mut store = self.store.write().await;
            let invoice = store
                .invoices
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Invoice", id))?;

            if invoice.status != InvoiceStatus::Draft {
                return Err(PortError::precondition(format!(
                    "Cannot add line items to invoice in {} state. Only Draft invoices can be modified.",
                    invoice.status
                )));
            }

            let subtotal = item
                .subtotal()
                .map_err(|e| PortError::validation_field("unitPrice", e.to_string()))?;
            invoice.line_items.push(LineItem::new(
                LineItemId::new_v7(),
                item.description,
                item.quantity,
                item.unit_price,
            ));
            invoice.balance = invoice.balance + subtotal;
            invoice.updated_at = Some(Utc::now().naive_utc());
            Ok(invoice.clone())
        }

        async fn send_invoice(&self, id: InvoiceId) -> Result<Invoice, PortError> {
            let mut store = self.store.write().await;
            let invoice = store
                .invoices
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Invoice", id))?;

            if invoice.status != InvoiceStatus::Draft {
                return Err(PortError::precondition(format!(
                    "Cannot mark invoice as Sent from {} state. Only Draft invoices can be sent.",
                    invoice.status
                )));
            }

            invoice.status = InvoiceStatus::Sent;
            invoice.updated_at = Some(Utc::now().naive_utc());
            Ok(invoice.clone())
        }
    }

    #[async_trait]
    impl PaymentPort for InMemoryBilling {
        async fn record_payment(&self, payment: NewPayment) -> Result<Payment, PortError> {
            let mut store = self.store.write().await;
            let accept_overpayment = store.accept_overpayment;
            let invoice = store
                .invoices
                .get_mut(&payment.invoice_id)
                .ok_or_else(|| PortError::not_found("Invoice", payment.invoice_id))?;

            if invoice.status != InvoiceStatus::Sent {
                return Err(PortError::precondition(format!(
                    "Cannot apply payment to invoice in {} state. Only Sent invoices can receive payments.",
                    invoice.status
                )));
            }
            if !payment.amount.is_positive() {
                return Err(PortError::validation_field(
                    "amount",
                    "Payment amount must be greater than zero",
                ));
            }
            if payment.amount > invoice.balance && !accept_overpayment {
                return Err(PortError::precondition(OVERPAYMENT_MESSAGE));
            }

            let remaining = invoice.balance - payment.amount;
            invoice.balance = if remaining.is_negative() { Money::zero() } else { remaining };
            if !invoice.balance.is_positive() {
                invoice.status = InvoiceStatus::Paid;
            }
            invoice.updated_at = Some(Utc::now().naive_utc());

            let recorded = Payment {
                id: PaymentId::new_v7(),
                invoice_id: payment.invoice_id,
                amount: payment.amount,
                payment_date: payment.payment_date,
                created_at: Some(Utc::now().naive_utc()),
            };
            store.payments.insert(recorded.id, recorded.clone());
            Ok(recorded)
        }

        async fn get_payment(&self, id: PaymentId) -> Result<Payment, PortError> {
            self.store
                .read()
                .await
                .payments
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Payment", id))
        }

        async fn list_payments(&self, invoice_id: InvoiceId) -> Result<Vec<Payment>, PortError> {
            let store = self.store.read().await;
            if store.failing_payment_lists.contains(&invoice_id) {
                return Err(PortError::Server {
                    status: 500,
                    message: "Internal server error".to_string(),
                });
            }
            let mut payments: Vec<Payment> = store
                .payments
                .values()
                .filter(|p| p.invoice_id == invoice_id)
                .cloned()
                .collect();
            payments.sort_by_key(|p| p.id);
            Ok(payments)
        }
    }
}

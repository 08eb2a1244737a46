//! Payment adapter

use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, InvoiceId, PaymentId, PortError};
use domain_billing::{NewPayment, Payment, PaymentPort};

use crate::client::ApiClient;
use crate::error::HttpError;
use crate::resources::{PaymentResource, RecordPaymentRequest};

/// `PaymentPort` over `/payments`
#[derive(Debug, Clone)]
pub struct HttpPaymentAdapter {
    client: ApiClient,
}

impl HttpPaymentAdapter {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl DomainPort for HttpPaymentAdapter {}

#[async_trait]
impl PaymentPort for HttpPaymentAdapter {
    #[instrument(skip(self, payment), fields(invoice_id = %payment.invoice_id, amount = %payment.amount))]
    async fn record_payment(&self, payment: NewPayment) -> Result<Payment, PortError> {
        let resource: PaymentResource = self
            .client
            .post("/payments", &RecordPaymentRequest::from(&payment))
            .await
            .map_err(|e| e.for_entity("Invoice", payment.invoice_id))?;
        Payment::try_from(resource).map_err(PortError::from)
    }

    #[instrument(skip(self), fields(payment_id = %id))]
    async fn get_payment(&self, id: PaymentId) -> Result<Payment, PortError> {
        let resource: PaymentResource = self
            .client
            .get(&format!("/payments/{}", id.as_uuid()))
            .await
            .map_err(|e| e.for_entity("Payment", id))?;
        Payment::try_from(resource).map_err(PortError::from)
    }

    #[instrument(skip(self), fields(invoice_id = %invoice_id))]
    async fn list_payments(&self, invoice_id: InvoiceId) -> Result<Vec<Payment>, PortError> {
        let resources: Vec<PaymentResource> = self
            .client
            .get(&format!("/payments/invoice/{}", invoice_id.as_uuid()))
            .await
            .map_err(|e| e.for_entity("Invoice", invoice_id))?;
        debug!(count = resources.len(), "Fetched payments");
        resources
            .into_iter()
            .map(Payment::try_from)
            .collect::<Result<Vec<_>, HttpError>>()
            .map_err(PortError::from)
    }
}

//! Invoice adapter
//!
//! Lifecycle rules are enforced by the backend; this adapter only moves
//! requests and responses. A rejected mutation comes back as
//! `PreconditionFailed` carrying the server's message verbatim.

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, instrument};

use core_kernel::{CustomerId, DomainPort, InvoiceId, PortError};
use domain_billing::{Invoice, InvoicePort, InvoiceQuery, NewLineItem};

use crate::client::ApiClient;
use crate::error::HttpError;
use crate::resources::{AddLineItemRequest, CreateInvoiceRequest, InvoiceResource};

/// `InvoicePort` over `/invoices`
#[derive(Debug, Clone)]
pub struct HttpInvoiceAdapter {
    client: ApiClient,
}

impl HttpInvoiceAdapter {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl DomainPort for HttpInvoiceAdapter {}

fn path(id: InvoiceId) -> String {
    format!("/invoices/{}", id.as_uuid())
}

fn convert(resource: InvoiceResource) -> Result<Invoice, PortError> {
    Invoice::try_from(resource).map_err(PortError::from)
}

#[async_trait]
impl InvoicePort for HttpInvoiceAdapter {
    #[instrument(skip(self), fields(customer_id = %customer_id))]
    async fn create_invoice(&self, customer_id: CustomerId) -> Result<Invoice, PortError> {
        let resource: InvoiceResource = self
            .client
            .post("/invoices", &CreateInvoiceRequest { customer_id })
            .await
            .map_err(|e| e.for_entity("Customer", customer_id))?;
        convert(resource)
    }

    #[instrument(skip(self), fields(invoice_id = %id))]
    async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, PortError> {
        let resource: InvoiceResource = self
            .client
            .get(&path(id))
            .await
            .map_err(|e| e.for_entity("Invoice", id))?;
        convert(resource)
    }

    #[instrument(skip(self))]
    async fn list_invoices(&self, query: InvoiceQuery) -> Result<Vec<Invoice>, PortError> {
        let resources: Vec<InvoiceResource> = self
            .client
            .get_with_query("/invoices", &query.to_query_pairs())
            .await?;
        debug!(count = resources.len(), "Fetched invoices");
        resources
            .into_iter()
            .map(Invoice::try_from)
            .collect::<Result<Vec<_>, HttpError>>()
            .map_err(PortError::from)
    }

    #[instrument(skip(self, item), fields(invoice_id = %id))]
    async fn add_line_item(&self, id: InvoiceId, item: NewLineItem) -> Result<Invoice, PortError> {
        let resource: InvoiceResource = self
            .client
            .post(&format!("{}/items", path(id)), &AddLineItemRequest::from(&item))
            .await
            .map_err(|e| e.for_entity("Invoice", id))?;
        convert(resource)
    }

    #[instrument(skip(self), fields(invoice_id = %id))]
    async fn send_invoice(&self, id: InvoiceId) -> Result<Invoice, PortError> {
        let resource: InvoiceResource = self
            .client
            .post(&format!("{}/send", path(id)), &json!({}))
            .await
            .map_err(|e| e.for_entity("Invoice", id))?;
        convert(resource)
    }
}

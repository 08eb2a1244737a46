//! Invoice resource

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use core_kernel::{CustomerId, InvoiceId, LineItemId, Money};
use domain_billing::{Invoice, InvoiceStatus, LineItem, NewLineItem};

use crate::error::HttpError;

/// Body of `POST /invoices`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub customer_id: CustomerId,
}

/// Body of `POST /invoices/{id}/items`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLineItemRequest<'a> {
    pub description: &'a str,
    pub quantity: u32,
    pub unit_price: Money,
}

impl<'a> From<&'a NewLineItem> for AddLineItemRequest<'a> {
    fn from(item: &'a NewLineItem) -> Self {
        Self {
            description: &item.description,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResource {
    pub line_item_id: Uuid,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Money,
    #[serde(default)]
    pub subtotal: Option<Money>,
}

/// Invoice as returned by the API
///
/// `status` stays a string until conversion so that an unknown value is
/// reported as a decode failure naming the value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResource {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub status: String,
    #[serde(default)]
    pub line_items: Vec<LineItemResource>,
    pub balance: Money,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl From<LineItemResource> for LineItem {
    fn from(resource: LineItemResource) -> Self {
        let line = LineItem::new(
            LineItemId::from_uuid(resource.line_item_id),
            resource.description,
            resource.quantity,
            resource.unit_price,
        );
        if let (Some(reported), Ok(computed)) = (resource.subtotal, line.subtotal()) {
            if reported.round_to_cents() != computed.round_to_cents() {
                warn!(
                    line_item_id = %resource.line_item_id,
                    %reported,
                    %computed,
                    "Server subtotal differs from quantity x unit price"
                );
            }
        }
        line
    }
}

impl TryFrom<InvoiceResource> for Invoice {
    type Error = HttpError;

    fn try_from(resource: InvoiceResource) -> Result<Self, Self::Error> {
        let status: InvoiceStatus = resource
            .status
            .parse()
            .map_err(|e: domain_billing::BillingError| HttpError::Decode(e.to_string()))?;

        Ok(Invoice {
            id: InvoiceId::from_uuid(resource.id),
            customer_id: CustomerId::from_uuid(resource.customer_id),
            status,
            line_items: resource.line_items.into_iter().map(LineItem::from).collect(),
            balance: resource.balance,
            created_at: resource.created_at,
            updated_at: resource.updated_at,
        })
    }
}

//! Display-ready view models
//!
//! Money is formatted as `$0.00`, statuses use their labels, and each
//! invoice view carries the controls the lifecycle model allows.

use chrono::NaiveDateTime;
use serde::Serialize;

use core_kernel::{CustomerId, InvoiceId, MoneyError, PartialResults, PaymentId};
use domain_billing::{
    payment::{sort_newest_first, total_paid}, suggested_payment_amount, AvailableActions, Invoice,
    InvoiceStatus, LineItem, Payment,
};

const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRow {
    pub description: String,
    pub quantity: u32,
    pub unit_price: String,
    pub subtotal: String,
}

impl LineItemRow {
    pub fn from_line_item(line: &LineItem) -> Result<Self, MoneyError> {
        Ok(Self {
            description: line.description.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price.to_string(),
            subtotal: line.subtotal()?.to_string(),
        })
    }
}

/// Invoice detail page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceView {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    pub status: InvoiceStatus,
    pub status_label: &'static str,
    pub line_items: Vec<LineItemRow>,
    pub total: String,
    pub balance: String,
    pub actions: AvailableActions,
    /// Pre-filled payment amount, e.g. `65.00`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_payment: Option<String>,
}

impl InvoiceView {
    pub fn from_invoice(invoice: &Invoice) -> Result<Self, MoneyError> {
        let line_items = invoice
            .line_items
            .iter()
            .map(LineItemRow::from_line_item)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: invoice.id,
            customer_id: invoice.customer_id,
            status: invoice.status,
            status_label: invoice.status.label(),
            line_items,
            total: invoice.total()?.to_string(),
            balance: invoice.balance.to_string(),
            actions: AvailableActions::for_invoice(invoice),
            suggested_payment: suggested_payment_amount(invoice).map(|m| format!("{:.2}", m.amount())),
        })
    }
}

/// Row in the invoice list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub id: InvoiceId,
    pub short_id: String,
    pub customer_id: CustomerId,
    pub status_label: &'static str,
    pub line_item_count: usize,
    pub balance: String,
}

impl From<&Invoice> for InvoiceSummary {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id,
            short_id: invoice.id.short(),
            customer_id: invoice.customer_id,
            status_label: invoice.status.label(),
            line_item_count: invoice.line_items.len(),
            balance: invoice.balance.to_string(),
        }
    }
}

/// Row in a payments table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRow {
    pub payment_id: PaymentId,
    pub invoice_id: InvoiceId,
    pub invoice_short_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    pub amount: String,
    pub payment_date: String,
    #[serde(skip)]
    pub paid_at: NaiveDateTime,
}

impl PaymentRow {
    pub fn new(payment: &Payment, invoice: Option<&Invoice>) -> Self {
        Self {
            payment_id: payment.id,
            invoice_id: payment.invoice_id,
            invoice_short_id: payment.invoice_id.short(),
            customer_id: invoice.map(|i| i.customer_id),
            amount: payment.amount.to_string(),
            payment_date: payment.payment_date.format(DATE_DISPLAY_FORMAT).to_string(),
            paid_at: payment.payment_date,
        }
    }
}

/// Payments across every invoice
///
/// Invoices whose payments could not be fetched are listed in
/// `unavailable` instead of failing the whole view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsOverview {
    pub rows: Vec<PaymentRow>,
    pub unavailable: Vec<InvoiceId>,
    pub total_received: String,
}

impl PaymentsOverview {
    pub fn build(
        invoices: &[Invoice],
        results: &PartialResults<InvoiceId, Vec<Payment>>,
    ) -> Result<Self, MoneyError> {
        let mut payments: Vec<Payment> = results
            .available()
            .flat_map(|(_, payments)| payments.iter().cloned())
            .collect();
        sort_newest_first(&mut payments);

        let total = total_paid(&payments)?;
        let rows = payments
            .iter()
            .map(|p| PaymentRow::new(p, invoices.iter().find(|i| i.id == p.invoice_id)))
            .collect();

        // Keep the order the invoices were listed in
        let unavailable = invoices
            .iter()
            .map(|i| i.id)
            .filter(|id| results.get(id).is_some_and(|f| !f.is_available()))
            .collect();

        Ok(Self {
            rows,
            unavailable,
            total_received: total.to_string(),
        })
    }
}

//! Invoice actions
//!
//! Mutations take the invoice as last displayed. The lifecycle model
//! decides from that snapshot whether the request is sent at all; the
//! backend still has the final word if the snapshot was stale.

use tracing::{debug, info, instrument};

use core_kernel::{CustomerId, InvoiceId};
use domain_billing::lifecycle::{project_line_item, project_send};
use domain_billing::{Invoice, InvoiceQuery, LineItemForm};

use crate::error::ActionError;
use crate::reconcile::{refetch_invoice, Reconciled};
use crate::views::{InvoiceSummary, InvoiceView};
use crate::AppState;

#[instrument(skip(state))]
pub async fn list_invoices(
    state: &AppState,
    query: InvoiceQuery,
) -> Result<Vec<InvoiceSummary>, ActionError> {
    state.guard().ensure_active().await?;
    let invoices = state.invoices.list_invoices(query).await?;
    debug!(count = invoices.len(), "Listed invoices");
    Ok(invoices.iter().map(InvoiceSummary::from).collect())
}

#[instrument(skip(state), fields(invoice_id = %id))]
pub async fn get_invoice(state: &AppState, id: InvoiceId) -> Result<InvoiceView, ActionError> {
    state.guard().ensure_active().await?;
    let invoice = state.invoices.get_invoice(id).await?;
    Ok(InvoiceView::from_invoice(&invoice)?)
}

/// Creates an empty DRAFT invoice for the customer
#[instrument(skip(state), fields(customer_id = %customer_id))]
pub async fn create_invoice(state: &AppState, customer_id: CustomerId) -> Result<Invoice, ActionError> {
    state.guard().ensure_active().await?;
    let invoice = state.invoices.create_invoice(customer_id).await?;
    info!(invoice_id = %invoice.id, "Invoice created");
    Ok(invoice)
}

/// Adds a line item to a DRAFT invoice
#[instrument(skip(state, current, form), fields(invoice_id = %current.id, status = ?current.status))]
pub async fn add_line_item(
    state: &AppState,
    current: &Invoice,
    form: &LineItemForm,
) -> Result<Reconciled<Invoice>, ActionError> {
    let item = form.validate()?;
    state.guard().ensure_active().await?;
    let provisional = project_line_item(current, &item)?;

    let response = state.invoices.add_line_item(current.id, item).await?;
    let authoritative = refetch_invoice(state.invoices.as_ref(), current.id, response).await;
    info!(balance = %authoritative.balance, "Line item added");

    Ok(Reconciled::invoices(provisional, authoritative))
}

/// Sends a DRAFT invoice that has at least one line item
#[instrument(skip(state, current), fields(invoice_id = %current.id, status = ?current.status))]
pub async fn send_invoice(
    state: &AppState,
    current: &Invoice,
) -> Result<Reconciled<Invoice>, ActionError> {
    state.guard().ensure_active().await?;
    let provisional = project_send(current)?;

    let response = state.invoices.send_invoice(current.id).await?;
    let authoritative = refetch_invoice(state.invoices.as_ref(), current.id, response).await;
    info!(status = %authoritative.status, "Invoice sent");

    Ok(Reconciled::invoices(provisional, authoritative))
}

//! Payment actions

use chrono::Local;
use serde::Serialize;
use tracing::{info, instrument, warn};

use core_kernel::{InvoiceId, PaymentId};
use domain_billing::lifecycle::{predict_payment, project_payment, PaymentPrediction};
use domain_billing::payment::sort_newest_first;
use domain_billing::{
    suggested_payment_amount, Invoice, InvoiceQuery, Payment, PaymentForm, PaymentPortExt,
};

use crate::error::ActionError;
use crate::reconcile::{refetch_invoice, Reconciled};
use crate::views::PaymentsOverview;
use crate::AppState;

/// Result of recording a payment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecorded {
    pub payment: Payment,
    pub invoice: Reconciled<Invoice>,
}

/// Payment form pre-filled with the balance and today's date
pub fn payment_form_for(invoice: &Invoice) -> PaymentForm {
    PaymentForm::prefilled(suggested_payment_amount(invoice), Local::now().date_naive())
}

/// Records a payment against a SENT invoice
///
/// The amount is not checked against the balance; an overpayment is sent
/// as entered and the backend's answer is reported unchanged.
#[instrument(skip(state, current, form), fields(invoice_id = %current.id, status = ?current.status))]
pub async fn record_payment(
    state: &AppState,
    current: &Invoice,
    form: &PaymentForm,
) -> Result<PaymentRecorded, ActionError> {
    let new_payment = form.validate(current.id)?;
    state.guard().ensure_active().await?;

    if let PaymentPrediction::Undetermined { excess } = predict_payment(current, new_payment.amount)? {
        warn!(%excess, "Payment exceeds balance; outcome left to the server");
    }
    let provisional = project_payment(current, new_payment.amount)?;

    let payment = state.payments.record_payment(new_payment).await?;
    info!(payment_id = %payment.id, amount = %payment.amount, "Payment recorded");

    // The payment response does not carry the invoice
    let authoritative = refetch_invoice(state.invoices.as_ref(), current.id, provisional.clone()).await;

    Ok(PaymentRecorded {
        payment,
        invoice: Reconciled::invoices(provisional, authoritative),
    })
}

#[instrument(skip(state), fields(payment_id = %id))]
pub async fn get_payment(state: &AppState, id: PaymentId) -> Result<Payment, ActionError> {
    state.guard().ensure_active().await?;
    Ok(state.payments.get_payment(id).await?)
}

/// Payments for one invoice, newest first
#[instrument(skip(state), fields(invoice_id = %invoice_id))]
pub async fn list_payments(state: &AppState, invoice_id: InvoiceId) -> Result<Vec<Payment>, ActionError> {
    state.guard().ensure_active().await?;
    let mut payments = state.payments.list_payments(invoice_id).await?;
    sort_newest_first(&mut payments);
    Ok(payments)
}

/// Payments across all invoices
///
/// The invoice list must load; each invoice's payment listing may fail on
/// its own without failing the view.
#[instrument(skip(state))]
pub async fn payments_overview(state: &AppState) -> Result<PaymentsOverview, ActionError> {
    state.guard().ensure_active().await?;
    let invoices = state.invoices.list_invoices(InvoiceQuery::all()).await?;
    let ids: Vec<InvoiceId> = invoices.iter().map(|i| i.id).collect();

    let results = state.payments.list_payments_for(&ids).await;
    let overview = PaymentsOverview::build(&invoices, &results)?;
    if !overview.unavailable.is_empty() {
        warn!(count = overview.unavailable.len(), "Some invoices' payments are unavailable");
    }
    Ok(overview)
}

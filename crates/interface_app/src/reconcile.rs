//! Optimistic display, authoritative reconciliation
//!
//! A mutating action computes the provisional result with the lifecycle
//! model before the request goes out, then replaces it with the server's
//! state. Any difference in status or balance is flagged and logged.

use serde::Serialize;
use tracing::warn;

use core_kernel::InvoiceId;
use domain_billing::{Invoice, InvoicePort};

/// A provisional prediction paired with the server's answer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciled<T> {
    pub provisional: T,
    pub authoritative: T,
    pub diverged: bool,
}

impl<T> Reconciled<T> {
    /// The value the view should display
    pub fn current(&self) -> &T {
        &self.authoritative
    }

    pub fn into_authoritative(self) -> T {
        self.authoritative
    }
}

impl Reconciled<Invoice> {
    pub fn invoices(provisional: Invoice, authoritative: Invoice) -> Self {
        let diverged = provisional.status != authoritative.status
            || provisional.balance.round_to_cents() != authoritative.balance.round_to_cents();

        if diverged {
            warn!(
                invoice_id = %authoritative.id,
                provisional_status = %provisional.status,
                server_status = %authoritative.status,
                provisional_balance = %provisional.balance,
                server_balance = %authoritative.balance,
                "Server state differs from local prediction"
            );
        }

        Self {
            provisional,
            authoritative,
            diverged,
        }
    }
}

/// Reloads an invoice after a successful mutation
///
/// Falls back to the mutation's own response if the reload fails.
pub async fn refetch_invoice(invoices: &dyn InvoicePort, id: InvoiceId, fallback: Invoice) -> Invoice {
    match invoices.get_invoice(id).await {
        Ok(invoice) => invoice,
        Err(e) => {
            warn!(invoice_id = %id, error = %e, "Refetch failed; using mutation response");
            fallback
        }
    }
}

//! Payment records
//!
//! A payment is recorded against a SENT invoice. Several payments may
//! accumulate against one invoice until its balance reaches zero.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use core_kernel::temporal::naive_seconds;
use core_kernel::{InvoiceId, Money, MoneyError, PaymentId};

/// A payment as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub invoice_id: InvoiceId,
    pub amount: Money,
    /// Naive local date-time, seconds precision
    #[serde(with = "naive_seconds")]
    pub payment_date: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

/// Sums payment amounts
///
/// Amounts come from the backend, so the sum is checked.
pub fn total_paid(payments: &[Payment]) -> Result<Money, MoneyError> {
    payments
        .iter()
        .try_fold(Money::zero(), |acc, p| acc.checked_add(&p.amount))
}

/// Orders payments newest first by payment date
pub fn sort_newest_first(payments: &mut [Payment]) {
    payments.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
}

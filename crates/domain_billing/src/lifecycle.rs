//! Invoice lifecycle model
//!
//! Decides which operations are legal for an invoice snapshot and predicts
//! the status and balance that result from them. Every function here is a
//! pure function of its arguments; the backend remains the system of
//! record and its answer replaces any prediction made here.
//!
//! # State Machine
//!
//! ```text
//!            send (has line items)        payment (balance = 0)
//!   DRAFT ─────────────────────────▶ SENT ─────────────────────▶ PAID
//!     │ ▲                             │ ▲
//!     └─┘ add line item               └─┘ payment (balance > 0)
//! ```
//!
//! PAID is terminal. A payment that would leave a negative remainder has
//! no predicted outcome; see [`PaymentPrediction::Undetermined`].

use serde::Serialize;

use core_kernel::{LineItemId, Money, MoneyError};

use crate::error::BillingError;
use crate::invoice::{Invoice, InvoiceStatus, LineItem};
use crate::payment::{total_paid, Payment};
use crate::validation::NewLineItem;

/// Something that happens to an invoice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceEvent {
    /// A line item was added
    LineItemAdded,
    /// The invoice was sent
    Send { line_item_count: usize },
    /// A payment was applied, leaving `remaining_balance`
    PaymentApplied { remaining_balance: Money },
}

/// True iff line items may be added
pub fn can_add_line_item(invoice: &Invoice) -> bool {
    invoice.status == InvoiceStatus::Draft
}

/// True iff the invoice is a DRAFT with at least one line item
pub fn can_send(invoice: &Invoice) -> bool {
    invoice.status == InvoiceStatus::Draft && invoice.has_line_items()
}

/// True iff payments may be recorded
pub fn can_record_payment(invoice: &Invoice) -> bool {
    invoice.status == InvoiceStatus::Sent
}

pub fn ensure_can_add_line_item(invoice: &Invoice) -> Result<(), BillingError> {
    next_status(invoice.status, &InvoiceEvent::LineItemAdded).map(|_| ())
}

pub fn ensure_can_send(invoice: &Invoice) -> Result<(), BillingError> {
    next_status(
        invoice.status,
        &InvoiceEvent::Send {
            line_item_count: invoice.line_items.len(),
        },
    )
    .map(|_| ())
}

pub fn ensure_can_record_payment(invoice: &Invoice) -> Result<(), BillingError> {
    if can_record_payment(invoice) {
        Ok(())
    } else {
        Err(BillingError::invalid_transition(invoice.status, "record a payment against"))
    }
}

/// Sum of subtotals minus sum of payments, rounded to cents
pub fn compute_balance(line_items: &[LineItem], payments: &[Payment]) -> Result<Money, MoneyError> {
    let total = line_items
        .iter()
        .try_fold(Money::zero(), |acc, item| acc.checked_add(&item.subtotal()?))?;
    Ok(total.checked_sub(&total_paid(payments)?)?.round_to_cents())
}

/// Applies the transition table
///
/// A payment leaving a negative remainder yields
/// [`BillingError::UndeterminedOutcome`]: whether overpayment is accepted is
/// decided by the backend alone.
pub fn next_status(current: InvoiceStatus, event: &InvoiceEvent) -> Result<InvoiceStatus, BillingError> {
    match (current, event) {
        (InvoiceStatus::Draft, InvoiceEvent::LineItemAdded) => Ok(InvoiceStatus::Draft),
        (InvoiceStatus::Draft, InvoiceEvent::Send { line_item_count }) => {
            if *line_item_count == 0 {
                Err(BillingError::NoLineItems)
            } else {
                Ok(InvoiceStatus::Sent)
            }
        }
        (InvoiceStatus::Sent, InvoiceEvent::PaymentApplied { remaining_balance }) => {
            // Exact comparison: a sub-cent remainder is still owed.
            if remaining_balance.is_zero() {
                Ok(InvoiceStatus::Paid)
            } else if remaining_balance.is_positive() {
                Ok(InvoiceStatus::Sent)
            } else {
                Err(BillingError::UndeterminedOutcome {
                    excess: -*remaining_balance,
                })
            }
        }
        (status, InvoiceEvent::LineItemAdded) => {
            Err(BillingError::invalid_transition(status, "add line items to"))
        }
        (status, InvoiceEvent::Send { .. }) => Err(BillingError::invalid_transition(status, "send")),
        (status, InvoiceEvent::PaymentApplied { .. }) => {
            Err(BillingError::invalid_transition(status, "record a payment against"))
        }
    }
}

/// Returns true when moving from `from` to `to` does not go backwards
pub fn is_forward_transition(from: InvoiceStatus, to: InvoiceStatus) -> bool {
    to.rank() >= from.rank()
}

/// Predicted effect of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentPrediction {
    /// Balance stays positive; invoice remains SENT
    Partial { balance: Money },
    /// Balance reaches exactly zero; invoice becomes PAID
    Settled,
    /// Amount exceeds the balance; the backend decides
    Undetermined { excess: Money },
}

impl PaymentPrediction {
    /// The status to display before the server answers
    pub fn provisional_status(&self, current: InvoiceStatus) -> InvoiceStatus {
        match self {
            PaymentPrediction::Partial { .. } => InvoiceStatus::Sent,
            PaymentPrediction::Settled => InvoiceStatus::Paid,
            PaymentPrediction::Undetermined { .. } => current,
        }
    }
}

/// Predicts the outcome of paying `amount` against the invoice
pub fn predict_payment(invoice: &Invoice, amount: Money) -> Result<PaymentPrediction, BillingError> {
    ensure_can_record_payment(invoice)?;
    let remaining = invoice.balance.checked_sub(&amount)?;
    match next_status(
        invoice.status,
        &InvoiceEvent::PaymentApplied {
            remaining_balance: remaining,
        },
    ) {
        Ok(InvoiceStatus::Paid) => Ok(PaymentPrediction::Settled),
        Ok(_) => Ok(PaymentPrediction::Partial { balance: remaining }),
        Err(BillingError::UndeterminedOutcome { excess }) => {
            Ok(PaymentPrediction::Undetermined { excess })
        }
        Err(e) => Err(e),
    }
}

/// Provisional snapshot after adding a line item
pub fn project_line_item(invoice: &Invoice, item: &NewLineItem) -> Result<Invoice, BillingError> {
    ensure_can_add_line_item(invoice)?;
    let mut projected = invoice.clone();
    projected.line_items.push(LineItem::new(
        LineItemId::new(),
        item.description.clone(),
        item.quantity,
        item.unit_price,
    ));
    projected.balance = compute_balance(&projected.line_items, &[])?;
    Ok(projected)
}

/// Provisional snapshot after sending
pub fn project_send(invoice: &Invoice) -> Result<Invoice, BillingError> {
    ensure_can_send(invoice)?;
    let mut projected = invoice.clone();
    projected.status = InvoiceStatus::Sent;
    Ok(projected)
}

/// Provisional snapshot after a payment
///
/// When the outcome is undetermined the snapshot is returned unchanged.
pub fn project_payment(invoice: &Invoice, amount: Money) -> Result<Invoice, BillingError> {
    let prediction = predict_payment(invoice, amount)?;
    let mut projected = invoice.clone();
    projected.status = prediction.provisional_status(invoice.status);
    match prediction {
        PaymentPrediction::Partial { balance } => projected.balance = balance,
        PaymentPrediction::Settled => projected.balance = Money::zero(),
        PaymentPrediction::Undetermined { .. } => {}
    }
    Ok(projected)
}

/// Which mutating controls a view should enable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableActions {
    pub add_line_item: bool,
    pub send: bool,
    pub record_payment: bool,
}

impl AvailableActions {
    pub fn for_invoice(invoice: &Invoice) -> Self {
        Self {
            add_line_item: can_add_line_item(invoice),
            send: can_send(invoice),
            record_payment: can_record_payment(invoice),
        }
    }

    pub fn none() -> Self {
        Self {
            add_line_item: false,
            send: false,
            record_payment: false,
        }
    }
}

/// Amount to pre-fill on the payment form: the current balance
pub fn suggested_payment_amount(invoice: &Invoice) -> Option<Money> {
    if can_record_payment(invoice) && invoice.balance.is_positive() {
        Some(invoice.balance.round_to_cents())
    } else {
        None
    }
}

//! Invoices and line items
//!
//! An invoice is created in DRAFT for one customer, collects line items
//! while in DRAFT, is sent once, and is settled by payments. The backend
//! owns the record; the client holds a snapshot that is refreshed after
//! every mutation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CustomerId, InvoiceId, LineItemId, Money, MoneyError};

use crate::error::BillingError;

/// Invoice status
///
/// Transitions are forward-only: DRAFT → SENT → PAID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    /// Being drafted; line items may be added
    Draft,
    /// Sent to the customer; payments may be recorded
    Sent,
    /// Fully settled
    Paid,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 3] = [InvoiceStatus::Draft, InvoiceStatus::Sent, InvoiceStatus::Paid];

    /// Wire name (`DRAFT`, `SENT`, `PAID`)
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "DRAFT",
            InvoiceStatus::Sent => "SENT",
            InvoiceStatus::Paid => "PAID",
        }
    }

    /// Human-readable label for badges and filters
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Sent => "Sent",
            InvoiceStatus::Paid => "Paid",
        }
    }

    /// Position in the lifecycle; never decreases for a given invoice
    pub fn rank(&self) -> u8 {
        match self {
            InvoiceStatus::Draft => 0,
            InvoiceStatus::Sent => 1,
            InvoiceStatus::Paid => 2,
        }
    }

    /// No mutating operation is legal once terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, InvoiceStatus::Paid)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(InvoiceStatus::Draft),
            "SENT" => Ok(InvoiceStatus::Sent),
            "PAID" => Ok(InvoiceStatus::Paid),
            other => Err(BillingError::UnknownStatus(other.to_string())),
        }
    }
}

/// A priced entry on an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub line_item_id: LineItemId,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl LineItem {
    pub fn new(
        line_item_id: LineItemId,
        description: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            line_item_id,
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    /// `unit_price × quantity`, exact
    pub fn subtotal(&self) -> Result<Money, MoneyError> {
        self.unit_price.times(self.quantity)
    }
}

/// An invoice snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Remaining amount owed, as reported by the backend
    pub balance: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Invoice {
    /// A freshly created invoice: DRAFT, no line items, zero balance
    pub fn draft(id: InvoiceId, customer_id: CustomerId) -> Self {
        Self {
            id,
            customer_id,
            status: InvoiceStatus::Draft,
            line_items: Vec::new(),
            balance: Money::zero(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn has_line_items(&self) -> bool {
        !self.line_items.is_empty()
    }

    /// Sum of all line item subtotals
    pub fn total(&self) -> Result<Money, MoneyError> {
        self.line_items
            .iter()
            .try_fold(Money::zero(), |acc, item| acc.checked_add(&item.subtotal()?))
    }

    /// Amount already paid, derived from total and balance
    pub fn amount_paid(&self) -> Result<Money, MoneyError> {
        self.total()?.checked_sub(&self.balance)
    }
}

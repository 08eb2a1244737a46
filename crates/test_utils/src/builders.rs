//! Test Data Builders
//!
//! Builders construct invoice snapshots in any lifecycle state with a
//! consistent balance, so tests only spell out what they care about.

use chrono::NaiveDateTime;

use core_kernel::{CustomerId, InvoiceId, LineItemId, Money, PaymentId};
use domain_billing::mock::InMemoryBilling;
use domain_billing::{Invoice, InvoiceStatus, LineItem, Payment};

use crate::fixtures::{MoneyFixtures, TemporalFixtures};

/// Builder for invoice snapshots
///
/// The balance is derived from the line items minus the amount paid
/// unless overridden with [`InvoiceBuilder::with_balance`].
#[derive(Debug, Clone)]
pub struct InvoiceBuilder {
    id: InvoiceId,
    customer_id: CustomerId,
    status: InvoiceStatus,
    line_items: Vec<LineItem>,
    paid: Money,
    balance: Option<Money>,
}

impl Default for InvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceBuilder {
    /// An empty DRAFT invoice
    pub fn new() -> Self {
        Self {
            id: InvoiceId::new(),
            customer_id: CustomerId::new(),
            status: InvoiceStatus::Draft,
            line_items: Vec::new(),
            paid: Money::zero(),
            balance: None,
        }
    }

    /// A SENT invoice carrying the two standard line items ($65.00)
    pub fn walkthrough_sent() -> Self {
        Self::new()
            .with_line_item("Item 1", 2, MoneyFixtures::ten())
            .with_line_item("Item 2", 3, MoneyFixtures::fifteen())
            .with_status(InvoiceStatus::Sent)
    }

    pub fn with_id(mut self, id: InvoiceId) -> Self {
        self.id = id;
        self
    }

    pub fn with_customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = customer_id;
        self
    }

    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_line_item(mut self, description: &str, quantity: u32, unit_price: Money) -> Self {
        self.line_items
            .push(LineItem::new(LineItemId::new(), description, quantity, unit_price));
        self
    }

    /// Records an amount already paid against the invoice
    pub fn with_paid(mut self, amount: Money) -> Self {
        self.paid = amount;
        self
    }

    /// Overrides the derived balance
    pub fn with_balance(mut self, balance: Money) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn build(self) -> Invoice {
        let balance = self.balance.unwrap_or_else(|| {
            let total: Money = self
                .line_items
                .iter()
                .map(|l| l.subtotal().expect("builder amounts fit"))
                .sum();
            (total - self.paid).round_to_cents()
        });

        Invoice {
            id: self.id,
            customer_id: self.customer_id,
            status: self.status,
            line_items: self.line_items,
            balance,
            created_at: None,
            updated_at: None,
        }
    }

    /// Builds the invoice and stores it in the in-memory backend
    pub async fn seed(self, billing: &InMemoryBilling) -> Invoice {
        let invoice = self.build();
        billing.insert_invoice(invoice.clone()).await;
        invoice
    }
}

/// Builder for payments as the backend returns them
#[derive(Debug, Clone)]
pub struct PaymentBuilder {
    invoice_id: InvoiceId,
    amount: Money,
    payment_date: NaiveDateTime,
}

impl PaymentBuilder {
    pub fn for_invoice(invoice_id: InvoiceId) -> Self {
        Self {
            invoice_id,
            amount: MoneyFixtures::partial_payment(),
            payment_date: TemporalFixtures::payment_time(),
        }
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_date(mut self, payment_date: NaiveDateTime) -> Self {
        self.payment_date = payment_date;
        self
    }

    pub fn build(self) -> Payment {
        Payment {
            id: PaymentId::new(),
            invoice_id: self.invoice_id,
            amount: self.amount,
            payment_date: self.payment_date,
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_is_derived() {
        let invoice = InvoiceBuilder::walkthrough_sent()
            .with_paid(MoneyFixtures::partial_payment())
            .build();
        assert_eq!(invoice.balance, Money::new(dec!(40.00)));
        assert_eq!(invoice.status, InvoiceStatus::Sent);
    }

    #[test]
    fn test_empty_draft() {
        let invoice = InvoiceBuilder::new().build();
        assert!(invoice.balance.is_zero());
        assert!(invoice.line_items.is_empty());
    }
}

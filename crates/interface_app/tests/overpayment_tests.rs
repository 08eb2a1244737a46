//! Payments above the remaining balance
//!
//! The client never blocks an overpayment. Whether it is accepted is the
//! backend's decision; both behaviours are covered here.

mod common;

use rust_decimal_macros::dec;

use core_kernel::{ErrorKind, Money};
use domain_billing::mock::{InMemoryBilling, OVERPAYMENT_MESSAGE};
use domain_billing::{InvoiceStatus, PaymentForm};
use interface_app::handlers::payments;
use test_utils::{assert_invoice_state, InvoiceBuilder, MoneyFixtures};

use common::TestApp;

#[tokio::test]
async fn rejected_overpayment_surfaces_server_message() {
    let app = TestApp::new().await;
    let invoice = InvoiceBuilder::walkthrough_sent().seed(&app.billing).await;

    let form = PaymentForm::new("80.00", "2025-11-09");
    let err = payments::record_payment(&app.state, &invoice, &form).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::PreconditionFailed);
    assert_eq!(err.message, OVERPAYMENT_MESSAGE);
    assert_eq!(app.billing.payment_count().await, 0);
}

#[tokio::test]
async fn accepted_overpayment_is_reconciled_from_server() {
    let app = TestApp::with_billing(InMemoryBilling::accepting_overpayment()).await;
    let invoice = InvoiceBuilder::walkthrough_sent().seed(&app.billing).await;

    let form = PaymentForm::new(
        format!("{:.2}", MoneyFixtures::overpayment().amount()),
        "2025-11-09",
    );
    let recorded = payments::record_payment(&app.state, &invoice, &form).await.unwrap();

    // No local prediction for a negative remainder
    assert_invoice_state(&recorded.invoice.provisional, InvoiceStatus::Sent, Money::new(dec!(65.00)));
    assert!(recorded.invoice.diverged);
    assert_invoice_state(recorded.invoice.current(), InvoiceStatus::Paid, Money::zero());
}

#[tokio::test]
async fn payment_on_paid_invoice_is_gated() {
    let app = TestApp::new().await;
    let invoice = InvoiceBuilder::walkthrough_sent()
        .with_status(InvoiceStatus::Paid)
        .with_paid(MoneyFixtures::walkthrough_total())
        .seed(&app.billing)
        .await;

    let form = PaymentForm::new("1.00", "2025-11-09");
    let err = payments::record_payment(&app.state, &invoice, &form).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::PreconditionFailed);
}

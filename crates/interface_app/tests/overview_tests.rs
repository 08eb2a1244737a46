//! Payments overview with per-invoice failure isolation

mod common;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{ErrorKind, Money};
use domain_billing::{InvoicePort, NewPayment, PaymentPort};
use interface_app::handlers::payments;
use test_utils::{fake_description, InvoiceBuilder};

use common::TestApp;

fn on(day: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn one_failing_invoice_does_not_hide_the_rest() {
    let app = TestApp::new().await;
    let healthy = InvoiceBuilder::walkthrough_sent().seed(&app.billing).await;
    let broken = InvoiceBuilder::walkthrough_sent().seed(&app.billing).await;

    for (amount, day) in [(dec!(10.00), 3), (dec!(15.00), 7)] {
        let payment = NewPayment::new(healthy.id, Money::new(amount), on(day)).unwrap();
        app.billing.record_payment(payment).await.unwrap();
    }
    let payment = NewPayment::new(broken.id, Money::new(dec!(5.00)), on(9)).unwrap();
    app.billing.record_payment(payment).await.unwrap();
    app.billing.fail_payment_listing_for(broken.id).await;

    let overview = payments::payments_overview(&app.state).await.unwrap();

    assert_eq!(overview.rows.len(), 2);
    assert_eq!(overview.rows[0].payment_date, "2025-11-07");
    assert_eq!(overview.rows[1].payment_date, "2025-11-03");
    assert_eq!(overview.unavailable, vec![broken.id]);
    assert_eq!(overview.total_received, "$25.00");
}

#[tokio::test]
async fn overview_requires_session() {
    let app = TestApp::new().await;
    app.state.session.clear().await;

    let err = payments::payments_overview(&app.state).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Auth);
}

#[tokio::test]
async fn invoice_payments_are_newest_first() {
    let app = TestApp::new().await;
    let invoice = InvoiceBuilder::new()
        .with_line_item(&fake_description(), 1, Money::new(dec!(100.00)))
        .with_status(domain_billing::InvoiceStatus::Sent)
        .seed(&app.billing)
        .await;

    for day in [1, 20, 10] {
        let payment = NewPayment::new(invoice.id, Money::new(dec!(1.00)), on(day)).unwrap();
        app.billing.record_payment(payment).await.unwrap();
    }

    let listed = payments::list_payments(&app.state, invoice.id).await.unwrap();
    let days: Vec<String> = listed
        .iter()
        .map(|p| p.payment_date.format("%d").to_string())
        .collect();
    assert_eq!(days, vec!["20", "10", "01"]);

    let fetched = payments::get_payment(&app.state, listed[0].id).await.unwrap();
    assert_eq!(fetched, listed[0]);

    let refreshed = app.billing.get_invoice(invoice.id).await.unwrap();
    assert_eq!(refreshed.balance, Money::new(dec!(97.00)));
}

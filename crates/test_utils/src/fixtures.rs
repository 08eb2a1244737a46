//! Pre-built Test Fixtures
//!
//! Consistent, predictable data for unit tests. The amounts follow the
//! standard walkthrough: two line items (2 × $10.00 and 3 × $15.00)
//! totalling $65.00.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;

use core_kernel::{CustomerId, InvoiceId, LoginResponse, Money, Session};
use domain_billing::{LineItemForm, NewLineItem};
use domain_customer::{Customer, CustomerForm};

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn ten() -> Money {
        Money::new(dec!(10.00))
    }

    pub fn fifteen() -> Money {
        Money::new(dec!(15.00))
    }

    /// Total of the standard two line items
    pub fn walkthrough_total() -> Money {
        Money::new(dec!(65.00))
    }

    pub fn partial_payment() -> Money {
        Money::new(dec!(25.00))
    }

    pub fn overpayment() -> Money {
        Money::new(dec!(80.00))
    }
}

/// Fixture for line items
pub struct LineItemFixtures;

impl LineItemFixtures {
    /// 2 × $10.00
    pub fn item_one() -> NewLineItem {
        LineItemForm::new("Item 1", "2", "10.00")
            .validate()
            .expect("fixture line item is valid")
    }

    /// 3 × $15.00
    pub fn item_two() -> NewLineItem {
        LineItemForm::new("Item 2", "3", "15.00")
            .validate()
            .expect("fixture line item is valid")
    }
}

/// Fixture for customers
pub struct CustomerFixtures;

impl CustomerFixtures {
    pub fn acme_form() -> CustomerForm {
        CustomerForm::new("Acme Corp", "billing@acme.test")
    }

    pub fn acme() -> Customer {
        Customer {
            id: CustomerId::new(),
            name: "Acme Corp".to_string(),
            email: "billing@acme.test".to_string(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// Fixture for dates
pub struct TemporalFixtures;

impl TemporalFixtures {
    pub fn payment_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 9).expect("valid date")
    }

    pub fn payment_time() -> NaiveDateTime {
        Self::payment_day().and_hms_opt(17, 21, 0).expect("valid time")
    }
}

/// Fixture for sessions
pub struct SessionFixtures;

impl SessionFixtures {
    pub const EMAIL: &'static str = "owner@example.com";
    pub const PASSWORD: &'static str = "correct horse";

    /// A session holding an opaque token
    pub async fn logged_in() -> Session {
        let session = Session::new();
        session.populate(LoginResponse::new("fixture-token", Self::EMAIL)).await;
        session
    }
}

/// Fixed identifiers for tests that compare output
pub struct IdFixtures;

impl IdFixtures {
    pub fn invoice_id() -> InvoiceId {
        "INV-5d7f0c3e-1b2a-4c5d-8e9f-0a1b2c3d4e5f"
            .parse()
            .expect("valid invoice id")
    }

    pub fn customer_id() -> CustomerId {
        "CUS-0b8f1c2e-7c1a-4e0b-9a57-5e6b3d0c9f11"
            .parse()
            .expect("valid customer id")
    }
}

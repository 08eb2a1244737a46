//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful failure
//! messages than a bare `assert_eq!`.

use core_kernel::{ErrorKind, Money, PortError, ValidationErrors};
use domain_billing::{Invoice, InvoiceStatus};

/// Asserts the invoice's status and balance in one go
pub fn assert_invoice_state(invoice: &Invoice, status: InvoiceStatus, balance: Money) {
    assert_eq!(
        (invoice.status, invoice.balance.round_to_cents()),
        (status, balance.round_to_cents()),
        "Invoice {} expected {} with balance {}, got {} with balance {}",
        invoice.id,
        status,
        balance,
        invoice.status,
        invoice.balance
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(money.is_zero(), "Expected zero money, got {}", money);
}

/// Asserts that a field carries the expected message
pub fn assert_field_error(errors: &ValidationErrors, field: &str, message: &str) {
    match errors.for_field(field) {
        Some(actual) => assert_eq!(
            actual, message,
            "Field '{}' has message '{}', expected '{}'",
            field, actual, message
        ),
        None => panic!("No error for field '{}'; errors were: {}", field, errors),
    }
}

/// Asserts the kind of a port error
pub fn assert_port_error_kind<T: std::fmt::Debug>(result: &Result<T, PortError>, kind: ErrorKind) {
    match result {
        Ok(value) => panic!("Expected {:?} error, got Ok({:?})", kind, value),
        Err(e) => assert_eq!(e.kind(), kind, "Unexpected error: {}", e),
    }
}

//! Property-Based Test Generators
//!
//! Proptest strategies that respect the input rules (positive quantity,
//! positive two-decimal prices) plus `fake` helpers for realistic text.

use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use proptest::prelude::*;

use core_kernel::{LineItemId, Money};
use domain_billing::{InvoiceStatus, LineItem};
use domain_customer::CustomerForm;

/// Positive amounts between $0.01 and $100,000.00
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (1i64..10_000_000i64).prop_map(Money::from_cents)
}

/// Zero or negative amounts, which every input form rejects
pub fn non_positive_money_strategy() -> impl Strategy<Value = Money> {
    (-10_000_000i64..=0i64).prop_map(Money::from_cents)
}

pub fn quantity_strategy() -> impl Strategy<Value = u32> {
    1u32..1_000u32
}

pub fn status_strategy() -> impl Strategy<Value = InvoiceStatus> {
    prop_oneof![
        Just(InvoiceStatus::Draft),
        Just(InvoiceStatus::Sent),
        Just(InvoiceStatus::Paid),
    ]
}

pub fn line_item_strategy() -> impl Strategy<Value = LineItem> {
    ("[A-Za-z][A-Za-z ]{0,30}", quantity_strategy(), positive_money_strategy()).prop_map(
        |(description, quantity, price)| LineItem::new(LineItemId::new(), description, quantity, price),
    )
}

pub fn line_items_strategy(max: usize) -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(line_item_strategy(), 1..=max)
}

/// Text that is empty once trimmed
pub fn blank_text_strategy() -> impl Strategy<Value = String> {
    "[ \t]{0,5}"
}

/// A customer form with a plausible name and unique-looking email
pub fn fake_customer_form() -> CustomerForm {
    let name: String = CompanyName().fake();
    let email: String = SafeEmail().fake();
    CustomerForm::new(name, email)
}

/// A short line item description
pub fn fake_description() -> String {
    Sentence(2..5).fake()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_customer_form_is_valid() {
        for _ in 0..20 {
            assert!(fake_customer_form().validate().is_ok());
        }
    }

    proptest! {
        #[test]
        fn generated_line_items_have_positive_subtotals(line in line_item_strategy()) {
            prop_assert!(line.subtotal().unwrap().is_positive());
        }
    }
}

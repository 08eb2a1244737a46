//! Line item and payment input validation
//!
//! # Validation Rules
//!
//! ## Line items
//! - Description must be non-empty after trimming
//! - Quantity must be a whole number greater than zero
//! - Unit price must be a number greater than zero, in whole cents
//!
//! ## Payments
//! - Amount must be a number greater than zero, in whole cents
//! - Payment date is required and must parse as a date or date-time
//!
//! A zero or negative value is always a validation error, never silently
//! clamped. The amount is not compared against the invoice balance; that
//! check belongs to the backend.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use core_kernel::{strip_to_naive, InvoiceId, Money, MoneyError, ValidationErrors};

pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const QUANTITY_NOT_WHOLE: &str = "Quantity must be a whole number";
pub const QUANTITY_NOT_POSITIVE: &str = "Quantity must be greater than zero";
pub const UNIT_PRICE_NOT_NUMBER: &str = "Unit price must be a number";
pub const UNIT_PRICE_NOT_POSITIVE: &str = "Unit price must be greater than zero";
pub const UNIT_PRICE_SUB_CENT: &str = "Unit price cannot have more than two decimal places";
pub const AMOUNT_NOT_NUMBER: &str = "Amount must be a number";
pub const AMOUNT_NOT_POSITIVE: &str = "Amount must be greater than zero";
pub const AMOUNT_SUB_CENT: &str = "Amount cannot have more than two decimal places";
pub const PAYMENT_DATE_REQUIRED: &str = "Payment date is required";
pub const PAYMENT_DATE_INVALID: &str = "Payment date must be a valid date";

/// A validated line item, ready to send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl NewLineItem {
    /// Validates already-typed values
    pub fn new(
        description: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<Self, ValidationErrors> {
        let description = description.into();
        let mut errors = ValidationErrors::new();

        let description = check_description(&description, &mut errors);
        let quantity = check_quantity(quantity, &mut errors);
        check_unit_price(unit_price, &mut errors);

        match quantity {
            Some(quantity) if errors.is_empty() => Ok(Self {
                description,
                quantity,
                unit_price,
            }),
            _ => Err(errors),
        }
    }

    /// `unit_price × quantity`
    pub fn subtotal(&self) -> Result<Money, MoneyError> {
        self.unit_price.times(self.quantity)
    }
}

/// Raw line item form input
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemForm {
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
}

impl LineItemForm {
    pub fn new(
        description: impl Into<String>,
        quantity: impl Into<String>,
        unit_price: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            quantity: quantity.into(),
            unit_price: unit_price.into(),
        }
    }

    pub fn validate(&self) -> Result<NewLineItem, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let description = check_description(&self.description, &mut errors);

        let quantity = match self.quantity.trim().parse::<i64>() {
            Ok(value) => check_quantity(value, &mut errors),
            Err(_) => {
                errors.add("quantity", QUANTITY_NOT_WHOLE);
                None
            }
        };

        let unit_price = match Money::parse(&self.unit_price) {
            Ok(price) => check_unit_price(price, &mut errors),
            Err(_) => {
                errors.add("unitPrice", UNIT_PRICE_NOT_NUMBER);
                None
            }
        };

        match (quantity, unit_price) {
            (Some(quantity), Some(unit_price)) if errors.is_empty() => Ok(NewLineItem {
                description,
                quantity,
                unit_price,
            }),
            _ => Err(errors),
        }
    }
}

/// A validated payment, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub invoice_id: InvoiceId,
    pub amount: Money,
    /// Naive local date-time; fractional seconds already removed
    pub payment_date: NaiveDateTime,
}

impl NewPayment {
    pub fn new(
        invoice_id: InvoiceId,
        amount: Money,
        payment_date: NaiveDateTime,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_amount(amount, &mut errors);
        errors.into_result(Self {
            invoice_id,
            amount,
            payment_date: core_kernel::temporal::truncate_to_seconds(payment_date),
        })
    }
}

/// Raw payment form input
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentForm {
    pub amount: String,
    pub payment_date: String,
}

impl PaymentForm {
    pub fn new(amount: impl Into<String>, payment_date: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            payment_date: payment_date.into(),
        }
    }

    /// Form pre-filled with an amount and a calendar date
    pub fn prefilled(amount: Option<Money>, date: NaiveDate) -> Self {
        Self {
            amount: amount
                .map(|m| format!("{:.2}", m.round_to_cents().amount()))
                .unwrap_or_default(),
            payment_date: date.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn validate(&self, invoice_id: InvoiceId) -> Result<NewPayment, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let amount = match Money::parse(&self.amount) {
            Ok(amount) => check_amount(amount, &mut errors),
            Err(_) => {
                errors.add("amount", AMOUNT_NOT_NUMBER);
                None
            }
        };

        let payment_date = if self.payment_date.trim().is_empty() {
            errors.add("paymentDate", PAYMENT_DATE_REQUIRED);
            None
        } else {
            match strip_to_naive(&self.payment_date) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add("paymentDate", PAYMENT_DATE_INVALID);
                    None
                }
            }
        };

        match (amount, payment_date) {
            (Some(amount), Some(payment_date)) if errors.is_empty() => Ok(NewPayment {
                invoice_id,
                amount,
                payment_date,
            }),
            _ => Err(errors),
        }
    }
}

fn check_description(description: &str, errors: &mut ValidationErrors) -> String {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        errors.add("description", DESCRIPTION_REQUIRED);
    }
    trimmed.to_string()
}

fn check_quantity(quantity: i64, errors: &mut ValidationErrors) -> Option<u32> {
    if quantity <= 0 {
        errors.add("quantity", QUANTITY_NOT_POSITIVE);
        return None;
    }
    match u32::try_from(quantity) {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add("quantity", QUANTITY_NOT_WHOLE);
            None
        }
    }
}

fn check_unit_price(price: Money, errors: &mut ValidationErrors) -> Option<Money> {
    check_cents(price, "unitPrice", UNIT_PRICE_NOT_POSITIVE, UNIT_PRICE_SUB_CENT, errors)
}

fn check_amount(amount: Money, errors: &mut ValidationErrors) -> Option<Money> {
    check_cents(amount, "amount", AMOUNT_NOT_POSITIVE, AMOUNT_SUB_CENT, errors)
}

/// Positive and representable in whole cents
fn check_cents(
    value: Money,
    field: &str,
    not_positive: &str,
    sub_cent: &str,
    errors: &mut ValidationErrors,
) -> Option<Money> {
    if !value.is_positive() {
        errors.add(field, not_positive);
        None
    } else if value.has_sub_cent_digits() {
        errors.add(field, sub_cent);
        None
    } else {
        Some(value)
    }
}

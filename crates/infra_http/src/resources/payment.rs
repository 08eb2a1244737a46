//! Payment resource

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::temporal::{naive_seconds, strip_to_naive};
use core_kernel::{InvoiceId, Money, PaymentId};
use domain_billing::{NewPayment, Payment};

use crate::error::HttpError;

/// Body of `POST /payments`
///
/// `paymentDate` goes out as `YYYY-MM-DDTHH:MM:SS` with no offset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub invoice_id: InvoiceId,
    pub amount: Money,
    #[serde(with = "naive_seconds")]
    pub payment_date: NaiveDateTime,
}

impl From<&NewPayment> for RecordPaymentRequest {
    fn from(payment: &NewPayment) -> Self {
        Self {
            invoice_id: payment.invoice_id,
            amount: payment.amount,
            payment_date: payment.payment_date,
        }
    }
}

/// Payment as returned by the API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResource {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub amount: Money,
    pub payment_date: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl TryFrom<PaymentResource> for Payment {
    type Error = HttpError;

    fn try_from(resource: PaymentResource) -> Result<Self, Self::Error> {
        let payment_date =
            strip_to_naive(&resource.payment_date).map_err(|e| HttpError::Decode(e.to_string()))?;
        Ok(Payment {
            id: PaymentId::from_uuid(resource.id),
            invoice_id: InvoiceId::from_uuid(resource.invoice_id),
            amount: resource.amount,
            payment_date,
            created_at: resource.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_date_has_no_fraction_or_zone() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 9)
            .unwrap()
            .and_hms_milli_opt(17, 21, 0, 456)
            .unwrap();
        let request = RecordPaymentRequest {
            invoice_id: InvoiceId::new(),
            amount: Money::new(dec!(65.00)),
            payment_date: date,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["paymentDate"], "2025-11-09T17:21:00");
        assert_eq!(json["amount"], 65.0);
        assert!(json["invoiceId"].as_str().is_some());
    }

    #[test]
    fn test_server_date_with_fraction_is_accepted() {
        let resource: PaymentResource = serde_json::from_value(serde_json::json!({
            "id": "7a1c9e42-3d5b-4f60-8b2e-1c0d9e8f7a6b",
            "invoiceId": "5d7f0c3e-1b2a-4c5d-8e9f-0a1b2c3d4e5f",
            "amount": 25.0,
            "paymentDate": "2025-11-09T17:21:00.123"
        }))
        .unwrap();
        let payment = Payment::try_from(resource).unwrap();
        assert_eq!(payment.payment_date.to_string(), "2025-11-09 17:21:00");
    }
}

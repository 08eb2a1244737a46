//! Adapter tests against a mock HTTP server

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use core_kernel::{AuthPort, CustomerId, ErrorKind, InvoiceId, LoginResponse, Money, Session};
use domain_billing::{InvoicePort, InvoiceQuery, InvoiceStatus, NewLineItem, NewPayment, PaymentPort};
use domain_customer::{CustomerForm, CustomerPort};
use infra_http::{
    ApiClient, HttpAuthAdapter, HttpClientConfig, HttpCustomerAdapter, HttpInvoiceAdapter,
    HttpPaymentAdapter,
};

const INVOICE_ID: &str = "5d7f0c3e-1b2a-4c5d-8e9f-0a1b2c3d4e5f";
const CUSTOMER_ID: &str = "0b8f1c2e-7c1a-4e0b-9a57-5e6b3d0c9f11";

fn client(server: &MockServer, session: Session) -> ApiClient {
    ApiClient::new(HttpClientConfig::new(format!("{}/api", server.uri())), session).unwrap()
}

async fn logged_in() -> Session {
    let session = Session::new();
    session.populate(LoginResponse::new("token-123", "owner@example.com")).await;
    session
}

fn invoice_json(status: &str, balance: f64) -> serde_json::Value {
    json!({
        "id": INVOICE_ID,
        "customerId": CUSTOMER_ID,
        "status": status,
        "lineItems": [
            {"lineItemId": "7a1c9e42-3d5b-4f60-8b2e-1c0d9e8f7a6b", "description": "Item 1",
             "quantity": 2, "unitPrice": 10.0, "subtotal": 20.0},
            {"lineItemId": "8b2d0f53-4e6c-4071-9c3f-2d1e0f9a8b7c", "description": "Item 2",
             "quantity": 3, "unitPrice": 15.0, "subtotal": 45.0}
        ],
        "balance": balance,
        "createdAt": "2025-11-09T17:21:00",
        "updatedAt": "2025-11-09T17:25:00"
    })
}

fn invoice_id() -> InvoiceId {
    INVOICE_ID.parse().unwrap()
}

mod invoices {
    use super::*;

    #[tokio::test]
    async fn test_create_invoice_sends_customer_id_and_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/invoices"))
            .and(header("Authorization", "Bearer token-123"))
            .and(body_json(json!({"customerId": CUSTOMER_ID})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": INVOICE_ID, "customerId": CUSTOMER_ID, "status": "DRAFT",
                "lineItems": [], "balance": 0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = HttpInvoiceAdapter::new(client(&server, logged_in().await));
        let invoice = adapter.create_invoice(CUSTOMER_ID.parse().unwrap()).await.unwrap();

        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert!(invoice.balance.is_zero());
        assert!(invoice.line_items.is_empty());
    }

    #[tokio::test]
    async fn test_add_line_item_body_and_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/api/invoices/{}/items", INVOICE_ID)))
            .and(body_json(json!({"description": "Item 2", "quantity": 3, "unitPrice": 15.0})))
            .respond_with(ResponseTemplate::new(200).set_body_json(invoice_json("DRAFT", 65.0)))
            .mount(&server)
            .await;

        let adapter = HttpInvoiceAdapter::new(client(&server, logged_in().await));
        let item = NewLineItem::new("Item 2", 3, Money::new(dec!(15.00))).unwrap();
        let invoice = adapter.add_line_item(invoice_id(), item).await.unwrap();

        assert_eq!(invoice.line_items.len(), 2);
        assert_eq!(invoice.balance, Money::new(dec!(65.00)));
    }

    #[tokio::test]
    async fn test_rejected_line_item_keeps_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/api/invoices/{}/items", INVOICE_ID)))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "status": 400,
                "error": "Bad Request",
                "message": "Cannot add line items to invoice in SENT state. Only Draft invoices can be modified.",
                "path": format!("/api/invoices/{}/items", INVOICE_ID),
                "validationErrors": null
            })))
            .mount(&server)
            .await;

        let adapter = HttpInvoiceAdapter::new(client(&server, logged_in().await));
        let item = NewLineItem::new("Late", 1, Money::new(dec!(1))).unwrap();
        let err = adapter.add_line_item(invoice_id(), item).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::PreconditionFailed);
        assert!(err.message().starts_with("Cannot add line items to invoice in SENT state"));
    }

    #[tokio::test]
    async fn test_send_invoice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/api/invoices/{}/send", INVOICE_ID)))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(invoice_json("SENT", 65.0)))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = HttpInvoiceAdapter::new(client(&server, logged_in().await));
        let invoice = adapter.send_invoice(invoice_id()).await.unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Sent);
    }

    #[tokio::test]
    async fn test_list_invoices_passes_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/invoices"))
            .and(query_param("customerId", CUSTOMER_ID))
            .and(query_param("status", "SENT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([invoice_json("SENT", 65.0)])))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = HttpInvoiceAdapter::new(client(&server, logged_in().await));
        let customer: CustomerId = CUSTOMER_ID.parse().unwrap();
        let invoices = adapter
            .list_invoices(InvoiceQuery::for_customer(customer).with_status(InvoiceStatus::Sent))
            .await
            .unwrap();
        assert_eq!(invoices.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_invoice_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/invoices/{}", INVOICE_ID)))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "status": 404, "error": "Not Found", "message": "Invoice not found"
            })))
            .mount(&server)
            .await;

        let adapter = HttpInvoiceAdapter::new(client(&server, logged_in().await));
        let err = adapter.get_invoice(invoice_id()).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Invoice"));
    }

    #[tokio::test]
    async fn test_unknown_status_is_transformation_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/invoices/{}", INVOICE_ID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(invoice_json("ARCHIVED", 0.0)))
            .mount(&server)
            .await;

        let adapter = HttpInvoiceAdapter::new(client(&server, logged_in().await));
        let err = adapter.get_invoice(invoice_id()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }
}

mod payments {
    use super::*;

    fn payment_date() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 9)
            .unwrap()
            .and_hms_milli_opt(17, 21, 0, 500)
            .unwrap()
    }

    #[tokio::test]
    async fn test_record_payment_sends_naive_date() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/payments"))
            .and(body_json(json!({
                "invoiceId": INVOICE_ID,
                "amount": 65.0,
                "paymentDate": "2025-11-09T17:21:00"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "9c3e1a64-5f7d-4182-ad40-3e2f1a0b9c8d",
                "invoiceId": INVOICE_ID,
                "amount": 65.0,
                "paymentDate": "2025-11-09T17:21:00",
                "createdAt": "2025-11-09T17:21:03"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = HttpPaymentAdapter::new(client(&server, logged_in().await));
        let payment = NewPayment::new(invoice_id(), Money::new(dec!(65.00)), payment_date()).unwrap();
        let recorded = adapter.record_payment(payment).await.unwrap();

        assert_eq!(recorded.amount, Money::new(dec!(65.00)));
        assert_eq!(recorded.invoice_id, invoice_id());
    }

    #[tokio::test]
    async fn test_overpayment_rejection_is_precondition() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/payments"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "status": 400,
                "error": "Bad Request",
                "message": "Payment amount cannot exceed invoice balance"
            })))
            .mount(&server)
            .await;

        let adapter = HttpPaymentAdapter::new(client(&server, logged_in().await));
        let payment = NewPayment::new(invoice_id(), Money::new(dec!(80.00)), payment_date()).unwrap();
        let err = adapter.record_payment(payment).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::PreconditionFailed);
        assert_eq!(err.message(), "Payment amount cannot exceed invoice balance");
    }

    #[tokio::test]
    async fn test_list_payments_for_invoice() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/payments/invoice/{}", INVOICE_ID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "9c3e1a64-5f7d-4182-ad40-3e2f1a0b9c8d", "invoiceId": INVOICE_ID,
                 "amount": 25.0, "paymentDate": "2025-11-01T00:00:00"},
                {"id": "ad4f2b75-6081-4293-be51-4f302b1cad9e", "invoiceId": INVOICE_ID,
                 "amount": 40.0, "paymentDate": "2025-11-09T10:00:00.250"}
            ])))
            .mount(&server)
            .await;

        let adapter = HttpPaymentAdapter::new(client(&server, logged_in().await));
        let payments = adapter.list_payments(invoice_id()).await.unwrap();
        assert_eq!(payments.len(), 2);
        assert_eq!(payments[1].amount, Money::new(dec!(40.00)));
    }
}

mod customers {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_email_is_conflict_on_email_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/customers"))
            .and(body_json(json!({"name": "Acme", "email": "billing@acme.test"})))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "status": 409,
                "error": "Conflict",
                "message": "Customer with email billing@acme.test already exists",
                "validationErrors": [{"field": "email", "message": "Email already exists"}]
            })))
            .mount(&server)
            .await;

        let adapter = HttpCustomerAdapter::new(client(&server, logged_in().await));
        let form = CustomerForm::new(" Acme ", "billing@acme.test").validate().unwrap();
        let err = adapter.create_customer(form).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.field_errors().for_field("email"), Some("Email already exists"));
    }

    #[tokio::test]
    async fn test_list_customers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/customers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": CUSTOMER_ID, "name": "Acme", "email": "billing@acme.test"}
            ])))
            .mount(&server)
            .await;

        let adapter = HttpCustomerAdapter::new(client(&server, logged_in().await));
        let customers = adapter.list_customers().await.unwrap();
        assert_eq!(customers[0].name, "Acme");
    }

    #[tokio::test]
    async fn test_delete_customer() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(format!("/api/customers/{}", CUSTOMER_ID)))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = HttpCustomerAdapter::new(client(&server, logged_in().await));
        adapter.delete_customer(CUSTOMER_ID.parse().unwrap()).await.unwrap();
    }
}

mod auth {
    use super::*;

    #[tokio::test]
    async fn test_login_returns_token_without_populating_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({"email": "owner@example.com", "password": "secret"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "jwt-abc", "email": "owner@example.com"
            })))
            .mount(&server)
            .await;

        let session = Session::new();
        let adapter = HttpAuthAdapter::new(client(&server, session.clone()));
        let response = adapter.login("owner@example.com", "secret").await.unwrap();

        assert_eq!(response.email, "owner@example.com");
        assert!(!session.is_active().await);
    }

    #[tokio::test]
    async fn test_bad_credentials_keep_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Invalid email or password"
            })))
            .mount(&server)
            .await;

        let adapter = HttpAuthAdapter::new(client(&server, Session::new()));
        let err = adapter.login("owner@example.com", "wrong").await.unwrap_err();

        assert!(err.is_auth_failure());
        assert_eq!(err.message(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_expired_token_clears_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/customers"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let session = logged_in().await;
        let adapter = HttpCustomerAdapter::new(client(&server, session.clone()));
        let err = adapter.list_customers().await.unwrap_err();

        assert!(err.is_auth_failure());
        assert!(!session.is_active().await);
    }

    #[tokio::test]
    async fn test_logout_sends_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .and(header("Authorization", "Bearer token-123"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = HttpAuthAdapter::new(client(&server, logged_in().await));
        adapter.logout().await.unwrap();
    }
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let config = HttpClientConfig::new("http://127.0.0.1:9/api");
    let adapter = HttpInvoiceAdapter::new(ApiClient::new(config, Session::new()).unwrap());
    let err = adapter.get_invoice(invoice_id()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

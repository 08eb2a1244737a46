//! Shared harness: an `AppState` over the in-memory ports

#![allow(dead_code)]

use std::sync::Arc;

use core_kernel::session::mock::MockAuthPort;
use core_kernel::Session;
use domain_billing::mock::InMemoryBilling;
use domain_customer::mock::MockCustomerPort;
use interface_app::AppState;
use test_utils::SessionFixtures;

pub struct TestApp {
    pub state: AppState,
    pub billing: InMemoryBilling,
    pub customers: MockCustomerPort,
    pub auth: MockAuthPort,
}

impl TestApp {
    /// Logged-in app over a backend that rejects overpayment
    pub async fn new() -> Self {
        Self::with_billing(InMemoryBilling::new()).await
    }

    pub async fn with_billing(billing: InMemoryBilling) -> Self {
        let app = Self::logged_out_with(billing).await;
        app.state
            .session
            .populate(core_kernel::LoginResponse::new("fixture-token", SessionFixtures::EMAIL))
            .await;
        app
    }

    pub async fn logged_out() -> Self {
        Self::logged_out_with(InMemoryBilling::new()).await
    }

    async fn logged_out_with(billing: InMemoryBilling) -> Self {
        let customers = MockCustomerPort::new();
        let auth = MockAuthPort::with_account(SessionFixtures::EMAIL, SessionFixtures::PASSWORD).await;
        let state = AppState::new(
            Arc::new(customers.clone()),
            Arc::new(billing.clone()),
            Arc::new(billing.clone()),
            Arc::new(auth.clone()),
            Session::new(),
        );
        Self {
            state,
            billing,
            customers,
            auth,
        }
    }
}

//! Invoicing Client Action Layer
//!
//! This crate is what a view talks to. Each action checks the session,
//! validates input, asks the lifecycle model whether the operation is
//! legal, issues the request and then refetches the authoritative state.
//!
//! # Architecture
//!
//! - **Handlers**: one async function per user action
//! - **Views**: display-ready representations (formatted money, labels,
//!   enabled controls)
//! - **Auth**: session guard and token expiry inspection
//! - **Errors**: `ActionError`, the single failure type actions return
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_app::{config::AppConfig, handlers::invoices, AppState};
//!
//! let (config, state) = interface_app::bootstrap()?;
//! let view = invoices::get_invoice(&state, invoice_id).await?;
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod reconcile;
pub mod telemetry;
pub mod views;

use std::sync::Arc;

use core_kernel::{AuthPort, Session};
use domain_billing::{InvoicePort, PaymentPort};
use domain_customer::CustomerPort;
use infra_http::{
    ApiClient, HttpAuthAdapter, HttpCustomerAdapter, HttpError, HttpInvoiceAdapter,
    HttpPaymentAdapter,
};

use crate::auth::SessionGuard;
use crate::config::AppConfig;

pub use error::{ActionError, BootstrapError};
pub use reconcile::Reconciled;

/// Ports and session shared by every action
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn CustomerPort>,
    pub invoices: Arc<dyn InvoicePort>,
    pub payments: Arc<dyn PaymentPort>,
    pub auth: Arc<dyn AuthPort>,
    pub session: Session,
}

impl AppState {
    pub fn new(
        customers: Arc<dyn CustomerPort>,
        invoices: Arc<dyn InvoicePort>,
        payments: Arc<dyn PaymentPort>,
        auth: Arc<dyn AuthPort>,
        session: Session,
    ) -> Self {
        Self {
            customers,
            invoices,
            payments,
            auth,
            session,
        }
    }

    /// Wires the HTTP adapters around one client and a fresh session
    pub fn connect(config: &AppConfig) -> Result<Self, HttpError> {
        let session = Session::new();
        let client = ApiClient::new(config.http_config(), session.clone())?;

        Ok(Self::new(
            Arc::new(HttpCustomerAdapter::new(client.clone())),
            Arc::new(HttpInvoiceAdapter::new(client.clone())),
            Arc::new(HttpPaymentAdapter::new(client.clone())),
            Arc::new(HttpAuthAdapter::new(client)),
            session,
        ))
    }

    pub fn guard(&self) -> SessionGuard {
        SessionGuard::new(self.session.clone())
    }
}

/// Loads configuration, installs tracing and connects the HTTP adapters
pub fn bootstrap() -> Result<(AppConfig, AppState), BootstrapError> {
    let config = AppConfig::from_env()?;
    telemetry::init_tracing(&config.log_level, config.log_json);
    tracing::info!(api_base_url = %config.api_base_url, "Starting invoicing client");

    let state = AppState::connect(&config)?;
    Ok((config, state))
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

//! Authentication adapter
//!
//! Login and registration return the token without touching the session;
//! the caller decides when to populate it.

use async_trait::async_trait;
use tracing::{info, instrument};

use core_kernel::{AuthPort, DomainPort, LoginResponse, PortError};

use crate::client::ApiClient;
use crate::resources::CredentialsRequest;

/// `AuthPort` over `/auth`
#[derive(Debug, Clone)]
pub struct HttpAuthAdapter {
    client: ApiClient,
}

impl HttpAuthAdapter {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl DomainPort for HttpAuthAdapter {}

#[async_trait]
impl AuthPort for HttpAuthAdapter {
    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, PortError> {
        let response: LoginResponse = self
            .client
            .post("/auth/login", &CredentialsRequest { email, password })
            .await?;
        info!("Login accepted");
        Ok(response)
    }

    #[instrument(skip(self, password))]
    async fn register(&self, email: &str, password: &str) -> Result<LoginResponse, PortError> {
        let response: LoginResponse = self
            .client
            .post("/auth/register", &CredentialsRequest { email, password })
            .await?;
        info!("Account registered");
        Ok(response)
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<(), PortError> {
        self.client.post_unit("/auth/logout").await?;
        Ok(())
    }
}

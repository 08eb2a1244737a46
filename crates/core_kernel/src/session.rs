//! Authenticated session
//!
//! The session is an explicit handle injected into every component that
//! issues authenticated calls. It is populated on login, and cleared on
//! logout or whenever the backend rejects the credential (401/403).
//! Clearing discards the credential for every clone of the handle at once.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{DomainPort, PortError};

/// Credential returned by a successful login or registration
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: SecretString,
    pub email: String,
}

impl LoginResponse {
    pub fn new(token: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into()),
            email: email.into(),
        }
    }
}

/// Read-only view of an active session
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub token: SecretString,
    pub email: String,
    pub established_at: DateTime<Utc>,
}

/// Cloneable handle to the process-wide session
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<Option<SessionSnapshot>>>,
}

impl Session {
    /// Creates an empty (logged out) session
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the credential from a successful login
    pub async fn populate(&self, response: LoginResponse) {
        let mut guard = self.inner.write().await;
        *guard = Some(SessionSnapshot {
            token: response.token,
            email: response.email,
            established_at: Utc::now(),
        });
    }

    /// Discards the credential
    pub async fn clear(&self) {
        let mut guard = self.inner.write().await;
        *guard = None;
    }

    pub async fn snapshot(&self) -> Option<SessionSnapshot> {
        self.inner.read().await.clone()
    }

    pub async fn is_active(&self) -> bool {
        self.inner.read().await.is_some()
    }

    /// The bearer token, if logged in
    pub async fn bearer_token(&self) -> Option<String> {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|s| s.token.expose_secret().clone())
    }

    pub async fn email(&self) -> Option<String> {
        self.inner.read().await.as_ref().map(|s| s.email.clone())
    }
}

/// Port for the authentication resource
#[async_trait]
pub trait AuthPort: DomainPort {
    /// Exchanges credentials for a token
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, PortError>;

    /// Creates an account and returns its token
    async fn register(&self, email: &str, password: &str) -> Result<LoginResponse, PortError>;

    /// Notifies the backend that the current credential is being discarded
    async fn logout(&self) -> Result<(), PortError>;
}

/// Mock implementation of AuthPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
    pub const ALREADY_REGISTERED: &str = "User with this email already exists";

    /// In-memory accounts issuing opaque tokens
    #[derive(Debug, Default, Clone)]
    pub struct MockAuthPort {
        accounts: Arc<RwLock<HashMap<String, String>>>,
        issued: Arc<AtomicUsize>,
        logouts: Arc<AtomicUsize>,
        fail_logout: Arc<AtomicBool>,
    }

    impl MockAuthPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn with_account(email: &str, password: &str) -> Self {
            let port = Self::new();
            port.accounts
                .write()
                .await
                .insert(email.to_lowercase(), password.to_string());
            port
        }

        /// Makes every subsequent logout call fail with a server error
        pub fn fail_logout(&self) {
            self.fail_logout.store(true, Ordering::SeqCst);
        }

        pub fn logout_calls(&self) -> usize {
            self.logouts.load(Ordering::SeqCst)
        }

        fn issue(&self, email: &str) -> LoginResponse {
            let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            LoginResponse::new(format!("mock-token-{}", n), email)
        }
    }

    impl DomainPort for MockAuthPort {}

    #[async_trait]
    impl AuthPort for MockAuthPort {
        async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, PortError> {
            let accounts = self.accounts.read().await;
            match accounts.get(&email.to_lowercase()) {
                Some(stored) if stored == password => Ok(self.issue(email)),
                _ => Err(PortError::unauthorized(INVALID_CREDENTIALS)),
            }
        }

        async fn register(&self, email: &str, password: &str) -> Result<LoginResponse, PortError> {
            let mut accounts = self.accounts.write().await;
            let key = email.to_lowercase();
            if accounts.contains_key(&key) {
                return Err(PortError::conflict(ALREADY_REGISTERED, Some("email".to_string())));
            }
            accounts.insert(key, password.to_string());
            Ok(self.issue(email))
        }

        async fn logout(&self) -> Result<(), PortError> {
            self.logouts.fetch_add(1, Ordering::SeqCst);
            if self.fail_logout.load(Ordering::SeqCst) {
                return Err(PortError::Server {
                    status: 500,
                    message: "Logout failed".to_string(),
                });
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let session = Session::new();
        assert!(!session.is_active().await);
        assert!(session.bearer_token().await.is_none());

        session
            .populate(LoginResponse::new("abc.def.ghi", "user@example.com"))
            .await;
        assert!(session.is_active().await);
        assert_eq!(session.bearer_token().await.as_deref(), Some("abc.def.ghi"));
        assert_eq!(session.email().await.as_deref(), Some("user@example.com"));

        session.clear().await;
        assert!(!session.is_active().await);
    }

    #[tokio::test]
    async fn test_clear_is_visible_to_clones() {
        let session = Session::new();
        let handle = session.clone();
        session.populate(LoginResponse::new("t", "a@b.com")).await;
        assert!(handle.is_active().await);

        handle.clear().await;
        assert!(!session.is_active().await);
    }

    #[test]
    fn test_token_is_not_debug_printed() {
        let response = LoginResponse::new("super-secret-token", "a@b.com");
        assert!(!format!("{:?}", response).contains("super-secret-token"));
    }

    #[tokio::test]
    async fn test_mock_auth_rejects_wrong_password() {
        let port = mock::MockAuthPort::with_account("a@b.com", "pw").await;
        assert!(port.login("a@b.com", "pw").await.is_ok());

        let err = port.login("a@b.com", "nope").await.unwrap_err();
        assert!(err.is_auth_failure());
        assert_eq!(err.message(), mock::INVALID_CREDENTIALS);

        let err = port.register("A@B.com", "pw").await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Conflict);
    }

    #[test]
    fn test_login_response_deserializes() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"token":"jwt","email":"a@b.com"}"#).unwrap();
        assert_eq!(response.token.expose_secret(), "jwt");
        assert_eq!(response.email, "a@b.com");
    }
}

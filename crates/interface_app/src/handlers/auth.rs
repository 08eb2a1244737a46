//! Login, registration and logout

use serde::Deserialize;
use tracing::{info, instrument, warn};
use validator::ValidateEmail;

use core_kernel::ValidationErrors;

use crate::error::ActionError;
use crate::AppState;

pub const EMAIL_INVALID: &str = "Email must be valid";
pub const PASSWORD_REQUIRED: &str = "Password is required";

/// Login and registration form input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
}

impl CredentialsForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    fn validate(&self) -> Result<(&str, &str), ValidationErrors> {
        let email = self.email.trim();
        let mut errors = ValidationErrors::new();
        if !email.validate_email() {
            errors.add("email", EMAIL_INVALID);
        }
        if self.password.is_empty() {
            errors.add("password", PASSWORD_REQUIRED);
        }
        errors.into_result((email, self.password.as_str()))
    }
}

/// Exchanges credentials for a session; returns the logged-in email
#[instrument(skip(state, form))]
pub async fn login(state: &AppState, form: &CredentialsForm) -> Result<String, ActionError> {
    let (email, password) = form.validate()?;
    let response = state.auth.login(email, password).await?;
    let email = response.email.clone();
    state.session.populate(response).await;
    info!(%email, "Logged in");
    Ok(email)
}

/// Creates an account and logs it in
#[instrument(skip(state, form))]
pub async fn register(state: &AppState, form: &CredentialsForm) -> Result<String, ActionError> {
    let (email, password) = form.validate()?;
    let response = state.auth.register(email, password).await?;
    let email = response.email.clone();
    state.session.populate(response).await;
    info!(%email, "Registered");
    Ok(email)
}

/// Ends the session
///
/// The local session is cleared whether or not the backend call succeeds.
#[instrument(skip(state))]
pub async fn logout(state: &AppState) {
    if !state.session.is_active().await {
        return;
    }
    if let Err(e) = state.auth.logout().await {
        warn!(error = %e, "Backend logout failed");
    }
    state.session.clear().await;
    info!("Logged out");
}

// ── Admin sign-in ──
//
// Local credential checks, login against the API, and session lifecycle.
// The session itself lives in the client's `SessionStore`.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};
use yebomart_api::AdminClient;

use crate::error::CoreError;
use crate::model::AdminUser;

pub struct AuthController {
    client: AdminClient,
}

impl AuthController {
    pub fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// Profile of a session persisted by an earlier run, if any.
    pub fn restore(&self) -> Option<Arc<AdminUser>> {
        let user = self.client.session().user();
        debug!(restored = user.is_some(), "session restore");
        user
    }

    /// Sign in and persist the issued session.
    ///
    /// Malformed input is rejected before any request is made.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Arc<AdminUser>, CoreError> {
        validate_credentials(email, password)?;

        let session = self.client.login(email.trim(), password).await?;
        self.client
            .session()
            .establish(session.token, session.user)?;

        let user = self
            .client
            .session()
            .user()
            .ok_or(CoreError::InvalidResponse)?;
        info!(email = %user.email, "signed in");
        Ok(user)
    }

    /// Forget the token and cached profile.
    pub fn logout(&self) -> Result<(), CoreError> {
        self.client.session().clear()?;
        info!("signed out");
        Ok(())
    }

    pub fn current_user(&self) -> Option<Arc<AdminUser>> {
        self.client.session().user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }

    /// Current user, or [`CoreError::NotAuthenticated`].
    pub fn require_user(&self) -> Result<Arc<AdminUser>, CoreError> {
        self.current_user().ok_or(CoreError::NotAuthenticated)
    }
}

fn validate_credentials(email: &str, password: &SecretString) -> Result<(), CoreError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(CoreError::ValidationFailed {
            message: "a valid email address is required".into(),
        });
    }
    if password.expose_secret().is_empty() {
        return Err(CoreError::ValidationFailed {
            message: "password is required".into(),
        });
    }
    Ok(())
}

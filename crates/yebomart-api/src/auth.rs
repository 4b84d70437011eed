// Admin authentication
//
// `POST /api/admin/login` answers `{ accessToken, admin }`. The client
// only remaps the payload; persisting the session is left to the caller.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::AdminClient;
use crate::error::Error;
use crate::models::{AdminUser, LoginPayload, LoginRequest};

/// Token and profile issued by a successful login.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub token: SecretString,
    pub user: AdminUser,
}

impl AdminClient {
    /// Exchange credentials for a bearer token and admin profile.
    ///
    /// A success response that lacks either the token or a readable
    /// profile yields [`Error::InvalidResponse`].
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginSession, Error> {
        debug!(email, "authenticating admin");
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };

        let payload: Option<LoginPayload> = self.post("/api/admin/login", &body).await?;
        let Some(payload) = payload else {
            return Err(Error::InvalidResponse);
        };

        let token = payload
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(Error::InvalidResponse)?;
        let user = payload
            .admin
            .and_then(|raw| serde_json::from_value::<AdminUser>(raw).ok())
            .ok_or(Error::InvalidResponse)?;

        Ok(LoginSession {
            token: SecretString::from(token),
            user,
        })
    }
}

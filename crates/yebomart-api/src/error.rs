use thiserror::Error;

use crate::session::StorageError;

/// Top-level error type for the `yebomart-api` crate.
///
/// Every failure the admin API can produce is folded into one of these
/// variants before it leaves the client. The `Display` text of the first
/// three variants is the exact message the dashboard shows to an operator,
/// so callers can surface `err.to_string()` as-is.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// Connection refused, DNS failure, timeout, or a body that could
    /// not be read off the wire.
    #[error("Network error")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server ──────────────────────────────────────────────────────
    /// Non-2xx response. `message` is the server's `{message}` field,
    /// or `"Request failed"` when the body carries none.
    #[error("{message}")]
    Api { status: u16, message: String },

    // ── Payload shape ───────────────────────────────────────────────
    /// The call succeeded but the payload lacked fields the caller
    /// cannot work without (e.g. a login response without a token).
    #[error("Invalid response from server")]
    InvalidResponse,

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A request body could not be encoded as JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    // ── Session ─────────────────────────────────────────────────────
    /// Durable session storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Error {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the server rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

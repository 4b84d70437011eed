// ── Core error types ──
//
// User-facing errors from yebomart-core. The `From<yebomart_api::Error>`
// impl folds transport-layer failures into domain variants so consumers
// match on meaning rather than on HTTP details.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    /// Carries the operator-facing message (`"Network error"`).
    #[error("{message}")]
    ConnectionFailed { message: String },

    #[error("{message}")]
    AuthenticationFailed { message: String },

    #[error("Not signed in")]
    NotAuthenticated,

    // ── Server errors ────────────────────────────────────────────────
    /// Non-2xx response; `message` is what the server said.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response from server")]
    InvalidResponse,

    // ── Local errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("Another operation is already in progress")]
    OperationInProgress,

    #[error("Session storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// HTTP status behind a server rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<yebomart_api::Error> for CoreError {
    fn from(err: yebomart_api::Error) -> Self {
        match err {
            yebomart_api::Error::Network(_) => CoreError::ConnectionFailed {
                message: err.to_string(),
            },
            yebomart_api::Error::Api { status, message } if status == 401 => {
                CoreError::AuthenticationFailed { message }
            }
            yebomart_api::Error::Api { status, message } => {
                CoreError::Rejected { status, message }
            }
            yebomart_api::Error::InvalidResponse | yebomart_api::Error::Deserialization { .. } => {
                CoreError::InvalidResponse
            }
            yebomart_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid API URL: {e}"),
            },
            yebomart_api::Error::Tls(message) => CoreError::Config { message },
            yebomart_api::Error::Encode(e) => CoreError::Internal(e.to_string()),
            yebomart_api::Error::Storage(e) => CoreError::Storage { message: e.message },
        }
    }
}

impl From<yebomart_api::StorageError> for CoreError {
    fn from(err: yebomart_api::StorageError) -> Self {
        CoreError::Storage {
            message: err.message,
        }
    }
}

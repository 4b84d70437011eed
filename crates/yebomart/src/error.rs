//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and distinct exit codes.

use miette::Diagnostic;
use thiserror::Error;

use yebomart_config::ConfigError;
use yebomart_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(yebomart::connection_failed),
        help(
            "Could not reach the admin API at {url}.\n\
             Check --api-url, or use --data-source demo to work offline."
        )
    )]
    ConnectionFailed { url: String, message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(yebomart::auth_failed),
        help("Sign in again with: yebomart login --profile {profile}")
    )]
    AuthFailed { profile: String, message: String },

    #[error("Not signed in")]
    #[diagnostic(
        code(yebomart::not_authenticated),
        help("Sign in with: yebomart login --profile {profile}")
    )]
    NotAuthenticated { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(yebomart::not_found),
        help("Run: yebomart {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{message}")]
    #[diagnostic(code(yebomart::conflict))]
    Conflict { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(yebomart::api_error))]
    ApiError { status: Option<u16>, message: String },

    #[error("{succeeded} of {total} subscriptions updated; {failed} failed")]
    #[diagnostic(
        code(yebomart::partial_failure),
        help("Failed rows are listed above. Re-run the command for those IDs.")
    )]
    PartialFailure {
        total: usize,
        succeeded: usize,
        failed: usize,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(yebomart::validation))]
    Validation { field: String, reason: String },

    #[error("Another operation is already in progress")]
    #[diagnostic(code(yebomart::busy))]
    Busy,

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(yebomart::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: yebomart config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(yebomart::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(yebomart::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode output: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NotAuthenticated { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::ApiError {
                status: Some(401 | 403),
                ..
            } => exit_code::AUTH,
            Self::ApiError {
                status: Some(404), ..
            } => exit_code::NOT_FOUND,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { message } => CliError::ConnectionFailed {
                url: String::from("(configured API)"),
                message,
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed {
                profile: "default".into(),
                message,
            },

            CoreError::NotAuthenticated => CliError::NotAuthenticated {
                profile: "default".into(),
            },

            CoreError::Rejected { status: 409, message } => CliError::Conflict { message },

            CoreError::Rejected { status, message } => CliError::ApiError {
                status: Some(status),
                message,
            },

            CoreError::InvalidResponse => CliError::ApiError {
                status: None,
                message: "Invalid response from server".into(),
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::NotFound { entity, identifier } => {
                let resource_type = entity.to_lowercase();
                CliError::NotFound {
                    list_command: format!("{resource_type}s list"),
                    resource_type,
                    identifier,
                }
            }

            CoreError::OperationInProgress => CliError::Busy,

            CoreError::Storage { message }
            | CoreError::Config { message }
            | CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

/// Fill in context the core layer does not know about.
pub fn with_context(err: CliError, profile: &str, api_url: &str) -> CliError {
    match err {
        CliError::ConnectionFailed { message, .. } => CliError::ConnectionFailed {
            url: api_url.to_owned(),
            message,
        },
        CliError::AuthFailed { message, .. } => CliError::AuthFailed {
            profile: profile.to_owned(),
            message,
        },
        CliError::NotAuthenticated { .. } => CliError::NotAuthenticated {
            profile: profile.to_owned(),
        },
        other => other,
    }
}

//! CLI configuration: thin wrapper around `yebomart_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--api-url, --data-source, --timeout, etc.) on top of the profile.

use yebomart_config::ConfigError;
use yebomart_core::ClientConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use yebomart_config::{
    Config, DEFAULT_PROFILE, Profile, SessionBackend, config_path, load_config,
    open_session_storage, profile_to_client_config, save_config, session_path,
};

/// A profile with every CLI override applied.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub profile_name: String,
    pub profile: Profile,
    pub client: ClientConfig,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| DEFAULT_PROFILE.into())
}

/// Load config and build the `ClientConfig` for the active profile.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let cfg = load_config()?;
    let name = active_profile_name(global, &cfg);

    let (profile_name, mut profile) = cfg.resolve_profile(Some(&name)).map_err(|e| match e {
        ConfigError::UnknownProfile { name } => {
            let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
            available.sort();
            CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            }
        }
        other => other.into(),
    })?;

    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if let Some(source) = global.data_source {
        profile.data_source = Some(source.into());
    }
    if let Some(reconcile) = global.reconcile {
        profile.reconcile = Some(reconcile.into());
    }

    let client = profile_to_client_config(&profile, &cfg.defaults)?;
    Ok(Resolved {
        profile_name,
        profile,
        client,
    })
}

//! Configuration for the YeboMart admin CLI.
//!
//! TOML profiles merged with `YEBOMART_*` environment overrides, the
//! durable session backends a profile can select (JSON file or OS
//! keyring), and translation to `yebomart_core::ClientConfig`.

pub mod store;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use yebomart_core::{
    ClientConfig, DEFAULT_API_URL, DataSource, KeyValueStore, MemoryStore, ReconcileStrategy,
    StorageError, TlsVerification,
};

pub use store::{FileStore, KEYRING_SERVICE, KeyringStore};

/// Overrides the config file location when set.
pub const CONFIG_PATH_ENV: &str = "YEBOMART_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

/// Name of the implicit profile.
pub const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub data_source: DataSource,

    #[serde(default)]
    pub reconcile: ReconcileStrategy,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            data_source: DataSource::default(),
            reconcile: ReconcileStrategy::default(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

/// Where a profile keeps its session between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// JSON file under the platform data directory.
    #[default]
    File,
    /// OS credential store.
    Keyring,
    /// Nothing persists past the current process.
    Memory,
}

/// A named backend profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// API root (e.g., "https://api.yebomart.com").
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Admin email pre-filled at login.
    pub email: Option<String>,

    /// Overrides `defaults.data_source`.
    pub data_source: Option<DataSource>,

    /// Overrides `defaults.reconcile`.
    pub reconcile: Option<ReconcileStrategy>,

    #[serde(default)]
    pub session_backend: SessionBackend,

    /// Overrides `defaults.timeout`, in seconds.
    pub timeout: Option<u64>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Skip TLS verification (staging backends only).
    pub insecure: Option<bool>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            email: None,
            data_source: None,
            reconcile: None,
            session_backend: SessionBackend::default(),
            timeout: None,
            ca_cert: None,
            insecure: None,
        }
    }
}

impl Config {
    /// Pick a profile by name, falling back to `default_profile`.
    ///
    /// The implicit `default` profile resolves even when the file does not
    /// define it; any other unknown name is an error.
    pub fn resolve_profile(&self, name: Option<&str>) -> Result<(String, Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or(DEFAULT_PROFILE)
            .to_owned();

        match self.profiles.get(&name) {
            Some(profile) => Ok((name, profile.clone())),
            None if name == DEFAULT_PROFILE => Ok((name, Profile::default())),
            None => Err(ConfigError::UnknownProfile { name }),
        }
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "yebomart", "yebomart")
}

fn home_fallback(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.extend(parts);
    p
}

/// Resolve the config file path: `$YEBOMART_CONFIG`, else XDG / platform
/// conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    project_dirs().map_or_else(
        || home_fallback(&[".config", "yebomart", "config.toml"]),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// File holding the persisted session for `profile`.
pub fn session_path(profile: &str) -> PathBuf {
    let file = format!("{profile}.json");
    project_dirs().map_or_else(
        || home_fallback(&[".local", "share", "yebomart", "sessions", &file]),
        |dirs| dirs.data_local_dir().join("sessions").join(&file),
    )
}

// ── Loading & saving ────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` (missing file = defaults), then apply `YEBOMART_*`
/// environment overrides. Nested keys use `__`, e.g.
/// `YEBOMART_DEFAULTS__TIMEOUT=10`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("YEBOMART_").split("__"));

    Ok(figment.extract()?)
}

/// Serialize config to TOML and write it to the canonical path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `ClientConfig` from a profile and the global defaults.
pub fn profile_to_client_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let url: url::Url = profile
        .api_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL: {}", profile.api_url),
        })?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let mut config = ClientConfig::new(url)
        .with_data_source(profile.data_source.unwrap_or(defaults.data_source))
        .with_reconcile(profile.reconcile.unwrap_or(defaults.reconcile));
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    config.tls = tls;
    Ok(config)
}

/// Open the durable session backend a profile selects.
pub fn open_session_storage(profile_name: &str, profile: &Profile) -> Arc<dyn KeyValueStore> {
    let store: Arc<dyn KeyValueStore> = match profile.session_backend {
        SessionBackend::File => Arc::new(FileStore::new(session_path(profile_name))),
        SessionBackend::Keyring => Arc::new(KeyringStore::new(profile_name)),
        SessionBackend::Memory => Arc::new(MemoryStore::new()),
    };
    debug!(profile = profile_name, backend = ?profile.session_backend, "session storage opened");
    store
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.timeout, 30);
        assert_eq!(cfg.defaults.data_source, DataSource::Auto);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn profiles_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "staging".into(),
            Profile {
                api_url: "https://staging.yebomart.com".into(),
                email: Some("ops@yebomart.com".into()),
                data_source: Some(DataSource::Live),
                session_backend: SessionBackend::Memory,
                timeout: Some(5),
                ..Profile::default()
            },
        );
        cfg.default_profile = Some("staging".into());
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        let (name, profile) = loaded.resolve_profile(None).unwrap();
        assert_eq!(name, "staging");
        assert_eq!(profile.api_url, "https://staging.yebomart.com");
        assert_eq!(profile.data_source, Some(DataSource::Live));
        assert_eq!(profile.session_backend, SessionBackend::Memory);
    }

    #[test]
    fn implicit_default_profile_resolves() {
        let cfg = Config::default();
        let (name, profile) = cfg.resolve_profile(None).unwrap();
        assert_eq!(name, "default");
        assert_eq!(profile.api_url, DEFAULT_API_URL);

        assert!(matches!(
            cfg.resolve_profile(Some("prod")),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn client_config_applies_profile_overrides() {
        let defaults = Defaults::default();
        let profile = Profile {
            api_url: "https://staging.yebomart.com".into(),
            data_source: Some(DataSource::Demo),
            timeout: Some(7),
            insecure: Some(true),
            ..Profile::default()
        };
        let cfg = profile_to_client_config(&profile, &defaults).unwrap();
        assert_eq!(cfg.base_url.as_str(), "https://staging.yebomart.com/");
        assert_eq!(cfg.data_source, DataSource::Demo);
        assert_eq!(cfg.reconcile, ReconcileStrategy::Optimistic);
        assert_eq!(cfg.timeout, Duration::from_secs(7));
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);

        let bad = Profile {
            api_url: "not a url".into(),
            ..Profile::default()
        };
        assert!(matches!(
            profile_to_client_config(&bad, &defaults),
            Err(ConfigError::Validation { .. })
        ));
    }
}

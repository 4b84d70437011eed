// ── Runtime client configuration ──
//
// These types describe *how* to reach the admin API and how list and
// detail controllers behave. They never touch disk: the CLI builds a
// `ClientConfig` from its profile and hands it in.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;
use yebomart_api::{TlsMode, TransportConfig};

/// Production API root.
pub const DEFAULT_API_URL: &str = "https://api.yebomart.com";

/// Where list and dashboard data comes from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DataSource {
    /// Backend only; failures surface as errors.
    Live,
    /// Built-in demo dataset only; no network traffic.
    Demo,
    /// Backend first, demo dataset when the backend yields nothing.
    #[default]
    Auto,
}

/// How a detail view is brought up to date after a successful mutation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReconcileStrategy {
    /// Merge the submitted change into local state.
    #[default]
    Optimistic,
    /// Re-read the entity from the backend.
    Refetch,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (local staging backends).
    DangerAcceptInvalid,
}

/// Configuration for one admin console session.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root (e.g. `https://api.yebomart.com`).
    pub base_url: Url,
    pub timeout: Duration,
    pub tls: TlsVerification,
    pub data_source: DataSource,
    pub reconcile: ReconcileStrategy,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
            tls: TlsVerification::default(),
            data_source: DataSource::default(),
            reconcile: ReconcileStrategy::default(),
        }
    }

    pub fn with_data_source(mut self, data_source: DataSource) -> Self {
        self.data_source = data_source;
        self
    }

    pub fn with_reconcile(mut self, reconcile: ReconcileStrategy) -> Self {
        self.reconcile = reconcile;
        self
    }

    /// Transport settings for the underlying HTTP client.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig::default()
            .with_timeout(self.timeout)
            .with_tls(tls)
    }
}

// ── Shared enumerations ──
//
// Tier, status and role vocabularies. Every enum parses case-insensitively
// from the backend's strings; unknown or missing values fall back to the
// variant marked `#[default]`.

use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

/// Subscription plan level.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Tier {
    #[default]
    #[strum(serialize = "FREE")]
    #[serde(rename = "FREE")]
    Free,
    Lite,
    Starter,
    Business,
    Pro,
    Enterprise,
}

impl Tier {
    /// Every tier, cheapest first. Tier changes are validated against this.
    pub const ALL: [Tier; 6] = [
        Tier::Free,
        Tier::Lite,
        Tier::Starter,
        Tier::Business,
        Tier::Pro,
        Tier::Enterprise,
    ];

    /// Parse a backend value; `None` or empty yields [`Tier::Free`].
    pub fn from_wire(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

/// Shop lifecycle status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ShopStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
    Pending,
}

impl ShopStatus {
    pub fn from_wire(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse().ok()).unwrap_or_default()
    }

    /// Status a suspend/reactivate toggle moves to.
    pub fn toggle_target(self) -> Self {
        match self {
            Self::Suspended => Self::Active,
            Self::Active | Self::Inactive | Self::Pending => Self::Suspended,
        }
    }
}

/// Subscription billing status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Expired,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn from_wire(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse().ok()).unwrap_or_default()
    }
}

/// Role of a staff account within its shop.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StaffRole {
    Owner,
    Manager,
    #[default]
    Cashier,
}

impl StaffRole {
    pub fn from_wire(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse().ok()).unwrap_or_default()
    }
}

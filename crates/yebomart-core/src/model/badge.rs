// ── Badge variants ──
//
// Colour class for tier and status labels. Lookups lower-case their
// input; anything unrecognised renders with the neutral default.

use serde::Serialize;
use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BadgeVariant {
    #[default]
    Default,
    Muted,
    Info,
    Warning,
    Success,
    Danger,
}

pub fn tier_badge(tier: &str) -> BadgeVariant {
    match tier.to_lowercase().as_str() {
        "free" | "lite" => BadgeVariant::Muted,
        "starter" => BadgeVariant::Info,
        "business" => BadgeVariant::Warning,
        "pro" => BadgeVariant::Success,
        "enterprise" => BadgeVariant::Danger,
        _ => BadgeVariant::Default,
    }
}

/// Covers both shop and subscription statuses.
pub fn status_badge(status: &str) -> BadgeVariant {
    match status.to_lowercase().as_str() {
        "active" => BadgeVariant::Success,
        "inactive" | "cancelled" => BadgeVariant::Muted,
        "suspended" | "expired" => BadgeVariant::Danger,
        "pending" => BadgeVariant::Warning,
        _ => BadgeVariant::Default,
    }
}

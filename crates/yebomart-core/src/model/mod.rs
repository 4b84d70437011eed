// ── Domain model ──
//
// Canonical representations of the entities the admin console works
// with. Wire records from `yebomart-api` are converted into these by
// `crate::convert`; consumers (CLI, tests) depend only on this module.

pub mod badge;
pub mod common;
pub mod shop;
pub mod subscription;
pub mod user;

pub use badge::{BadgeVariant, status_badge, tier_badge};
pub use common::{ShopStatus, StaffRole, SubscriptionStatus, Tier};
pub use shop::{Shop, ShopStats};
pub use subscription::Subscription;
pub use user::{StaffUser, UserActivity};

pub use yebomart_api::models::{AdminUser, AnalyticsPeriod, DashboardStats};

//! Domain layer between `yebomart-api` and the admin CLI.
//!
//! - **[`AdminConsole`]**: facade owning the API client and one controller
//!   per screen, built from a [`ClientConfig`].
//!
//! - **[`ListController<E>`](list::ListController)**: derives the visible
//!   page of shops, staff users or subscriptions from a [`QueryState`],
//!   from the live backend or a deterministic demo dataset depending on
//!   the configured [`DataSource`]. Refreshes are generation-stamped and
//!   cancellable; views are published on a `tokio::sync::watch` channel.
//!
//! - **Actions** ([`action`]): shop tier change, suspend/reactivate and
//!   delete behind a [`ConfirmDialog`], plus bulk tier changes and renewals
//!   over an id-keyed subscription selection.
//!
//! - **[`AuthController`]** and **[`DashboardController`]**: session
//!   lifecycle and aggregate counters.
//!
//! - **Domain model** ([`model`]): `Shop`, `StaffUser`, `Subscription` and
//!   their tier / status / role vocabularies.

pub mod action;
pub mod auth;
pub mod config;
pub mod console;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod fallback;
pub mod list;
pub mod model;
pub mod pagination;
pub mod query;

// ── Primary re-exports ──────────────────────────────────────────────
pub use action::{
    BulkAction, BulkFailure, BulkOutcome, ConfirmDialog, Navigation, ShopAction,
    ShopDetailController, SubscriptionBulkController, SubscriptionSelection,
};
pub use auth::AuthController;
pub use config::{ClientConfig, DEFAULT_API_URL, DataSource, ReconcileStrategy, TlsVerification};
pub use console::{AdminConsole, DEFAULT_ACTIVITY_DAYS};
pub use dashboard::{DashboardController, DashboardView};
pub use error::CoreError;
pub use list::{ListController, ListEntity, ListView, ViewSource, tier_breakdown};
pub use query::QueryState;

pub use model::{
    AdminUser, AnalyticsPeriod, BadgeVariant, DashboardStats, Shop, ShopStats, ShopStatus,
    StaffRole, StaffUser, Subscription, SubscriptionStatus, Tier, UserActivity, status_badge,
    tier_badge,
};

pub use yebomart_api::{KeyValueStore, MemoryStore, SessionStore, StorageError};

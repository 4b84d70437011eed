//! Async Rust client for the YeboMart admin REST API.
//!
//! [`AdminClient`] wraps `reqwest` with bearer-token injection from a
//! [`SessionStore`] and unwraps the `{ success, data }` envelope every
//! endpoint answers with. Endpoint groups live in their own modules as
//! inherent `impl AdminClient` blocks:
//!
//! - [`auth`]: login
//! - [`shops`]: list, detail, status change, delete
//! - [`users`]: list, activity detail
//! - [`subscriptions`]: list, tier / expiry update
//! - [`analytics`]: dashboard counters, analytics, health
//!
//! Failures are reported as [`Error`]; its `Display` text for network,
//! server and payload-shape errors is suitable for showing to operators
//! verbatim.

pub mod analytics;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod session;
pub mod shops;
pub mod subscriptions;
pub mod transport;
pub mod users;

pub use auth::LoginSession;
pub use client::{AdminClient, RequestOptions};
pub use error::Error;
pub use models::{
    AdminUser, AnalyticsPeriod, DashboardStats, ListParams, ShopPage, ShopRecord,
    SubscriptionRecord, SubscriptionUpdate, UserDetail, UserPage, UserRecord,
};
pub use session::{KeyValueStore, MemoryStore, SessionStore, StorageError};
pub use transport::{TlsMode, TransportConfig};

pub use reqwest::Method;

// ── Staff user domain types ──

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::common::StaffRole;

pub use yebomart_api::models::{DailySales, Insight, RecentSale, UserSalesStats};

/// A staff account belonging to some shop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub shop_name: String,
    pub role: StaffRole,
    /// Human-readable recency ("2 minutes ago"), as the backend reports it.
    pub last_active: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Sales activity of one staff member over a trailing window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    pub user: StaffUser,
    /// Window length in days.
    pub days: u32,
    pub stats: UserSalesStats,
    pub daily_sales: Vec<DailySales>,
    pub recent_sales: Vec<RecentSale>,
    pub insights: Vec<Insight>,
}

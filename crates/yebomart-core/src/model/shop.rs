// ── Shop domain type ──

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::common::{ShopStatus, Tier};

/// A tenant shop as displayed in lists and the detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: String,
    pub name: String,
    pub owner_name: String,
    /// Owner contact number (falls back to the shop's own phone).
    pub phone: String,
    pub owner_email: Option<String>,
    pub address: Option<String>,
    pub tier: Tier,
    pub status: ShopStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub license_expiry: Option<DateTime<Utc>>,
    /// Only populated by the detail endpoint.
    pub stats: Option<ShopStats>,
}

/// Activity counters reported alongside a shop detail.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopStats {
    pub product_count: Option<u64>,
    pub user_count: Option<u64>,
    pub sale_count: Option<u64>,
    pub total_revenue: Option<f64>,
}

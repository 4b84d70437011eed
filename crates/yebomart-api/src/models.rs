// ── Admin API wire types ──
//
// Request and response shapes as the backend sends them. Fields the
// backend may omit are `Option`; the domain layer in `yebomart-core`
// applies defaults (tier `FREE`, status `active`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Envelope ────────────────────────────────────────────────────────

/// Success envelope: `{ "success": bool, "data": T }`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body: `{ "message": "..." }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// ── Auth ────────────────────────────────────────────────────────────

/// Signed-in administrator profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
}

/// Admin ids arrive as strings or bare numbers depending on the backend.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginPayload {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub admin: Option<serde_json::Value>,
}

// ── Listing parameters ──────────────────────────────────────────────

/// Paging, search and filter parameters for list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub filters: Vec<(String, String)>,
}

impl ListParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            search: None,
            filters: Vec::new(),
        }
    }

    /// Query string including the leading `?`. Empty search text and
    /// empty filter values are omitted.
    pub fn query_suffix(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.append_pair("page", &self.page.to_string());
        query.append_pair("limit", &self.limit.to_string());
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            query.append_pair("search", search);
        }
        for (key, value) in &self.filters {
            if !value.is_empty() {
                query.append_pair(key, value);
            }
        }
        format!("?{}", query.finish())
    }
}

// ── Shops ───────────────────────────────────────────────────────────

/// Shop as returned by the list and detail endpoints.
///
/// The detail endpoint may nest owner data under `owner` and counters
/// under `stats`; the list endpoint returns the flat form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopRecord {
    pub id: String,
    pub name: Option<String>,
    pub owner_name: Option<String>,
    pub owner_phone: Option<String>,
    pub owner_email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tier: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub license_expiry: Option<String>,
    pub owner: Option<ShopOwner>,
    pub stats: Option<ShopStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopOwner {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopStats {
    pub product_count: Option<u64>,
    pub user_count: Option<u64>,
    pub sale_count: Option<u64>,
    pub total_revenue: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopPage {
    #[serde(default)]
    pub shops: Vec<ShopRecord>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShopStatusUpdate<'a> {
    pub status: &'a str,
}

// ── Users ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserShopRef {
    pub id: Option<String>,
    pub name: Option<String>,
    pub owner_name: Option<String>,
    pub tier: Option<String>,
}

/// Staff member as returned by the users list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub shop_name: Option<String>,
    pub shop: Option<UserShopRef>,
    pub role: Option<String>,
    pub last_active: Option<String>,
    pub last_login_at: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Per-user activity report from `GET /api/admin/users/:id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDetail {
    pub user: UserRecord,
    pub stats: UserSalesStats,
    pub daily_sales: Vec<DailySales>,
    pub recent_sales: Vec<RecentSale>,
    pub insights: Vec<Insight>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSalesStats {
    pub total_revenue: f64,
    pub transaction_count: u64,
    pub average_transaction: f64,
    pub largest_transaction: f64,
    pub void_count: u64,
    pub void_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailySales {
    pub date: String,
    pub transactions: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecentSale {
    pub id: String,
    pub total_amount: f64,
    pub status: String,
    pub payment_method: String,
    pub item_count: u64,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

// ── Subscriptions ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    pub id: String,
    pub shop_id: Option<String>,
    pub shop_name: Option<String>,
    pub owner_name: Option<String>,
    pub tier: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub expiry_date: Option<String>,
    pub auto_renew: Option<bool>,
}

/// Body of `PUT /api/admin/subscriptions/:shopId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionUpdate {
    pub tier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

// ── Dashboard ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_shops: u64,
    pub active_shops: u64,
    pub total_revenue: f64,
    pub new_shops_today: u64,
}

/// Window accepted by the analytics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyticsPeriod {
    Day,
    #[default]
    Week,
    Month,
}

impl AnalyticsPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl std::fmt::Display for AnalyticsPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_suffix_skips_empty_values() {
        let mut params = ListParams::new(2, 10);
        params.search = Some(String::new());
        params.filters.push(("status".into(), "active".into()));
        params.filters.push(("tier".into(), String::new()));
        assert_eq!(params.query_suffix(), "?page=2&limit=10&status=active");
    }

    #[test]
    fn query_suffix_encodes_search() {
        let mut params = ListParams::new(1, 15);
        params.search = Some("Fresh Mart".into());
        assert_eq!(params.query_suffix(), "?page=1&limit=15&search=Fresh+Mart");
    }
}

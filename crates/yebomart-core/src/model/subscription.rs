// ── Subscription domain type ──

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::common::{SubscriptionStatus, Tier};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub shop_id: String,
    pub shop_name: String,
    pub owner_name: String,
    pub tier: Tier,
    pub status: SubscriptionStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub auto_renew: bool,
}

// ── Wire-to-domain conversions ──
//
// Maps the backend's camelCase records onto domain types, applying the
// defaults the console relies on: missing tier is FREE, missing status is
// active, owner phone falls back to the shop's phone.

use chrono::{DateTime, NaiveDate, Utc};
use yebomart_api::models::{ShopRecord, SubscriptionRecord, UserDetail, UserRecord};

use crate::model::{
    Shop, ShopStats, ShopStatus, StaffRole, StaffUser, Subscription, SubscriptionStatus, Tier,
    UserActivity,
};

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
pub(crate) fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

impl From<ShopRecord> for Shop {
    fn from(r: ShopRecord) -> Self {
        let owner = r.owner.unwrap_or_default();
        Self {
            id: r.id,
            name: r.name.unwrap_or_default(),
            owner_name: r.owner_name.or(owner.name).unwrap_or_default(),
            phone: r
                .owner_phone
                .or(owner.phone)
                .or(r.phone)
                .unwrap_or_default(),
            owner_email: r.owner_email.or(owner.email),
            address: r.address,
            tier: Tier::from_wire(r.tier.as_deref()),
            status: ShopStatus::from_wire(r.status.as_deref()),
            created_at: parse_timestamp(r.created_at.as_deref()),
            license_expiry: parse_timestamp(r.license_expiry.as_deref()),
            stats: r.stats.map(|s| ShopStats {
                product_count: s.product_count,
                user_count: s.user_count,
                sale_count: s.sale_count,
                total_revenue: s.total_revenue,
            }),
        }
    }
}

impl From<UserRecord> for StaffUser {
    fn from(r: UserRecord) -> Self {
        let shop_name = r
            .shop_name
            .or_else(|| r.shop.and_then(|s| s.name))
            .unwrap_or_default();
        Self {
            id: r.id,
            name: r.name.unwrap_or_default(),
            email: r.email.unwrap_or_default(),
            phone: r.phone.unwrap_or_default(),
            shop_name,
            role: StaffRole::from_wire(r.role.as_deref()),
            last_active: r.last_active.or(r.last_login_at).unwrap_or_default(),
            created_at: parse_timestamp(r.created_at.as_deref()),
        }
    }
}

impl From<SubscriptionRecord> for Subscription {
    fn from(r: SubscriptionRecord) -> Self {
        Self {
            shop_id: r.shop_id.unwrap_or_else(|| r.id.clone()),
            id: r.id,
            shop_name: r.shop_name.unwrap_or_default(),
            owner_name: r.owner_name.unwrap_or_default(),
            tier: Tier::from_wire(r.tier.as_deref()),
            status: SubscriptionStatus::from_wire(r.status.as_deref()),
            start_date: parse_timestamp(r.start_date.as_deref()),
            expiry_date: parse_timestamp(r.expiry_date.as_deref()),
            auto_renew: r.auto_renew.unwrap_or(false),
        }
    }
}

pub(crate) fn user_activity(detail: UserDetail, days: u32) -> UserActivity {
    UserActivity {
        user: detail.user.into(),
        days,
        stats: detail.stats,
        daily_sales: detail.daily_sales,
        recent_sales: detail.recent_sales,
        insights: detail.insights,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use yebomart_api::models::ShopOwner;

    #[test]
    fn shop_defaults_applied() {
        let shop: Shop = ShopRecord {
            id: "s1".into(),
            name: Some("Fresh Mart 1".into()),
            phone: Some("+26876000001".into()),
            ..ShopRecord::default()
        }
        .into();
        assert_eq!(shop.tier, Tier::Free);
        assert_eq!(shop.status, ShopStatus::Active);
        assert_eq!(shop.phone, "+26876000001");
    }

    #[test]
    fn owner_phone_preferred_and_nested_owner_read() {
        let shop: Shop = ShopRecord {
            id: "s2".into(),
            owner_phone: Some("+26876111111".into()),
            phone: Some("+26876000002".into()),
            owner: Some(ShopOwner {
                name: Some("Grace Mamba".into()),
                phone: None,
                email: Some("grace@example.com".into()),
            }),
            tier: Some("business".into()),
            ..ShopRecord::default()
        }
        .into();
        assert_eq!(shop.phone, "+26876111111");
        assert_eq!(shop.owner_name, "Grace Mamba");
        assert_eq!(shop.owner_email.as_deref(), Some("grace@example.com"));
        assert_eq!(shop.tier, Tier::Business);
    }

    #[test]
    fn timestamps_accept_dates_and_rfc3339() {
        assert!(parse_timestamp(Some("2025-03-01T10:00:00Z")).is_some());
        assert_eq!(
            parse_timestamp(Some("2025-03-01")).unwrap().to_rfc3339(),
            "2025-03-01T00:00:00+00:00"
        );
        assert!(parse_timestamp(Some("yesterday")).is_none());
        assert!(parse_timestamp(None).is_none());
    }
}

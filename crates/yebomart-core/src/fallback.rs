// ── Demo datasets ──
//
// Deterministic collections served when the console runs in demo mode, or
// when the backend yields nothing in auto mode. Every value is derived
// from the row index, and dates hang off a fixed epoch so two runs always
// produce identical data.

use chrono::{DateTime, TimeDelta, Utc};

use crate::model::{
    DashboardStats, Shop, ShopStatus, StaffRole, StaffUser, Subscription, SubscriptionStatus,
    Tier, UserActivity,
};

pub const SHOP_COUNT: usize = 50;
pub const USER_COUNT: usize = 80;
pub const SUBSCRIPTION_COUNT: usize = 45;

const SHOP_NAMES: [&str; 8] = [
    "Fresh Mart",
    "Quick Shop",
    "Super Save",
    "Daily Needs",
    "City Store",
    "Corner Shop",
    "Mini Mart",
    "Value Plus",
];

const OWNER_NAMES: [&str; 5] = [
    "John Dlamini",
    "Mary Simelane",
    "Peter Nkosi",
    "Grace Mamba",
    "David Zwane",
];

const STAFF_NAMES: [&str; 8] = [
    "John Dlamini",
    "Mary Simelane",
    "Peter Nkosi",
    "Grace Mamba",
    "David Zwane",
    "Sarah Khumalo",
    "Michael Maseko",
    "Linda Matsebula",
];

const PAID_TIERS: [Tier; 5] = [
    Tier::Lite,
    Tier::Starter,
    Tier::Business,
    Tier::Pro,
    Tier::Enterprise,
];

const LAST_ACTIVE: [&str; 5] = [
    "2 minutes ago",
    "1 hour ago",
    "3 hours ago",
    "Yesterday",
    "3 days ago",
];

/// 2025-01-01T00:00:00Z
const EPOCH_DAYS: i64 = 20_089;

/// Anchor for every generated date.
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(EPOCH_DAYS)
}

fn pick<T: Copy>(table: &[T], i: usize) -> T {
    table[i % table.len()]
}

fn days(n: usize) -> TimeDelta {
    TimeDelta::days(i64::try_from(n).unwrap_or_default())
}

fn phone(i: usize) -> String {
    format!("+26876{:06}", 100_000 + i)
}

// ── Shops ───────────────────────────────────────────────────────────

pub fn shops() -> Vec<Shop> {
    (0..SHOP_COUNT).map(shop_at).collect()
}

fn shop_at(i: usize) -> Shop {
    let status = if i % 7 == 0 {
        ShopStatus::Inactive
    } else if i % 11 == 0 {
        ShopStatus::Suspended
    } else {
        ShopStatus::Active
    };
    Shop {
        id: format!("shop-{}", i + 1),
        name: format!("{} {}", pick(&SHOP_NAMES, i), i + 1),
        owner_name: pick(&OWNER_NAMES, i).to_owned(),
        phone: phone(i),
        owner_email: None,
        address: None,
        tier: pick(&PAID_TIERS, i),
        status,
        created_at: Some(epoch() - days((i * 37) % 365)),
        license_expiry: Some(epoch() + days(30 + i * 7)),
        stats: None,
    }
}

pub fn shop(id: &str) -> Option<Shop> {
    shops().into_iter().find(|s| s.id == id)
}

// ── Staff users ─────────────────────────────────────────────────────

pub fn users() -> Vec<StaffUser> {
    (0..USER_COUNT).map(user_at).collect()
}

fn user_at(i: usize) -> StaffUser {
    let role = if i % 8 == 0 {
        StaffRole::Owner
    } else if i % 3 == 0 {
        StaffRole::Manager
    } else {
        StaffRole::Cashier
    };
    StaffUser {
        id: format!("user-{}", i + 1),
        name: pick(&STAFF_NAMES, i).to_owned(),
        email: format!("user{}@example.com", i + 1),
        phone: phone(i),
        shop_name: format!("{} {}", pick(&SHOP_NAMES[..5], i), i / 5 + 1),
        role,
        last_active: pick(&LAST_ACTIVE, i).to_owned(),
        created_at: Some(epoch() - days((i * 53) % 365)),
    }
}

/// Activity report with empty sales history for a demo user.
pub fn user_activity(id: &str, window_days: u32) -> Option<UserActivity> {
    let user = users().into_iter().find(|u| u.id == id)?;
    Some(UserActivity {
        user,
        days: window_days,
        stats: Default::default(),
        daily_sales: Vec::new(),
        recent_sales: Vec::new(),
        insights: Vec::new(),
    })
}

// ── Subscriptions ───────────────────────────────────────────────────

pub fn subscriptions() -> Vec<Subscription> {
    (0..SUBSCRIPTION_COUNT).map(subscription_at).collect()
}

fn subscription_at(i: usize) -> Subscription {
    let status = if i % 7 == 0 {
        SubscriptionStatus::Expired
    } else if i % 11 == 0 {
        SubscriptionStatus::Cancelled
    } else {
        SubscriptionStatus::Active
    };
    Subscription {
        id: format!("sub-{}", i + 1),
        shop_id: format!("shop-{}", i + 1),
        shop_name: format!("{} {}", pick(&SHOP_NAMES[..5], i), i / 5 + 1),
        owner_name: pick(&OWNER_NAMES, i).to_owned(),
        tier: pick(&PAID_TIERS, i),
        status,
        start_date: Some(epoch() - days(365 - i * 7)),
        expiry_date: Some(epoch() + days(30 + i * 7)),
        auto_renew: i % 3 != 0,
    }
}

// ── Dashboard ───────────────────────────────────────────────────────

pub fn dashboard() -> DashboardStats {
    DashboardStats {
        total_shops: 256,
        active_shops: 198,
        total_revenue: 45_680.0,
        new_shops_today: 12,
    }
}

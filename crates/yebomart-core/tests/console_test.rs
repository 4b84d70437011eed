#![allow(clippy::unwrap_used)]
// Integration tests for `AdminConsole` controllers using wiremock.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use yebomart_api::{AdminClient, SessionStore};
use yebomart_core::{
    AdminConsole, BulkAction, ClientConfig, CoreError, DataSource, QueryState, ReconcileStrategy,
    ShopAction, ShopStatus, Tier, ViewSource,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(data_source: DataSource) -> (MockServer, AdminConsole) {
    setup_with(data_source, ReconcileStrategy::Optimistic).await
}

async fn setup_with(
    data_source: DataSource,
    reconcile: ReconcileStrategy,
) -> (MockServer, AdminConsole) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = AdminClient::with_client(
        reqwest::Client::new(),
        base_url.clone(),
        Arc::new(SessionStore::in_memory()),
    );
    let config = ClientConfig::new(base_url)
        .with_data_source(data_source)
        .with_reconcile(reconcile);
    (server, AdminConsole::with_client(config, client))
}

fn envelope(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

async fn mount_shop(server: &MockServer, id: &str, status: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/api/admin/shops/{id}")))
        .respond_with(envelope(json!({
            "id": id,
            "name": "Fresh Mart 1",
            "ownerName": "John Dlamini",
            "ownerPhone": "+26876100000",
            "tier": "Starter",
            "status": status
        })))
        .mount(server)
        .await;
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_establishes_session() {
    let (server, console) = setup(DataSource::Live).await;

    Mock::given(method("POST"))
        .and(path("/api/admin/login"))
        .respond_with(envelope(json!({
            "accessToken": "abc",
            "admin": { "id": "1", "email": "a@b.com", "name": "A", "role": "owner" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = console
        .auth()
        .login("a@b.com", &SecretString::from("secret".to_owned()))
        .await
        .unwrap();

    assert_eq!(user.name, "A");
    assert!(console.auth().is_authenticated());
    let token = console.client().session().token().unwrap();
    assert_eq!(token.expose_secret(), "abc");

    console.auth().logout().unwrap();
    assert!(!console.auth().is_authenticated());
    assert!(console.client().session().token().is_none());
}

#[tokio::test]
async fn invalid_credentials_never_reach_the_server() {
    let (server, console) = setup(DataSource::Live).await;

    Mock::given(method("POST"))
        .and(path("/api/admin/login"))
        .respond_with(envelope(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let err = console
        .auth()
        .login("not-an-email", &SecretString::from("pw".to_owned()))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::ValidationFailed { .. }));
}

// ── Lists ───────────────────────────────────────────────────────────

#[tokio::test]
async fn live_shop_page_is_server_paginated() {
    let (server, console) = setup(DataSource::Live).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/shops"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .respond_with(envelope(json!({
            "shops": [
                { "id": "s11", "name": "Mini Mart 11", "ownerName": "Peter", "phone": "+26876000011" }
            ],
            "total": 11
        })))
        .expect(1)
        .mount(&server)
        .await;

    let view = console.shops().set_page(2).await.unwrap().unwrap();
    assert_eq!(view.source, ViewSource::Live);
    assert_eq!(view.total, 11);
    assert_eq!(view.total_pages(), 2);
    assert_eq!(view.items[0].phone, "+26876000011");
    assert_eq!(view.items[0].tier, Tier::Free);
    assert_eq!(view.items[0].status, ShopStatus::Active);
}

#[tokio::test]
async fn auto_mode_falls_back_to_demo_rows() {
    let (server, console) = setup(DataSource::Auto).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/shops"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let view = console.shops().set_search("Fresh").await.unwrap().unwrap();
    assert_eq!(view.source, ViewSource::Fallback);
    assert!(view.items.iter().any(|s| s.name == "Fresh Mart 1"));
    assert!(view.items.iter().all(|s| s.name.starts_with("Fresh Mart")));
    assert_eq!(console.shops().current().unwrap().generation, view.generation);
}

#[tokio::test]
async fn live_mode_surfaces_errors() {
    let (server, console) = setup(DataSource::Live).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({ "message": "Maintenance" })),
        )
        .mount(&server)
        .await;

    let err = console.users().refresh().await.unwrap_err();
    assert_eq!(err.to_string(), "Maintenance");
    assert!(console.users().current().is_none());
}

#[tokio::test]
async fn live_subscriptions_are_paged_locally() {
    let (server, console) = setup(DataSource::Live).await;

    let rows: Vec<_> = (1..=12)
        .map(|i| {
            json!({
                "id": format!("sub-{i}"),
                "shopId": format!("shop-{i}"),
                "shopName": format!("Shop {i}"),
                "ownerName": "Owner",
                "tier": if i % 2 == 0 { "Pro" } else { "Lite" },
                "status": "active"
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/admin/subscriptions"))
        .respond_with(envelope(json!(rows)))
        .mount(&server)
        .await;

    let view = console.subscriptions().set_page(2).await.unwrap().unwrap();
    assert_eq!(view.total, 12);
    assert_eq!(view.items.len(), 2);

    let view = console
        .subscriptions()
        .set_filter("tier", "pro")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.page, 1);
    assert_eq!(view.total, 6);
}

#[tokio::test]
async fn stale_refresh_is_discarded() {
    let (server, console) = setup(DataSource::Live).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/shops"))
        .and(query_param("search", "slow"))
        .respond_with(
            envelope(json!({ "shops": [{ "id": "slow" }], "total": 1 }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/shops"))
        .and(query_param("search", "fast"))
        .respond_with(envelope(json!({ "shops": [{ "id": "fast" }], "total": 1 })))
        .mount(&server)
        .await;

    let shops = console.shops();
    let (first, second) = tokio::join!(shops.set_search("slow"), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        shops.set_search("fast").await
    });

    assert!(first.unwrap().is_none());
    let second = second.unwrap().unwrap();
    assert_eq!(second.items[0].id, "fast");

    let current = shops.current().unwrap();
    assert_eq!(current.items[0].id, "fast");
    assert_eq!(current.query, QueryState::new().with_search("fast"));
}

// ── Shop actions ────────────────────────────────────────────────────

#[tokio::test]
async fn rejected_delete_keeps_state_and_dialog() {
    let (server, console) = setup(DataSource::Live).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/shops"))
        .respond_with(envelope(json!({
            "shops": [{ "id": "s1", "name": "Fresh Mart 1" }],
            "total": 1
        })))
        .mount(&server)
        .await;
    mount_shop(&server, "s1", "active").await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/shops/s1"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "Shop has open sales" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let before = console.shops().refresh().await.unwrap().unwrap();

    let mut detail = console.shop_detail("s1");
    detail.load().await.unwrap();
    detail.open(ShopAction::Delete);
    let err = detail.delete().await.unwrap_err();

    assert_eq!(err.status(), Some(409));
    assert_eq!(err.to_string(), "Shop has open sales");
    let dialog = detail.dialog(ShopAction::Delete);
    assert!(dialog.is_open());
    assert!(!dialog.is_loading());
    assert!(detail.shop().is_some());

    let after = console.shops().current().unwrap();
    assert_eq!(after.items, before.items);
}

#[tokio::test]
async fn suspend_sends_target_status_and_flips_label() {
    let (server, console) = setup(DataSource::Live).await;

    mount_shop(&server, "s1", "active").await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/shops/s1/status"))
        .and(body_json(json!({ "status": "suspended" })))
        .respond_with(envelope(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut detail = console.shop_detail("s1");
    detail.load().await.unwrap();
    assert_eq!(detail.suspend_label(), "Suspend");

    detail.open(ShopAction::ToggleSuspension);
    let status = detail.toggle_suspension().await.unwrap();

    assert_eq!(status, ShopStatus::Suspended);
    assert_eq!(detail.shop().unwrap().status, ShopStatus::Suspended);
    assert_eq!(detail.suspend_label(), "Reactivate");
    assert!(!detail.dialog(ShopAction::ToggleSuspension).is_open());
}

#[tokio::test]
async fn suspension_is_patched_into_shop_list() {
    let (server, console) = setup(DataSource::Live).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/shops"))
        .respond_with(envelope(json!({
            "shops": [
                { "id": "s1", "name": "Fresh Mart 1", "status": "active" },
                { "id": "s2", "name": "Fresh Mart 2", "status": "active" }
            ],
            "total": 2
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_shop(&server, "s1", "active").await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/shops/s1/status"))
        .respond_with(envelope(json!({})))
        .mount(&server)
        .await;

    console.shops().refresh().await.unwrap().unwrap();
    let mut views = console.shops().subscribe();

    let mut detail = console.shop_detail("s1");
    detail.load().await.unwrap();
    detail.open(ShopAction::ToggleSuspension);
    detail.toggle_suspension().await.unwrap();

    assert!(views.has_changed().unwrap());
    let view = views.borrow_and_update().clone().unwrap();
    assert_eq!(view.items[0].status, ShopStatus::Suspended);
    assert_eq!(view.items[1].status, ShopStatus::Active);
}

#[tokio::test]
async fn delete_success_navigates_back() {
    let (server, console) = setup(DataSource::Live).await;

    mount_shop(&server, "s1", "active").await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/shops/s1"))
        .respond_with(envelope(json!({})))
        .mount(&server)
        .await;

    let mut detail = console.shop_detail("s1");
    detail.load().await.unwrap();
    let nav = detail.delete().await.unwrap();
    assert_eq!(nav, yebomart_core::Navigation::Shops);
    assert!(detail.shop().is_none());
}

#[tokio::test]
async fn refetch_strategy_rereads_after_tier_change() {
    let (server, console) = setup_with(DataSource::Live, ReconcileStrategy::Refetch).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/shops/s1"))
        .respond_with(envelope(json!({ "id": "s1", "name": "Fresh Mart 1", "tier": "Business" })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/subscriptions/s1"))
        .and(body_json(json!({ "tier": "Business" })))
        .respond_with(envelope(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut detail = console.shop_detail("s1");
    detail.load().await.unwrap();
    let loaded_version = detail.version();

    detail.select_tier("business").unwrap();
    detail.change_tier().await.unwrap();

    assert_eq!(detail.shop().unwrap().tier, Tier::Business);
    assert!(detail.version() > loaded_version);
}

// ── Bulk ────────────────────────────────────────────────────────────

#[tokio::test]
async fn bulk_failure_keeps_failed_rows_selected() {
    let (server, console) = setup(DataSource::Auto).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/subscriptions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/subscriptions/shop-2"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "Billing offline" })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/subscriptions/shop-3"))
        .and(body_json(json!({ "tier": "Enterprise" })))
        .respond_with(envelope(json!({})))
        .mount(&server)
        .await;

    let view = console.subscriptions().refresh().await.unwrap().unwrap();
    let mut bulk = console.subscription_bulk();
    bulk.selection_mut().toggle(&view.items[1]);
    bulk.selection_mut().toggle(&view.items[2]);

    bulk.open(BulkAction::ChangeTier(Tier::Enterprise));
    let outcome = bulk.confirm().await.unwrap();

    assert!(!outcome.is_complete());
    assert_eq!(outcome.updated.len(), 1);
    assert_eq!(outcome.updated[0].tier, Tier::Enterprise);
    assert_eq!(outcome.failed[0].id, "sub-2");
    assert_eq!(outcome.failed[0].message, "Billing offline");

    assert_eq!(bulk.selection().ids().collect::<Vec<_>>(), vec!["sub-2"]);
    assert!(bulk.dialog().is_open());
    assert!(!bulk.dialog().is_loading());
}

#[tokio::test]
async fn bulk_success_clears_selection() {
    let (_server, console) = setup(DataSource::Demo).await;

    let view = console.subscriptions().refresh().await.unwrap().unwrap();
    let mut bulk = console.subscription_bulk();
    bulk.selection_mut().toggle_all(&view.items);
    assert_eq!(bulk.selection().len(), 10);

    bulk.open(BulkAction::Renew);
    let outcome = bulk.confirm().await.unwrap();

    assert!(outcome.is_complete());
    assert_eq!(outcome.updated.len(), 10);
    assert!(bulk.selection().is_empty());
    assert!(!bulk.dialog().is_open());
}

#[tokio::test]
async fn collect_all_walks_every_filtered_page() {
    let (_server, console) = setup(DataSource::Demo).await;

    let subs = console.subscriptions();
    subs.set_filter("status", "active").await.unwrap();
    let rows = subs.collect_all().await.unwrap();

    assert_eq!(rows.len(), 34);
    assert!(rows.iter().all(|s| s.status == yebomart_core::SubscriptionStatus::Active));
    assert_eq!(yebomart_core::tier_breakdown(&rows).iter().map(|(_, n)| n).sum::<usize>(), 34);
}

// ── Dashboard ───────────────────────────────────────────────────────

#[tokio::test]
async fn dashboard_falls_back_to_demo_counters() {
    let (server, console) = setup(DataSource::Auto).await;

    Mock::given(method("GET"))
        .and(path("/api/admin/dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let view = console.dashboard().load().await.unwrap();
    assert_eq!(view.source, ViewSource::Fallback);
    assert_eq!(view.stats.total_shops, 256);
    assert_eq!(view.stats.new_shops_today, 12);
}

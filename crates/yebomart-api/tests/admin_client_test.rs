#![allow(clippy::unwrap_used)]
// Integration tests for `AdminClient` using wiremock.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use yebomart_api::{
    AdminClient, Error, ListParams, Method, RequestOptions, SessionStore, SubscriptionUpdate,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, AdminClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = AdminClient::with_client(
        reqwest::Client::new(),
        base_url,
        Arc::new(SessionStore::in_memory()),
    );
    (server, client)
}

fn signed_in(client: &AdminClient, token: &str) {
    client
        .session()
        .set_token(SecretString::from(token.to_owned()))
        .unwrap();
}

// ── Transport and envelope ──────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_attached() {
    let (server, client) = setup().await;
    signed_in(&client, "tok-abc");

    Mock::given(method("GET"))
        .and(path("/api/admin/dashboard"))
        .and(header("authorization", "Bearer tok-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "totalShops": 3, "activeShops": 2, "totalRevenue": 10.5, "newShopsToday": 1 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stats = client.dashboard().await.unwrap().unwrap();
    assert_eq!(stats.total_shops, 3);
    assert_eq!(stats.new_shops_today, 1);
}

#[tokio::test]
async fn test_caller_header_overrides_default() {
    let (server, client) = setup().await;
    signed_in(&client, "stored");

    Mock::given(method("GET"))
        .and(path("/health"))
        .and(header("authorization", "Bearer override"))
        .and(header("x-request-source", "cli"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": "ok" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let options = RequestOptions::new()
        .header(AUTHORIZATION, HeaderValue::from_static("Bearer override"))
        .header(
            HeaderName::from_static("x-request-source"),
            HeaderValue::from_static("cli"),
        );
    let data: Option<String> = client
        .request(Method::GET, "/health", options)
        .await
        .unwrap();
    assert_eq!(data.as_deref(), Some("ok"));
}

#[tokio::test]
async fn test_server_message_surfaces_on_failure() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/admin/shops/s1"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "Shop has sales" })),
        )
        .mount(&server)
        .await;

    let err = client.delete_shop("s1").await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.to_string(), "Shop has sales");
}

#[tokio::test]
async fn test_generic_message_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/dashboard"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.dashboard().await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 500, .. }));
    assert_eq!(err.to_string(), "Request failed");
}

#[tokio::test]
async fn test_network_error_when_unreachable() {
    let client = AdminClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:1").unwrap(),
        Arc::new(SessionStore::in_memory()),
    );

    let err = client.health().await.unwrap_err();
    assert!(err.is_network(), "expected network error, got {err:?}");
    assert_eq!(err.to_string(), "Network error");
}

#[tokio::test]
async fn test_success_without_data_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/subscriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    assert!(client.list_subscriptions().await.unwrap().is_none());
}

#[tokio::test]
async fn test_typed_page_without_data_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/shops"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client.list_shops(&ListParams::new(1, 10)).await.unwrap();
    assert!(page.is_none());
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_remaps_payload() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/login"))
        .and(body_json(json!({ "email": "ops@yebomart.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "accessToken": "jwt-1",
                "admin": { "id": "a1", "email": "ops@yebomart.com", "name": "Ops", "role": "SUPER_ADMIN" }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let secret = SecretString::from("pw".to_owned());
    let session = client.login("ops@yebomart.com", &secret).await.unwrap();
    assert_eq!(session.token.expose_secret(), "jwt-1");
    assert_eq!(session.user.name, "Ops");
}

#[tokio::test]
async fn test_login_accepts_numeric_admin_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "accessToken": "jwt-2",
                "admin": { "id": 42, "email": "ops@yebomart.com" }
            }
        })))
        .mount(&server)
        .await;

    let secret = SecretString::from("pw".to_owned());
    let session = client.login("ops@yebomart.com", &secret).await.unwrap();
    assert_eq!(session.user.id, "42");
    assert_eq!(session.user.role, "");
}

#[tokio::test]
async fn test_login_without_token_is_invalid_response() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "admin": { "id": "a1", "email": "ops@yebomart.com" } }
        })))
        .mount(&server)
        .await;

    let secret = SecretString::from("pw".to_owned());
    let err = client.login("ops@yebomart.com", &secret).await.unwrap_err();
    assert!(matches!(err, Error::InvalidResponse));
    assert_eq!(err.to_string(), "Invalid response from server");
}

#[tokio::test]
async fn test_login_rejected_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let secret = SecretString::from("nope".to_owned());
    let err = client.login("ops@yebomart.com", &secret).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Invalid credentials");
}

// ── Entities ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_shops_sends_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/shops"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .and(query_param("search", "Fresh"))
        .and(query_param("status", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "shops": [{ "id": "s1", "name": "Fresh Mart 1", "ownerName": "John", "ownerPhone": "+26876100000" }],
                "total": 11
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut params = ListParams::new(2, 10);
    params.search = Some("Fresh".into());
    params.filters.push(("status".into(), "active".into()));

    let page = client.list_shops(&params).await.unwrap().unwrap();
    assert_eq!(page.total, Some(11));
    assert_eq!(page.shops[0].owner_phone.as_deref(), Some("+26876100000"));
}

#[tokio::test]
async fn test_get_shop_accepts_wrapped_and_flat() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/shops/wrapped"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "shop": { "id": "wrapped", "name": "Corner Shop 5", "owner": { "name": "Grace" } } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/shops/flat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "id": "flat", "name": "Mini Mart 7", "tier": "Pro" }
        })))
        .mount(&server)
        .await;

    let wrapped = client.get_shop("wrapped").await.unwrap().unwrap();
    assert_eq!(wrapped.owner.unwrap().name.as_deref(), Some("Grace"));

    let flat = client.get_shop("flat").await.unwrap().unwrap();
    assert_eq!(flat.tier.as_deref(), Some("Pro"));
}

#[tokio::test]
async fn test_update_shop_status_body() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/admin/shops/s1/status"))
        .and(body_json(json!({ "status": "suspended" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    client.update_shop_status("s1", "suspended").await.unwrap();
}

#[tokio::test]
async fn test_update_subscription_omits_missing_expiry() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/admin/subscriptions/shop-3"))
        .and(body_json(json!({ "tier": "Business" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let update = SubscriptionUpdate {
        tier: "Business".into(),
        expires_at: None,
    };
    client.update_subscription("shop-3", &update).await.unwrap();
}

#[tokio::test]
async fn test_user_detail_passes_days() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/users/u9"))
        .and(query_param("days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "user": { "id": "u9", "name": "Linda" },
                "stats": { "totalRevenue": 1200.0, "transactionCount": 4 },
                "insights": [{ "type": "positive", "text": "Busy week" }]
            }
        })))
        .mount(&server)
        .await;

    let detail = client.get_user_detail("u9", 7).await.unwrap().unwrap();
    assert_eq!(detail.stats.transaction_count, 4);
    assert_eq!(detail.insights[0].kind, "positive");
    assert!(detail.recent_sales.is_empty());
}

// ── Admin console facade ──
//
// Owns the API client and one controller per screen. Built from a
// `ClientConfig` and a durable session backend; the CLI talks only to this.

use std::sync::Arc;

use tracing::{debug, warn};
use yebomart_api::{AdminClient, KeyValueStore, SessionStore};

use crate::action::{ShopDetailController, SubscriptionBulkController};
use crate::auth::AuthController;
use crate::config::{ClientConfig, DataSource};
use crate::convert::user_activity;
use crate::dashboard::DashboardController;
use crate::error::CoreError;
use crate::fallback;
use crate::list::ListController;
use crate::model::{Shop, StaffUser, Subscription, UserActivity};

/// Trailing window for user activity reports when none is given.
pub const DEFAULT_ACTIVITY_DAYS: u32 = 30;

pub struct AdminConsole {
    config: ClientConfig,
    client: AdminClient,
    auth: AuthController,
    dashboard: DashboardController,
    shops: ListController<Shop>,
    users: ListController<StaffUser>,
    subscriptions: ListController<Subscription>,
}

impl AdminConsole {
    /// Build the HTTP client from `config` and attach a session backed by
    /// `storage`.
    pub fn new(config: ClientConfig, storage: Arc<dyn KeyValueStore>) -> Result<Self, CoreError> {
        let session = Arc::new(SessionStore::new(storage));
        let client = AdminClient::new(config.base_url.clone(), session, &config.transport())?;
        Ok(Self::with_client(config, client))
    }

    /// Use an already-built client (tests, custom transports).
    pub fn with_client(config: ClientConfig, client: AdminClient) -> Self {
        let source = config.data_source;
        debug!(url = %config.base_url, data_source = %source, "admin console ready");
        Self {
            auth: AuthController::new(client.clone()),
            dashboard: DashboardController::new(client.clone(), source),
            shops: ListController::new(client.clone(), source),
            users: ListController::new(client.clone(), source),
            subscriptions: ListController::new(client.clone(), source),
            client,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn client(&self) -> &AdminClient {
        &self.client
    }

    pub fn auth(&self) -> &AuthController {
        &self.auth
    }

    pub fn dashboard(&self) -> &DashboardController {
        &self.dashboard
    }

    pub fn shops(&self) -> &ListController<Shop> {
        &self.shops
    }

    pub fn users(&self) -> &ListController<StaffUser> {
        &self.users
    }

    pub fn subscriptions(&self) -> &ListController<Subscription> {
        &self.subscriptions
    }

    /// Detail controller for one shop. Call `load()` before acting on it.
    /// Successful changes are patched into the shops list view.
    pub fn shop_detail(&self, id: impl Into<String>) -> ShopDetailController<'_> {
        ShopDetailController::new(
            self.client.clone(),
            id,
            self.config.data_source,
            self.config.reconcile,
        )
        .with_list(&self.shops)
    }

    pub fn subscription_bulk(&self) -> SubscriptionBulkController {
        SubscriptionBulkController::new(self.client.clone(), self.config.data_source)
    }

    /// Sales activity for one staff member over the last `days`.
    pub async fn user_activity(&self, id: &str, days: u32) -> Result<UserActivity, CoreError> {
        let not_found = || CoreError::NotFound {
            entity: "User".into(),
            identifier: id.to_owned(),
        };

        match self.config.data_source {
            DataSource::Demo => fallback::user_activity(id, days).ok_or_else(not_found),
            DataSource::Live => self
                .client
                .get_user_detail(id, days)
                .await?
                .map(|detail| user_activity(detail, days))
                .ok_or_else(not_found),
            DataSource::Auto => match self.client.get_user_detail(id, days).await {
                Ok(Some(detail)) => Ok(user_activity(detail, days)),
                Ok(None) => fallback::user_activity(id, days).ok_or_else(not_found),
                Err(e) => {
                    warn!(user = id, error = %e, "user detail unavailable; trying demo rows");
                    fallback::user_activity(id, days).ok_or_else(not_found)
                }
            },
        }
    }
}

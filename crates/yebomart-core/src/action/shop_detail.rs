// ── Shop detail actions ──
//
// Tier change, suspend/reactivate and delete for the shop on display.
// Successful mutations are reconciled per `ReconcileStrategy`; every
// local change bumps `version` so observers can tell stale copies apart,
// and is copied into the shop list view when one is attached.

use serde::Serialize;
use tracing::{debug, warn};
use yebomart_api::{AdminClient, SubscriptionUpdate};

use super::dialog::ConfirmDialog;
use crate::config::{DataSource, ReconcileStrategy};
use crate::error::CoreError;
use crate::fallback;
use crate::list::ListController;
use crate::model::{Shop, ShopStatus, Tier};

/// Where the caller should go after an action completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Navigation {
    /// Back to the shop list.
    Shops,
}

/// The confirmable actions on a shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShopAction {
    ChangeTier,
    ToggleSuspension,
    Delete,
}

pub struct ShopDetailController<'a> {
    client: AdminClient,
    data_source: DataSource,
    reconcile: ReconcileStrategy,
    shop_id: String,
    shop: Option<Shop>,
    version: u64,
    selected_tier: Tier,
    tier_dialog: ConfirmDialog,
    suspend_dialog: ConfirmDialog,
    delete_dialog: ConfirmDialog,
    shops: Option<&'a ListController<Shop>>,
}

impl<'a> ShopDetailController<'a> {
    pub fn new(
        client: AdminClient,
        shop_id: impl Into<String>,
        data_source: DataSource,
        reconcile: ReconcileStrategy,
    ) -> Self {
        Self {
            client,
            data_source,
            reconcile,
            shop_id: shop_id.into(),
            shop: None,
            version: 0,
            selected_tier: Tier::default(),
            tier_dialog: ConfirmDialog::default(),
            suspend_dialog: ConfirmDialog::default(),
            delete_dialog: ConfirmDialog::default(),
            shops: None,
        }
    }

    /// Keep the row for this shop in `shops` in step with local changes.
    pub fn with_list(mut self, shops: &'a ListController<Shop>) -> Self {
        self.shops = Some(shops);
        self
    }

    pub fn shop_id(&self) -> &str {
        &self.shop_id
    }

    pub fn shop(&self) -> Option<&Shop> {
        self.shop.as_ref()
    }

    /// Incremented on every load and local merge.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selected_tier(&self) -> Tier {
        self.selected_tier
    }

    // ── Loading ──────────────────────────────────────────────────────

    pub async fn load(&mut self) -> Result<&Shop, CoreError> {
        let shop = self.fetch().await?;
        self.selected_tier = shop.tier;
        self.version += 1;
        Ok(self.shop.insert(shop))
    }

    async fn fetch(&self) -> Result<Shop, CoreError> {
        let not_found = || CoreError::NotFound {
            entity: "Shop".into(),
            identifier: self.shop_id.clone(),
        };

        match self.data_source {
            DataSource::Demo => fallback::shop(&self.shop_id).ok_or_else(not_found),
            DataSource::Live => self
                .client
                .get_shop(&self.shop_id)
                .await?
                .map(Shop::from)
                .ok_or_else(not_found),
            DataSource::Auto => match self.client.get_shop(&self.shop_id).await {
                Ok(Some(record)) => Ok(record.into()),
                Ok(None) => {
                    warn!(shop = %self.shop_id, "backend returned no shop; trying demo rows");
                    fallback::shop(&self.shop_id).ok_or_else(not_found)
                }
                Err(e) => {
                    warn!(shop = %self.shop_id, error = %e, "backend unavailable; trying demo rows");
                    fallback::shop(&self.shop_id).ok_or_else(not_found)
                }
            },
        }
    }

    fn loaded(&self) -> Result<&Shop, CoreError> {
        self.shop.as_ref().ok_or_else(|| CoreError::NotFound {
            entity: "Shop".into(),
            identifier: self.shop_id.clone(),
        })
    }

    // ── Dialogs ──────────────────────────────────────────────────────

    pub fn dialog(&self, action: ShopAction) -> ConfirmDialog {
        match action {
            ShopAction::ChangeTier => self.tier_dialog,
            ShopAction::ToggleSuspension => self.suspend_dialog,
            ShopAction::Delete => self.delete_dialog,
        }
    }

    fn dialog_mut(&mut self, action: ShopAction) -> &mut ConfirmDialog {
        match action {
            ShopAction::ChangeTier => &mut self.tier_dialog,
            ShopAction::ToggleSuspension => &mut self.suspend_dialog,
            ShopAction::Delete => &mut self.delete_dialog,
        }
    }

    pub fn open(&mut self, action: ShopAction) {
        self.dialog_mut(action).open();
    }

    pub fn cancel(&mut self, action: ShopAction) -> bool {
        self.dialog_mut(action).cancel()
    }

    // ── Tier change ──────────────────────────────────────────────────

    /// Pick the tier a subsequent [`change_tier`](Self::change_tier)
    /// applies. Case-insensitive; must name one of [`Tier::ALL`].
    pub fn select_tier(&mut self, raw: &str) -> Result<Tier, CoreError> {
        let tier = raw
            .trim()
            .parse::<Tier>()
            .ok()
            .filter(|t| Tier::ALL.contains(t))
            .ok_or_else(|| CoreError::ValidationFailed {
                message: format!(
                    "unknown tier '{raw}' (expected one of {})",
                    Tier::ALL.map(|t| t.to_string()).join(", ")
                ),
            })?;
        self.selected_tier = tier;
        Ok(tier)
    }

    pub async fn change_tier(&mut self) -> Result<Tier, CoreError> {
        let id = self.loaded()?.id.clone();
        let tier = self.selected_tier;
        self.tier_dialog.begin()?;

        let update = SubscriptionUpdate {
            tier: tier.to_string(),
            expires_at: None,
        };
        let result = if self.is_simulated() {
            debug!(shop = %id, %tier, "demo mode: tier change applied locally");
            Ok(())
        } else {
            self.client.update_subscription(&id, &update).await
        };

        match result {
            Ok(()) => {
                self.tier_dialog.succeed();
                self.reconcile_with(|shop| shop.tier = tier).await;
                Ok(tier)
            }
            Err(e) => {
                self.tier_dialog.fail();
                Err(e.into())
            }
        }
    }

    // ── Suspension ───────────────────────────────────────────────────

    /// Button label for the suspend toggle given the displayed status.
    pub fn suspend_label(&self) -> &'static str {
        match self.shop.as_ref().map(|s| s.status) {
            Some(ShopStatus::Suspended) => "Reactivate",
            _ => "Suspend",
        }
    }

    /// Flip between active and suspended, based on the displayed status.
    pub async fn toggle_suspension(&mut self) -> Result<ShopStatus, CoreError> {
        let shop = self.loaded()?;
        let id = shop.id.clone();
        let target = shop.status.toggle_target();
        self.suspend_dialog.begin()?;

        let result = if self.is_simulated() {
            debug!(shop = %id, status = %target, "demo mode: status change applied locally");
            Ok(())
        } else {
            self.client.update_shop_status(&id, target.as_ref()).await
        };

        match result {
            Ok(()) => {
                self.suspend_dialog.succeed();
                self.reconcile_with(|shop| shop.status = target).await;
                Ok(target)
            }
            Err(e) => {
                self.suspend_dialog.fail();
                Err(e.into())
            }
        }
    }

    // ── Deletion ─────────────────────────────────────────────────────

    /// Delete the shop. Navigation is only returned once the backend has
    /// confirmed; on failure the shop stays loaded and the dialog open.
    pub async fn delete(&mut self) -> Result<Navigation, CoreError> {
        let id = self.loaded()?.id.clone();
        self.delete_dialog.begin()?;

        let result = if self.is_simulated() {
            debug!(shop = %id, "demo mode: delete applied locally");
            Ok(())
        } else {
            self.client.delete_shop(&id).await
        };

        match result {
            Ok(()) => {
                self.delete_dialog.succeed();
                self.shop = None;
                self.version += 1;
                Ok(Navigation::Shops)
            }
            Err(e) => {
                self.delete_dialog.fail();
                Err(e.into())
            }
        }
    }

    // ── Reconciliation ───────────────────────────────────────────────

    fn is_simulated(&self) -> bool {
        self.data_source == DataSource::Demo
    }

    async fn reconcile_with(&mut self, merge: impl FnOnce(&mut Shop)) {
        if self.reconcile == ReconcileStrategy::Refetch && !self.is_simulated() {
            match self.client.get_shop(&self.shop_id).await {
                Ok(Some(record)) => {
                    self.shop = Some(record.into());
                    self.version += 1;
                    self.sync_list_row();
                    return;
                }
                Ok(None) => warn!(shop = %self.shop_id, "refetch returned no shop; merging locally"),
                Err(e) => warn!(shop = %self.shop_id, error = %e, "refetch failed; merging locally"),
            }
        }
        if let Some(shop) = self.shop.as_mut() {
            merge(shop);
        }
        self.version += 1;
        self.sync_list_row();
    }

    fn sync_list_row(&self) {
        let (Some(shops), Some(shop)) = (self.shops, self.shop.as_ref()) else {
            return;
        };
        let row = shop.clone();
        if !shops.patch(&self.shop_id, |r| *r = row) {
            debug!(shop = %self.shop_id, "shop not in current list view");
        }
    }
}

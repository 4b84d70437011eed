// ── Subscription bulk actions ──
//
// An id-keyed multi-select over subscriptions that survives paging, and
// the controller that applies one action to every selected row.

use chrono::{DateTime, TimeDelta, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, warn};
use yebomart_api::{AdminClient, SubscriptionUpdate};

use super::dialog::ConfirmDialog;
use crate::config::DataSource;
use crate::error::CoreError;
use crate::model::{Subscription, Tier};

/// Days a renewal adds to a subscription.
pub const RENEWAL_DAYS: i64 = 30;

// ── Selection ───────────────────────────────────────────────────────

/// Selected subscriptions, in the order they were picked.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionSelection {
    selected: IndexMap<String, Subscription>,
}

impl SubscriptionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one row; returns whether it is now selected.
    pub fn toggle(&mut self, subscription: &Subscription) -> bool {
        if self.selected.shift_remove(&subscription.id).is_some() {
            false
        } else {
            self.selected
                .insert(subscription.id.clone(), subscription.clone());
            true
        }
    }

    /// Select every row on `page`, or deselect them all if they already are.
    pub fn toggle_all(&mut self, page: &[Subscription]) {
        let all_selected = !page.is_empty() && page.iter().all(|s| self.contains(&s.id));
        if all_selected {
            for s in page {
                self.selected.shift_remove(&s.id);
            }
        } else {
            for s in page {
                self.selected.entry(s.id.clone()).or_insert_with(|| s.clone());
            }
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.selected.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subscription> {
        self.selected.values()
    }

    fn retain_ids(&mut self, keep: &[String]) {
        self.selected.retain(|id, _| keep.contains(id));
    }
}

// ── Actions ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BulkAction {
    /// Move every selected subscription to this tier.
    ChangeTier(Tier),
    /// Extend every selected subscription by [`RENEWAL_DAYS`].
    Renew,
}

impl BulkAction {
    /// Request body for one subscription.
    pub fn update_for(self, subscription: &Subscription, now: DateTime<Utc>) -> SubscriptionUpdate {
        match self {
            Self::ChangeTier(tier) => SubscriptionUpdate {
                tier: tier.to_string(),
                expires_at: None,
            },
            Self::Renew => {
                let base = subscription
                    .expiry_date
                    .map_or(now, |expiry| expiry.max(now));
                SubscriptionUpdate {
                    tier: subscription.tier.to_string(),
                    expires_at: Some(base + TimeDelta::days(RENEWAL_DAYS)),
                }
            }
        }
    }

    /// Apply the change a successful update implies to a local row.
    fn merge_into(self, subscription: &mut Subscription, update: &SubscriptionUpdate) {
        match self {
            Self::ChangeTier(tier) => subscription.tier = tier,
            Self::Renew => {
                if update.expires_at.is_some() {
                    subscription.expiry_date = update.expires_at;
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkFailure {
    pub id: String,
    pub message: String,
}

/// Per-row results of a bulk run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkOutcome {
    /// Rows the backend accepted, with the change merged in.
    pub updated: Vec<Subscription>,
    pub failed: Vec<BulkFailure>,
}

impl BulkOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

// ── Controller ──────────────────────────────────────────────────────

pub struct SubscriptionBulkController {
    client: AdminClient,
    data_source: DataSource,
    selection: SubscriptionSelection,
    dialog: ConfirmDialog,
    pending: Option<BulkAction>,
}

impl SubscriptionBulkController {
    pub fn new(client: AdminClient, data_source: DataSource) -> Self {
        Self {
            client,
            data_source,
            selection: SubscriptionSelection::new(),
            dialog: ConfirmDialog::default(),
            pending: None,
        }
    }

    pub fn selection(&self) -> &SubscriptionSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SubscriptionSelection {
        &mut self.selection
    }

    pub fn dialog(&self) -> ConfirmDialog {
        self.dialog
    }

    pub fn pending(&self) -> Option<BulkAction> {
        self.pending
    }

    /// Open the confirmation dialog for `action`.
    pub fn open(&mut self, action: BulkAction) {
        self.pending = Some(action);
        self.dialog.open();
    }

    pub fn cancel(&mut self) -> bool {
        let closed = self.dialog.cancel();
        if closed {
            self.pending = None;
        }
        closed
    }

    /// Run the action opened with [`open`](Self::open).
    pub async fn confirm(&mut self) -> Result<BulkOutcome, CoreError> {
        let action = self.pending.ok_or_else(|| CoreError::ValidationFailed {
            message: "no bulk action selected".into(),
        })?;
        self.execute(action).await
    }

    pub async fn execute(&mut self, action: BulkAction) -> Result<BulkOutcome, CoreError> {
        self.execute_at(action, Utc::now()).await
    }

    /// Apply `action` to every selected subscription, one request at a
    /// time. Accepted rows leave the selection; rejected rows stay
    /// selected and keep the dialog open.
    pub async fn execute_at(
        &mut self,
        action: BulkAction,
        now: DateTime<Utc>,
    ) -> Result<BulkOutcome, CoreError> {
        if self.selection.is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "no subscriptions selected".into(),
            });
        }
        self.dialog.begin()?;
        self.pending = Some(action);

        let rows: Vec<Subscription> = self.selection.iter().cloned().collect();
        let mut outcome = BulkOutcome::default();

        for mut row in rows {
            let update = action.update_for(&row, now);
            let result = if self.data_source == DataSource::Demo {
                debug!(subscription = %row.id, "demo mode: bulk update applied locally");
                Ok(())
            } else {
                self.client.update_subscription(&row.shop_id, &update).await
            };

            match result {
                Ok(()) => {
                    action.merge_into(&mut row, &update);
                    outcome.updated.push(row);
                }
                Err(e) => {
                    warn!(subscription = %row.id, error = %e, "bulk update rejected");
                    outcome.failed.push(BulkFailure {
                        id: row.id,
                        message: e.to_string(),
                    });
                }
            }
        }

        if outcome.is_complete() {
            info!(count = outcome.updated.len(), "bulk action applied");
            self.selection.clear();
            self.dialog.succeed();
            self.pending = None;
        } else {
            let failed: Vec<String> = outcome.failed.iter().map(|f| f.id.clone()).collect();
            self.selection.retain_ids(&failed);
            self.dialog.fail();
        }
        Ok(outcome)
    }
}

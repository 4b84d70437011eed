// Subscription endpoints
//
// The list endpoint is not paginated server-side; callers page locally.

use crate::client::{AdminClient, path_segment};
use crate::error::Error;
use crate::models::{SubscriptionRecord, SubscriptionUpdate};

impl AdminClient {
    /// `GET /api/admin/subscriptions`
    pub async fn list_subscriptions(&self) -> Result<Option<Vec<SubscriptionRecord>>, Error> {
        self.get("/api/admin/subscriptions").await
    }

    /// `PUT /api/admin/subscriptions/:shopId` with `{ tier, expiresAt? }`.
    pub async fn update_subscription(
        &self,
        shop_id: &str,
        update: &SubscriptionUpdate,
    ) -> Result<(), Error> {
        let _: Option<serde_json::Value> = self
            .put(
                &format!("/api/admin/subscriptions/{}", path_segment(shop_id)),
                update,
            )
            .await?;
        Ok(())
    }
}

// Shop endpoints
//
// Listing, detail, status changes and deletion for tenant shops.

use serde::Deserialize;

use crate::client::{AdminClient, path_segment};
use crate::error::Error;
use crate::models::{ListParams, ShopPage, ShopRecord, ShopStatusUpdate};

/// Detail payloads come either as the shop itself or wrapped as
/// `{ shop: {...} }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ShopDetailPayload {
    Wrapped { shop: ShopRecord },
    Flat(ShopRecord),
}

impl AdminClient {
    /// `GET /api/admin/shops?page&limit&search&...`
    pub async fn list_shops(&self, params: &ListParams) -> Result<Option<ShopPage>, Error> {
        self.get(&format!("/api/admin/shops{}", params.query_suffix()))
            .await
    }

    /// `GET /api/admin/shops/:id`
    pub async fn get_shop(&self, id: &str) -> Result<Option<ShopRecord>, Error> {
        let payload: Option<ShopDetailPayload> = self
            .get(&format!("/api/admin/shops/{}", path_segment(id)))
            .await?;
        Ok(payload.map(|p| match p {
            ShopDetailPayload::Wrapped { shop } | ShopDetailPayload::Flat(shop) => shop,
        }))
    }

    /// `PUT /api/admin/shops/:id/status` with `{ status }`.
    pub async fn update_shop_status(&self, id: &str, status: &str) -> Result<(), Error> {
        let _: Option<serde_json::Value> = self
            .put(
                &format!("/api/admin/shops/{}/status", path_segment(id)),
                &ShopStatusUpdate { status },
            )
            .await?;
        Ok(())
    }

    /// `DELETE /api/admin/shops/:id`
    pub async fn delete_shop(&self, id: &str) -> Result<(), Error> {
        let _: Option<serde_json::Value> = self
            .delete(&format!("/api/admin/shops/{}", path_segment(id)))
            .await?;
        Ok(())
    }
}

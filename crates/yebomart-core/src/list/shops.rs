// ── Shop listing ──

use yebomart_api::AdminClient;

use super::{ListEntity, LivePage, contains_ci};
use crate::fallback;
use crate::model::Shop;
use crate::query::QueryState;

impl ListEntity for Shop {
    const KIND: &'static str = "shop";
    const ITEMS_PER_PAGE: u32 = 10;
    const FILTERS: &'static [&'static str] = &["status", "tier"];

    fn id(&self) -> &str {
        &self.id
    }

    /// Name and owner ignore case; phone numbers match as typed.
    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle)
            || contains_ci(&self.owner_name, needle)
            || self.phone.contains(needle)
    }

    fn matches_filter(&self, name: &str, value: &str) -> bool {
        match name {
            "status" => self.status.as_ref().eq_ignore_ascii_case(value),
            "tier" => self.tier.as_ref().eq_ignore_ascii_case(value),
            _ => true,
        }
    }

    fn demo_dataset() -> Vec<Self> {
        fallback::shops()
    }

    async fn fetch_live(
        client: &AdminClient,
        query: &QueryState,
    ) -> Result<Option<LivePage<Self>>, yebomart_api::Error> {
        let params = query.to_list_params(Self::ITEMS_PER_PAGE);
        let Some(page) = client.list_shops(&params).await? else {
            return Ok(None);
        };
        let total = page
            .total
            .unwrap_or_else(|| u64::try_from(page.shops.len()).unwrap_or(u64::MAX));
        Ok(Some(LivePage {
            items: page.shops.into_iter().map(Shop::from).collect(),
            total,
            paginated: true,
        }))
    }
}

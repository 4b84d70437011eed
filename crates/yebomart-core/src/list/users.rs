// ── Staff user listing ──

use yebomart_api::AdminClient;

use super::{ListEntity, LivePage, contains_ci};
use crate::fallback;
use crate::model::StaffUser;
use crate::query::QueryState;

impl ListEntity for StaffUser {
    const KIND: &'static str = "user";
    const ITEMS_PER_PAGE: u32 = 15;
    const FILTERS: &'static [&'static str] = &["role"];

    fn id(&self) -> &str {
        &self.id
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle)
            || contains_ci(&self.email, needle)
            || contains_ci(&self.shop_name, needle)
            || self.phone.contains(needle)
    }

    fn matches_filter(&self, name: &str, value: &str) -> bool {
        match name {
            "role" => self.role.as_ref().eq_ignore_ascii_case(value),
            _ => true,
        }
    }

    fn demo_dataset() -> Vec<Self> {
        fallback::users()
    }

    async fn fetch_live(
        client: &AdminClient,
        query: &QueryState,
    ) -> Result<Option<LivePage<Self>>, yebomart_api::Error> {
        let params = query.to_list_params(Self::ITEMS_PER_PAGE);
        let Some(page) = client.list_users(&params).await? else {
            return Ok(None);
        };
        let total = page
            .total
            .unwrap_or_else(|| u64::try_from(page.users.len()).unwrap_or(u64::MAX));
        Ok(Some(LivePage {
            items: page.users.into_iter().map(StaffUser::from).collect(),
            total,
            paginated: true,
        }))
    }
}

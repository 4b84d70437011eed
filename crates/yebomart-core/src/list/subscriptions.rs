// ── Subscription listing ──
//
// The backend returns every subscription in one response, so live rows go
// through the same local filter and paging as demo rows.

use yebomart_api::AdminClient;

use super::{ListEntity, LivePage, contains_ci};
use crate::fallback;
use crate::model::{Subscription, Tier};
use crate::query::QueryState;

impl ListEntity for Subscription {
    const KIND: &'static str = "subscription";
    const ITEMS_PER_PAGE: u32 = 10;
    const FILTERS: &'static [&'static str] = &["tier", "status"];

    fn id(&self) -> &str {
        &self.id
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.shop_name, needle) || contains_ci(&self.owner_name, needle)
    }

    fn matches_filter(&self, name: &str, value: &str) -> bool {
        match name {
            "tier" => self.tier.as_ref().eq_ignore_ascii_case(value),
            "status" => self.status.as_ref().eq_ignore_ascii_case(value),
            _ => true,
        }
    }

    fn demo_dataset() -> Vec<Self> {
        fallback::subscriptions()
    }

    async fn fetch_live(
        client: &AdminClient,
        _query: &QueryState,
    ) -> Result<Option<LivePage<Self>>, yebomart_api::Error> {
        let Some(records) = client.list_subscriptions().await? else {
            return Ok(None);
        };
        let items: Vec<Subscription> = records.into_iter().map(Subscription::from).collect();
        let total = u64::try_from(items.len()).unwrap_or(u64::MAX);
        Ok(Some(LivePage {
            items,
            total,
            paginated: false,
        }))
    }
}

/// Count of subscriptions per tier, in [`Tier::ALL`] order.
pub fn tier_breakdown(subscriptions: &[Subscription]) -> Vec<(Tier, usize)> {
    Tier::ALL
        .iter()
        .map(|tier| {
            let count = subscriptions.iter().filter(|s| s.tier == *tier).count();
            (*tier, count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::apply_locally;

    #[test]
    fn breakdown_counts_demo_tiers() {
        let counts = tier_breakdown(&fallback::subscriptions());
        assert_eq!(counts[0], (Tier::Free, 0));
        assert_eq!(counts[1], (Tier::Lite, 9));
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 45);
    }

    #[test]
    fn status_filter_on_demo_rows() {
        let query = QueryState::new().with_filter("status", "expired");
        let (items, total) = apply_locally(fallback::subscriptions(), &query);
        assert_eq!(total, 7);
        assert!(items.iter().all(|s| s.status.as_ref() == "expired"));
    }
}

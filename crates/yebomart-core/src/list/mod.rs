// ── List query controllers ──
//
// One generic controller per entity list (shops, staff users,
// subscriptions). Each refresh is stamped with a monotonically increasing
// generation and a fresh cancellation token; starting a new refresh
// cancels the previous one, and only the newest generation's view is
// published to subscribers.

pub mod shops;
pub mod subscriptions;
pub mod users;

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use yebomart_api::AdminClient;

use crate::config::DataSource;
use crate::error::CoreError;
use crate::pagination::{page_window, total_pages, visible_pages};
use crate::query::QueryState;

pub use subscriptions::tier_breakdown;

// ── Entity contract ─────────────────────────────────────────────────

/// A page of entities as the backend returned it.
#[derive(Debug, Clone)]
pub struct LivePage<E> {
    pub items: Vec<E>,
    pub total: u64,
    /// `false` when the endpoint returned the whole collection and
    /// filtering and paging must happen locally.
    pub paginated: bool,
}

/// An entity type that can be listed, searched and filtered.
pub trait ListEntity: Clone + Send + Sync + 'static {
    /// Singular noun used in logs and errors.
    const KIND: &'static str;
    const ITEMS_PER_PAGE: u32;
    /// Query keys accepted as filters; anything else is dropped.
    const FILTERS: &'static [&'static str];

    fn id(&self) -> &str;

    /// Substring match of `needle` against the searchable fields.
    fn matches_search(&self, needle: &str) -> bool;

    /// Match against one filter. Values are compared case-insensitively.
    fn matches_filter(&self, name: &str, value: &str) -> bool;

    /// Deterministic local collection for demo and fallback views.
    fn demo_dataset() -> Vec<Self>;

    /// Fetch the page described by `query` from the backend.
    fn fetch_live(
        client: &AdminClient,
        query: &QueryState,
    ) -> impl Future<Output = Result<Option<LivePage<Self>>, yebomart_api::Error>> + Send;
}

// ── View ────────────────────────────────────────────────────────────

/// Where a published view's rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewSource {
    Live,
    Demo,
    /// Demo rows served because the backend yielded nothing.
    Fallback,
}

/// The rows visible for one query, plus the counts a pager needs.
#[derive(Debug, Clone, Serialize)]
pub struct ListView<E> {
    pub items: Vec<E>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub source: ViewSource,
    pub generation: u64,
    pub query: QueryState,
}

impl<E> ListView<E> {
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.per_page)
    }

    pub fn visible_pages(&self) -> Vec<u32> {
        visible_pages(self.page, self.total_pages())
    }
}

/// Filter and page `items` in memory. Returns the visible window and the
/// filtered count.
pub fn apply_locally<E: ListEntity>(items: Vec<E>, query: &QueryState) -> (Vec<E>, u64) {
    let search = query.search().trim();
    let filters: Vec<(&str, &str)> = query
        .filters()
        .iter()
        .filter(|(name, _)| E::FILTERS.contains(&name.as_str()))
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();

    let filtered: Vec<E> = items
        .into_iter()
        .filter(|e| search.is_empty() || e.matches_search(search))
        .filter(|e| filters.iter().all(|(name, value)| e.matches_filter(name, value)))
        .collect();

    let total = u64::try_from(filtered.len()).unwrap_or(u64::MAX);
    let window = page_window(&filtered, query.page(), E::ITEMS_PER_PAGE).to_vec();
    (window, total)
}

/// Case-insensitive substring test.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ── Controller ──────────────────────────────────────────────────────

/// Derives the visible slice of one entity list from the current query.
pub struct ListController<E: ListEntity> {
    client: AdminClient,
    data_source: DataSource,
    query: Mutex<QueryState>,
    generation: AtomicU64,
    inflight: Mutex<CancellationToken>,
    view: watch::Sender<Option<Arc<ListView<E>>>>,
}

impl<E: ListEntity> ListController<E> {
    pub fn new(client: AdminClient, data_source: DataSource) -> Self {
        let (view, _) = watch::channel(None);
        Self {
            client,
            data_source,
            query: Mutex::new(QueryState::default()),
            generation: AtomicU64::new(0),
            inflight: Mutex::new(CancellationToken::new()),
            view,
        }
    }

    pub fn data_source(&self) -> DataSource {
        self.data_source
    }

    pub fn query(&self) -> QueryState {
        self.query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Latest published view.
    pub fn current(&self) -> Option<Arc<ListView<E>>> {
        self.view.borrow().clone()
    }

    /// Subscribe to published views.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<ListView<E>>>> {
        self.view.subscribe()
    }

    // ── Query changes (each triggers a refresh) ─────────────────────

    pub async fn set_query(&self, query: QueryState) -> Result<Option<Arc<ListView<E>>>, CoreError> {
        self.update_query(|q| *q = query);
        self.refresh().await
    }

    pub async fn set_page(&self, page: u32) -> Result<Option<Arc<ListView<E>>>, CoreError> {
        self.update_query(|q| q.set_page(page));
        self.refresh().await
    }

    pub async fn set_search(
        &self,
        search: impl Into<String>,
    ) -> Result<Option<Arc<ListView<E>>>, CoreError> {
        let search = search.into();
        self.update_query(|q| q.set_search(search));
        self.refresh().await
    }

    pub async fn set_filter(
        &self,
        name: &str,
        value: &str,
    ) -> Result<Option<Arc<ListView<E>>>, CoreError> {
        if !E::FILTERS.contains(&name) {
            return Err(CoreError::ValidationFailed {
                message: format!("unknown {} filter: {name}", E::KIND),
            });
        }
        self.update_query(|q| q.set_filter(name, value));
        self.refresh().await
    }

    fn update_query(&self, f: impl FnOnce(&mut QueryState)) {
        let mut query = self.query.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut query);
        query.retain_filters(E::FILTERS);
    }

    // ── Refresh ─────────────────────────────────────────────────────

    /// Load the view for the current query and publish it.
    ///
    /// Returns `Ok(None)` when a newer refresh started before this one
    /// finished; its result (success or error) is discarded.
    pub async fn refresh(&self) -> Result<Option<Arc<ListView<E>>>, CoreError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();
        {
            let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
            inflight.cancel();
            *inflight = token.clone();
        }
        let query = self.query();
        debug!(kind = E::KIND, generation, query = %query.to_query_string(), "refreshing list");

        let outcome = tokio::select! {
            biased;
            () = token.cancelled() => {
                debug!(kind = E::KIND, generation, "list refresh cancelled");
                return Ok(None);
            }
            outcome = self.load(&query) => outcome,
        };

        if generation != self.generation.load(Ordering::SeqCst) {
            warn!(kind = E::KIND, generation, "discarding stale list response");
            return Ok(None);
        }

        let (items, total, source) = outcome?;
        let view = Arc::new(ListView {
            items,
            total,
            page: query.page(),
            per_page: E::ITEMS_PER_PAGE,
            source,
            generation,
            query,
        });
        self.view.send_replace(Some(Arc::clone(&view)));
        Ok(Some(view))
    }

    /// Walk every page of the current query and gather the rows. Leaves
    /// the controller on the last page.
    pub async fn collect_all(&self) -> Result<Vec<E>, CoreError> {
        let mut rows = Vec::new();
        let mut page = 1;
        loop {
            let Some(view) = self.set_page(page).await? else {
                return Err(CoreError::Internal(format!(
                    "{} listing superseded while paging",
                    E::KIND
                )));
            };
            rows.extend(view.items.iter().cloned());
            if view.items.is_empty() || page >= view.total_pages() {
                return Ok(rows);
            }
            page += 1;
        }
    }

    /// Apply `f` to the row with `id` in the published view without
    /// refetching. Subscribers are notified only when a row matched.
    pub fn patch(&self, id: &str, f: impl FnOnce(&mut E)) -> bool {
        self.view.send_if_modified(|current| {
            let Some(view) = current.as_mut() else {
                return false;
            };
            let Some(pos) = view.items.iter().position(|e| e.id() == id) else {
                return false;
            };
            let mut next = (**view).clone();
            let Some(row) = next.items.get_mut(pos) else {
                return false;
            };
            f(row);
            *view = Arc::new(next);
            debug!(kind = E::KIND, id, "patched list row");
            true
        })
    }

    async fn load(&self, query: &QueryState) -> Result<(Vec<E>, u64, ViewSource), CoreError> {
        match self.data_source {
            DataSource::Demo => {
                let (items, total) = apply_locally(E::demo_dataset(), query);
                Ok((items, total, ViewSource::Demo))
            }
            DataSource::Live => match E::fetch_live(&self.client, query).await? {
                Some(page) => Ok(Self::from_live(page, query)),
                None => Ok((Vec::new(), 0, ViewSource::Live)),
            },
            DataSource::Auto => match E::fetch_live(&self.client, query).await {
                Ok(Some(page)) => Ok(Self::from_live(page, query)),
                Ok(None) => {
                    warn!(kind = E::KIND, "backend returned no data; serving demo rows");
                    Ok(Self::fallback(query))
                }
                Err(e) => {
                    warn!(kind = E::KIND, error = %e, "backend unavailable; serving demo rows");
                    Ok(Self::fallback(query))
                }
            },
        }
    }

    fn from_live(page: LivePage<E>, query: &QueryState) -> (Vec<E>, u64, ViewSource) {
        if page.paginated {
            (page.items, page.total, ViewSource::Live)
        } else {
            let (items, total) = apply_locally(page.items, query);
            (items, total, ViewSource::Live)
        }
    }

    fn fallback(query: &QueryState) -> (Vec<E>, u64, ViewSource) {
        let (items, total) = apply_locally(E::demo_dataset(), query);
        (items, total, ViewSource::Fallback)
    }
}

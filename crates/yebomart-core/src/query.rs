// ── List query state ──
//
// Page, search text and filters for one list view, round-tripped through
// a URL query string (`page=2&search=Fresh&status=active`) so a view can
// be shared, bookmarked or passed on the command line.

use std::collections::BTreeMap;

use serde::Serialize;
use yebomart_api::ListParams;

/// Filter value meaning "no filter".
pub const FILTER_ALL: &str = "all";

const PAGE_KEY: &str = "page";
const SEARCH_KEY: &str = "search";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryState {
    page: u32,
    search: String,
    filters: BTreeMap<String, String>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            filters: BTreeMap::new(),
        }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }

    // ── Mutation ────────────────────────────────────────────────────

    /// Jump to `page` (clamped to 1). Search and filters are kept.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Replace the search text and return to the first page.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Set or clear a filter and return to the first page. An empty value
    /// or `all` clears it. `page` and `search` are not filters and are
    /// ignored here.
    pub fn set_filter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.put_filter(name.into(), value.into());
        self.page = 1;
    }

    fn put_filter(&mut self, name: String, value: String) {
        if name == PAGE_KEY || name == SEARCH_KEY {
            return;
        }
        if is_unfiltered(&value) {
            self.filters.remove(&name);
        } else {
            self.filters.insert(name, value);
        }
    }

    /// Drop filters whose name is not in `allowed`.
    pub fn retain_filters(&mut self, allowed: &[&str]) {
        self.filters.retain(|name, _| allowed.contains(&name.as_str()));
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.set_page(page);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.put_filter(name.into(), value.into());
        self
    }

    // ── URL encoding ────────────────────────────────────────────────

    /// Encode as `page=..&search=..&<filter>=..`; empty search is omitted.
    pub fn to_query_string(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.append_pair(PAGE_KEY, &self.page.to_string());
        if !self.search.is_empty() {
            query.append_pair(SEARCH_KEY, &self.search);
        }
        for (name, value) in &self.filters {
            query.append_pair(name, value);
        }
        query.finish()
    }

    /// Decode a query string (leading `?` optional). A missing, zero or
    /// unparsable page decodes to 1; every other key is a filter.
    pub fn from_query_string(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut state = Self::default();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                PAGE_KEY => state.page = value.trim().parse::<u32>().unwrap_or(1).max(1),
                SEARCH_KEY => state.search = value.into_owned(),
                _ => state.put_filter(key.into_owned(), value.into_owned()),
            }
        }
        state
    }

    /// Request parameters for a server-paginated list endpoint.
    pub fn to_list_params(&self, limit: u32) -> ListParams {
        ListParams {
            page: self.page,
            limit,
            search: Some(self.search.clone()).filter(|s| !s.is_empty()),
            filters: self
                .filters
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

fn is_unfiltered(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(FILTER_ALL)
}

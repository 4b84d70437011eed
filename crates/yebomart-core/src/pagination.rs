// ── Page arithmetic ──
//
// 1-based pages over a filtered collection. Out-of-range pages yield an
// empty window rather than an error.

/// Number of pages shown in a pager strip.
pub const VISIBLE_PAGES: u32 = 5;

/// `ceil(total / per_page)`; zero when `per_page` is zero.
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX)
}

/// Items `(page-1)*per_page .. page*per_page`, clipped to the slice.
pub fn page_window<T>(items: &[T], page: u32, per_page: u32) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let per_page = usize::try_from(per_page).unwrap_or(usize::MAX);
    let start = usize::try_from(page - 1)
        .unwrap_or(usize::MAX)
        .saturating_mul(per_page);
    let end = start.saturating_add(per_page).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

/// Page numbers for a pager strip: up to [`VISIBLE_PAGES`] centred on
/// `current`, shifted to stay within `1..=total_pages`. Empty when there
/// is at most one page.
pub fn visible_pages(current: u32, total_pages: u32) -> Vec<u32> {
    if total_pages <= 1 {
        return Vec::new();
    }
    let mut start = current.saturating_sub(VISIBLE_PAGES / 2).max(1);
    let end = total_pages.min(start + VISIBLE_PAGES - 1);
    if end - start + 1 < VISIBLE_PAGES {
        start = end.saturating_sub(VISIBLE_PAGES - 1).max(1);
    }
    (start..=end).collect()
}

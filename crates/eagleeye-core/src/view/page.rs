// ── Pagination controller ──
//
// One conversion site between the 0-based wire index and the 1-based pages
// shown to operators: `wire_page()`. Everything else in the workspace is
// 1-based.

use serde::{Deserialize, Serialize};

/// A fetched page of entities as the backend returned it.
///
/// Invariants once loaded: `0 <= page_index < total_pages` and
/// `items.len() <= page_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedPage<T> {
    pub items: Vec<T>,
    /// 0-based.
    pub page_index: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

/// Tracks the current page and size for one view.
///
/// `current_page` is 1-based and clamped into `[1, total_pages]`;
/// out-of-range transitions are no-ops, matching the disabled prev/next
/// buttons in the dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pager {
    current_page: i64,
    page_size: i64,
    total_pages: i64,
}

impl Pager {
    pub fn new(page_size: i64) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_pages: 0,
        }
    }

    /// 1-based page shown to the operator.
    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    /// 0-based page index for wire requests.
    pub fn wire_page(&self) -> i64 {
        self.current_page - 1
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn total_pages(&self) -> i64 {
        self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Jump to a 1-based page. Out-of-range requests are no-ops; returns
    /// whether the page changed.
    pub fn go_to_page(&mut self, page: i64) -> bool {
        if page < 1 || page > self.total_pages || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.go_to_page(self.current_page - 1)
    }

    /// Change the page size and reset to the first page.
    pub fn set_page_size(&mut self, size: i64) {
        self.page_size = size.max(1);
        self.current_page = 1;
    }

    /// Reset to the first page (e.g. when the search query changes).
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Server-side mode: adopt the page count the backend reported.
    pub fn set_total_pages(&mut self, total: i64) {
        self.total_pages = total.max(0);
        self.clamp();
    }

    /// Client-side mode: recompute the page count from the filtered item
    /// count. Called whenever the filter predicate changes.
    pub fn set_total_items(&mut self, count: usize) {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        self.total_pages = (count as u64).div_ceil(self.page_size as u64) as i64;
        self.clamp();
    }

    /// Slice the locally held collection down to the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.wire_page() * self.page_size).unwrap_or(usize::MAX);
        let end = usize::try_from(self.current_page * self.page_size).unwrap_or(usize::MAX);
        let start = start.min(items.len());
        let end = end.min(items.len());
        &items[start..end]
    }

    fn clamp(&mut self) {
        self.current_page = self.current_page.clamp(1, self.total_pages.max(1));
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_to_page_zero_at_first_page_is_noop() {
        let mut pager = Pager::new(10);
        pager.set_total_items(35);

        assert!(!pager.go_to_page(0));
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn go_to_page_beyond_total_is_noop() {
        let mut pager = Pager::new(10);
        pager.set_total_items(35);
        assert_eq!(pager.total_pages(), 4);

        assert!(!pager.go_to_page(5));
        assert_eq!(pager.current_page(), 1);
        assert!(pager.go_to_page(4));
        assert!(!pager.next_page());
    }

    #[test]
    fn total_pages_is_ceil_of_items_over_size() {
        let mut pager = Pager::new(10);
        pager.set_total_items(0);
        assert_eq!(pager.total_pages(), 0);
        pager.set_total_items(10);
        assert_eq!(pager.total_pages(), 1);
        pager.set_total_items(11);
        assert_eq!(pager.total_pages(), 2);
    }

    #[test]
    fn shrinking_filter_clamps_current_page() {
        let mut pager = Pager::new(10);
        pager.set_total_items(50);
        assert!(pager.go_to_page(5));

        // Filter narrows the collection; the current page clamps down.
        pager.set_total_items(12);
        assert_eq!(pager.total_pages(), 2);
        assert_eq!(pager.current_page(), 2);
    }

    #[test]
    fn set_page_size_resets_to_first_page() {
        let mut pager = Pager::new(10);
        pager.set_total_items(50);
        assert!(pager.go_to_page(3));

        pager.set_page_size(25);
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.page_size(), 25);
    }

    #[test]
    fn slice_returns_current_page_window() {
        let items: Vec<i64> = (0..25).collect();
        let mut pager = Pager::new(10);
        pager.set_total_items(items.len());

        assert_eq!(pager.slice(&items), &items[0..10]);
        assert!(pager.go_to_page(3));
        assert_eq!(pager.slice(&items), &items[20..25]);
        assert!(pager.slice(&items).len() <= usize::try_from(pager.page_size()).unwrap_or(0));
    }

    #[test]
    fn wire_page_is_zero_based() {
        let mut pager = Pager::new(10);
        pager.set_total_items(30);
        assert_eq!(pager.wire_page(), 0);
        assert!(pager.go_to_page(2));
        assert_eq!(pager.wire_page(), 1);
    }

    #[test]
    fn empty_collection_keeps_page_one() {
        let mut pager = Pager::new(10);
        pager.set_total_items(0);
        assert_eq!(pager.current_page(), 1);
        assert!(!pager.has_next());
        assert!(!pager.has_prev());
        let empty: Vec<i64> = Vec::new();
        assert!(pager.slice(&empty).is_empty());
    }
}

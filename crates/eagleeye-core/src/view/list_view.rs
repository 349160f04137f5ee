// ── Polling list-view model ──
//
// The one abstraction every screen repeats: a normalized collection, a
// field filter, an optional fixed sort, a pager, and a load state. Each
// poll tick replaces the collection wholesale; the view recomputes its
// derived sequences and never mutates a shared input.

use super::filter::{FieldLookup, FilterSpec, filter};
use super::page::Pager;

/// Load state gating what a screen renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Initial fetch still outstanding.
    Loading,
    Loaded,
    /// Fetch failed; `message` is the user-visible degradation text. The
    /// previously loaded records stay available (stale) for display.
    Failed { message: String },
}

/// Fixed ordering applied after filtering (e.g. alarm severity).
pub type SortFn<T> = fn(&[T]) -> Vec<T>;

/// View model for one list screen.
///
/// Owned exclusively by its hosting view; mutation flows through methods,
/// reads through accessors. No state is shared across views.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    records: Vec<T>,
    filtered: Vec<T>,
    display: Vec<T>,
    spec: FilterSpec,
    hide_filtered: bool,
    sort: Option<SortFn<T>>,
    pager: Pager,
    state: LoadState,
}

impl<T: FieldLookup + Clone + PartialEq> ListView<T> {
    pub fn new(page_size: i64) -> Self {
        Self {
            records: Vec::new(),
            filtered: Vec::new(),
            display: Vec::new(),
            spec: FilterSpec::default(),
            hide_filtered: false,
            sort: None,
            pager: Pager::new(page_size),
            state: LoadState::Loading,
        }
    }

    /// Attach a fixed ordering (applied to both the filtered set and its
    /// complement).
    pub fn with_sort(mut self, sort: SortFn<T>) -> Self {
        self.sort = Some(sort);
        self
    }

    // ── Snapshot application ─────────────────────────────────────────

    /// Replace the collection wholesale with a fresh normalized snapshot.
    pub fn apply_snapshot(&mut self, records: Vec<T>) {
        self.records = records;
        self.state = LoadState::Loaded;
        self.recompute();
    }

    /// Record a fetch failure. Previously loaded records stay visible as
    /// stale data; the message is for the screen's error banner.
    pub fn apply_error(&mut self, message: impl Into<String>) {
        self.state = LoadState::Failed {
            message: message.into(),
        };
    }

    // ── Filter control ───────────────────────────────────────────────

    /// Replace the filter spec. Changing the query resets to the first
    /// page.
    pub fn set_filter(&mut self, spec: FilterSpec) {
        self.spec = spec;
        self.pager.reset();
        self.recompute();
    }

    pub fn filter_spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// Toggle the "hide filtered" overlay: when on, the view shows the
    /// complement of the last filtered set against the full collection.
    pub fn toggle_hide_filtered(&mut self) {
        self.hide_filtered = !self.hide_filtered;
        self.recompute();
    }

    pub fn hide_filtered(&self) -> bool {
        self.hide_filtered
    }

    // ── Page control ─────────────────────────────────────────────────

    pub fn go_to_page(&mut self, page: i64) -> bool {
        self.pager.go_to_page(page)
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pager.prev_page()
    }

    pub fn set_page_size(&mut self, size: i64) {
        self.pager.set_page_size(size);
        self.recompute();
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The full normalized collection from the last successful fetch.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// The filtered (and sorted) set, before the hide overlay and paging.
    pub fn filtered(&self) -> &[T] {
        &self.filtered
    }

    /// Number of rows in the display set across all pages.
    pub fn display_len(&self) -> usize {
        self.display.len()
    }

    /// The rows for the current page.
    pub fn visible(&self) -> &[T] {
        self.pager.slice(&self.display)
    }

    // ── Internals ────────────────────────────────────────────────────

    fn recompute(&mut self) {
        let filtered = filter(&self.records, &self.spec);
        self.filtered = match self.sort {
            Some(sort) => sort(&filtered),
            None => filtered,
        };

        let display = if self.hide_filtered {
            let complement: Vec<T> = self
                .records
                .iter()
                .filter(|r| !self.filtered.contains(r))
                .cloned()
                .collect();
            match self.sort {
                Some(sort) => sort(&complement),
                None => complement,
            }
        } else {
            self.filtered.clone()
        };

        self.pager.set_total_items(display.len());
        self.display = display;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Alarm, Severity};
    use crate::view::sort::sort_alarms;

    fn alarm(entity_id: i64, key: &str, severity: i64) -> Alarm {
        Alarm {
            severity: Severity::from_code(severity),
            entity_type: Some("device".into()),
            entity_id: Some(entity_id),
            key: Some(key.to_owned()),
            status: Some("active".into()),
            start_time: None,
            duration_secs: None,
        }
    }

    fn loaded_view() -> ListView<Alarm> {
        let mut view = ListView::new(10).with_sort(sort_alarms);
        view.apply_snapshot(vec![
            alarm(1, "OFFLINE", 2),
            alarm(2, "LOW_SIGNAL", 4),
            alarm(3, "REBOOTED", 1),
        ]);
        view
    }

    #[test]
    fn snapshot_sorts_by_severity() {
        let view = loaded_view();
        let keys: Vec<&str> = view.visible().iter().map(|a| a.key.as_deref().unwrap()).collect();
        assert_eq!(keys, vec!["LOW_SIGNAL", "OFFLINE", "REBOOTED"]);
        assert_eq!(view.state(), &LoadState::Loaded);
    }

    #[test]
    fn filter_narrows_and_resets_page() {
        let mut view = ListView::new(1).with_sort(sort_alarms);
        view.apply_snapshot(vec![
            alarm(1, "OFFLINE", 2),
            alarm(2, "LOW_SIGNAL", 4),
            alarm(3, "OFFLINE", 1),
        ]);
        assert!(view.go_to_page(3));

        view.set_filter(FilterSpec::field_contains("key", "offline"));

        assert_eq!(view.pager().current_page(), 1);
        assert_eq!(view.display_len(), 2);
    }

    #[test]
    fn hide_filtered_shows_complement() {
        let mut view = loaded_view();
        view.set_filter(FilterSpec::field_contains("key", "OFFLINE"));
        assert_eq!(view.display_len(), 1);

        view.toggle_hide_filtered();

        let keys: Vec<&str> = view.visible().iter().map(|a| a.key.as_deref().unwrap()).collect();
        assert_eq!(keys, vec!["LOW_SIGNAL", "REBOOTED"]);

        view.toggle_hide_filtered();
        assert_eq!(view.display_len(), 1);
    }

    #[test]
    fn failed_fetch_keeps_stale_records() {
        let mut view = loaded_view();
        view.apply_error("Failed to fetch alarms.");

        assert!(matches!(view.state(), LoadState::Failed { .. }));
        assert_eq!(view.records().len(), 3);
        assert_eq!(view.visible().len(), 3);
    }

    #[test]
    fn page_size_repaginates_display() {
        let mut view = ListView::new(2).with_sort(sort_alarms);
        view.apply_snapshot((0..5).map(|i| alarm(i, "K", 1)).collect());

        assert_eq!(view.pager().total_pages(), 3);
        assert_eq!(view.visible().len(), 2);

        view.set_page_size(5);
        assert_eq!(view.pager().total_pages(), 1);
        assert_eq!(view.visible().len(), 5);
    }
}

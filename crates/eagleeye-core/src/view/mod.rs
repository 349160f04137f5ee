// ── View-model layer ──
//
// Pure filtering/sorting, pagination, and the list-view model that ties
// them together for one screen.

pub mod filter;
pub mod list_view;
pub mod page;
pub mod sort;

pub use filter::{FieldLookup, FieldValue, FilterSpec, MatchMode, filter};
pub use list_view::{ListView, LoadState};
pub use page::{FetchedPage, Pager};
pub use sort::sort_alarms;

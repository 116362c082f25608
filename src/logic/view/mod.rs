//! View Module - Sort & Search Composer
//!
//! raw records → filter (rule set) → search → sort.
//! Every stage produces a new view; the source collection is never touched.
//!
//! ## Structure
//! - `search`: Quick search over all fields
//! - `sort`: Stable value-typed column sort

pub mod search;
pub mod sort;

use serde::{Deserialize, Serialize};

use crate::logic::filter::{self, FilterRule};
use crate::logic::records::ConnectionRecord;

pub use search::{search, matches_search};
pub use sort::{compare_by, sort_records, SortConfig, SortDirection};

/// Table state applied after filtering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewQuery {
    pub search_term: String,
    pub sort: SortConfig,
}

/// Search then sort an already filtered view
pub fn compose<'a, I>(records: I, search_term: &str, sort: SortConfig) -> Vec<&'a ConnectionRecord>
where
    I: IntoIterator<Item = &'a ConnectionRecord>,
{
    let mut view = search(records, search_term);
    sort_records(&mut view, sort);
    view
}

/// Full pipeline over the raw collection
pub fn run<'a>(
    records: &'a [ConnectionRecord],
    rules: &[FilterRule],
    query: &ViewQuery,
) -> Vec<&'a ConnectionRecord> {
    let filtered = filter::apply(records, rules);
    compose(filtered, &query.search_term, query.sort)
}

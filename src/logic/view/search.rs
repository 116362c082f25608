//! Quick Search
//!
//! Keeps records where any field, stringified, contains the term (case-insensitive).

use crate::logic::records::{ConnectionRecord, RecordField};

/// Does any field of the record contain the lower-cased needle?
pub fn matches_search(record: &ConnectionRecord, needle: &str) -> bool {
    RecordField::ALL.iter().any(|field| {
        record
            .get(*field)
            .to_text()
            .map(|text| text.to_lowercase().contains(needle))
            .unwrap_or(false)
    })
}

/// Narrow a view by search term. Empty term keeps everything.
pub fn search<'a, I>(records: I, term: &str) -> Vec<&'a ConnectionRecord>
where
    I: IntoIterator<Item = &'a ConnectionRecord>,
{
    if term.is_empty() {
        return records.into_iter().collect();
    }

    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|record| matches_search(record, &needle))
        .collect()
}

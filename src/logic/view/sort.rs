//! Column Sort
//!
//! Stable, value-typed sort over one record field.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::logic::records::{ConnectionRecord, RecordField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Sort key + direction. `key = None` leaves the order untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: Option<RecordField>,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    /// Newest first
    fn default() -> Self {
        Self {
            key: Some(RecordField::Timestamp),
            direction: SortDirection::Descending,
        }
    }
}

impl SortConfig {
    pub fn none() -> Self {
        Self {
            key: None,
            direction: SortDirection::Ascending,
        }
    }

    pub fn by(key: RecordField, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Column header click: the current ascending key flips to descending,
    /// anything else sorts ascending by the clicked key.
    pub fn request(&mut self, key: RecordField) {
        self.direction = if self.key == Some(key) && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.key = Some(key);
    }
}

/// Compare two records on one field in the given direction
pub fn compare_by(a: &ConnectionRecord, b: &ConnectionRecord, key: RecordField, direction: SortDirection) -> Ordering {
    let ordering = a.get(key).compare(&b.get(key));
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Sort a view in place. Ties keep their input order.
pub fn sort_records(records: &mut [&ConnectionRecord], config: SortConfig) {
    if let Some(key) = config.key {
        // slice::sort_by is stable
        records.sort_by(|a, b| compare_by(a, b, key, config.direction));
    }
}

//! CSV Serialization
//!
//! Fixed column order, RFC-4180 style quoting.

use crate::logic::records::{ConnectionRecord, RecordField};

pub const SEPARATOR: char = ',';

/// Quote a cell if it contains a separator, quote or line break.
/// Embedded quotes are doubled.
pub fn csv_escape(value: &str) -> String {
    if value.contains([SEPARATOR, '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Header row
pub fn csv_header() -> String {
    RecordField::ALL
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// One data row. Missing values render as empty cells.
pub fn csv_row(record: &ConnectionRecord) -> String {
    RecordField::ALL
        .iter()
        .map(|field| {
            record
                .get(*field)
                .to_text()
                .map(|text| csv_escape(&text))
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Serialize records to CSV text. `None` for empty input: nothing should be written.
pub fn export_csv<'a, I>(records: I) -> Option<String>
where
    I: IntoIterator<Item = &'a ConnectionRecord>,
{
    let rows: Vec<String> = records.into_iter().map(csv_row).collect();
    if rows.is_empty() {
        return None;
    }

    let mut content = csv_header();
    for row in rows {
        content.push('\n');
        content.push_str(&row);
    }
    Some(content)
}

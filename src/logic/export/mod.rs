//! Tabular Exporter
//!
//! Serialize a result view for download.
//!
//! ## Structure
//! - `csv.rs` - CSV with fixed column order and quoting
//! - `sink.rs` - Where the bytes end up (file, memory)

pub mod csv;
pub mod sink;

use crate::logic::records::ConnectionRecord;

pub use self::csv::{csv_escape, csv_header, csv_row, export_csv};
pub use sink::{ExportSink, FileSink, MemorySink};

// ============================================================================
// EXPORT FORMATS
// ============================================================================

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// CSV for spreadsheet analysis
    Csv,
    /// JSONL (one record per line)
    Jsonl,
}

/// One JSON object per line. `None` for empty input.
pub fn export_jsonl<'a, I>(records: I) -> Option<String>
where
    I: IntoIterator<Item = &'a ConnectionRecord>,
{
    let lines: Vec<String> = records
        .into_iter()
        .filter_map(|record| match serde_json::to_string(record) {
            Ok(line) => Some(line),
            Err(e) => {
                log::warn!("Skipping record {} in JSONL export: {}", record.id, e);
                None
            }
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Render records in a format, `None` when there is nothing to export
pub fn render<'a, I>(records: I, format: ExportFormat) -> Option<String>
where
    I: IntoIterator<Item = &'a ConnectionRecord>,
{
    match format {
        ExportFormat::Csv => export_csv(records),
        ExportFormat::Jsonl => export_jsonl(records),
    }
}

/// Render and hand to a sink. Returns `false` (and writes nothing) for empty input.
pub fn export_to<'a, S, I>(sink: &mut S, filename: &str, records: I, format: ExportFormat) -> std::io::Result<bool>
where
    S: ExportSink + ?Sized,
    I: IntoIterator<Item = &'a ConnectionRecord>,
{
    match render(records, format) {
        Some(content) => {
            sink.deliver(filename, content.as_bytes())?;
            Ok(true)
        }
        None => {
            log::debug!("Nothing to export to {}", filename);
            Ok(false)
        }
    }
}

//! Record Source
//!
//! Loads the initial record collection. The core never generates or persists records.

use std::path::PathBuf;

use super::types::ConnectionRecord;
use crate::error::SourceError;

/// Supplier of connection records
pub trait RecordSource {
    fn load(&self) -> Result<Vec<ConnectionRecord>, SourceError>;
}

/// JSON array of records, from a file or an in-memory string
#[derive(Debug, Clone)]
pub enum JsonRecordSource {
    File(PathBuf),
    Inline(String),
}

impl RecordSource for JsonRecordSource {
    fn load(&self) -> Result<Vec<ConnectionRecord>, SourceError> {
        let records: Vec<ConnectionRecord> = match self {
            JsonRecordSource::File(path) => {
                let content = std::fs::read_to_string(path)?;
                serde_json::from_str(&content)?
            }
            JsonRecordSource::Inline(json) => serde_json::from_str(json)?,
        };

        log::info!("Loaded {} connection records", records.len());
        Ok(records)
    }
}

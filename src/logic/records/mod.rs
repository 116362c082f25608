//! Records Module
//!
//! Connection-log schema shared by every engine.
//!
//! ## Structure
//! - `types`: ConnectionRecord, Protocol, RecordField, FieldValue
//! - `source`: Record source boundary (JSON loader)

pub mod types;
pub mod source;

pub use types::{ConnectionRecord, Protocol, RecordField, FieldValue};
pub use source::{RecordSource, JsonRecordSource};

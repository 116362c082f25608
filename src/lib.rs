//! Outbound Core - Outbound Traffic Analysis Library
//!
//! Connection records in, filtered/sorted views, CSV exports and
//! engine-generated threat reports out.
//!
//! ## Structure
//! - `logic`: records, filter rules, view pipeline, export, analysis contract
//! - `api`: `Dashboard` facade used by frontends
//! - `config` / `constants`: env-driven settings
//! - `error`: typed errors for rules, sources and analysis

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod logic;

pub use api::Dashboard;
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, AnalysisResult, EngineError, RuleError, SourceError};
pub use logic::analysis::{AnalysisClient, AnalysisReport, AnalysisSession, ReportRequest};
pub use logic::filter::{FilterRule, RuleSet};
pub use logic::records::{ConnectionRecord, JsonRecordSource, Protocol, RecordSource};

/// Install env_logger (RUST_LOG, default "info"). Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
    log::info!("Starting {} v{}", constants::APP_NAME, constants::APP_VERSION);
}

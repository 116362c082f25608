//! Analysis Module
//!
//! Typed contract around the external analysis engine.
//! The engine is opaque: it turns traffic text into a structured report.
//!
//! ## Structure
//! - `types`: ReportRequest, SummaryRequest, AnalysisReport, IpFrequency
//! - `contract`: Request/response validation (all-or-nothing)
//! - `engine`: AnalysisEngine capability + HTTP / function implementations
//! - `client`: validate → dispatch → validate, with timeout
//! - `session`: one in-flight request per session, stale results discarded
//! - `display`: Top-N IP frequency, headline counters, report sections
//!
//! ## Usage
//! ```ignore
//! let client = AnalysisClient::http(&AnalyzerConfig::from_env())?;
//! let session = AnalysisSession::new();
//! let report = session.run(&client, ReportRequest::new(traffic_text)).await?;
//! let chart = top_ip_frequency(&report, 10);
//! ```

pub mod types;
pub mod contract;
pub mod engine;
pub mod client;
pub mod session;
pub mod display;

pub use types::{
    AnalysisReport,
    AnalysisRequest,
    IpFrequency,
    ReportRequest,
    SummaryRequest,
    TrafficSummary,
};

pub use contract::{normalize_report_request, parse_report, parse_summary, validate_request};

pub use engine::{AnalysisEngine, FnEngine, HttpAnalysisEngine};

pub use client::AnalysisClient;

pub use session::{AnalysisSession, AnalysisTicket, SessionSnapshot};

pub use display::{report_sections, summary_stats, top_ip_frequency, ReportSection, SummaryStats};

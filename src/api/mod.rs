//! API Module
//!
//! Structure:
//! - dashboard.rs: `Dashboard`, one per user session. Owns the records,
//!   rules, table state and analysis session.

pub mod dashboard;

pub use dashboard::Dashboard;

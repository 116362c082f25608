//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default analysis engine, only edit this file.

/// Default analysis engine URL
///
/// Fallback when no environment variable is set.
/// For development: http://localhost:3400
pub const DEFAULT_ENGINE_URL: &str = "http://localhost:3400/api/flows";

/// Default timeout for a single analysis request (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Number of IP frequency entries shown in the chart
pub const DEFAULT_TOP_IP_LIMIT: usize = 10;

/// Default filename handed to the export sink
pub const DEFAULT_EXPORT_FILENAME: &str = "outbound_traffic.csv";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "OUTbound Analyzer";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get analysis engine URL from environment or use default
pub fn get_engine_url() -> String {
    std::env::var("OUTBOUND_ENGINE_URL")
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_ENGINE_URL.to_string())
}

/// Get request timeout from environment or use default
pub fn get_request_timeout_secs() -> u64 {
    std::env::var("OUTBOUND_REQUEST_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
}

/// Get top-N IP limit from environment or use default
pub fn get_top_ip_limit() -> usize {
    std::env::var("OUTBOUND_TOP_IP_LIMIT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TOP_IP_LIMIT)
}

/// Get export filename from environment or use default
pub fn get_export_filename() -> String {
    std::env::var("OUTBOUND_EXPORT_FILENAME")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EXPORT_FILENAME.to_string())
}

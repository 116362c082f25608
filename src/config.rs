//! Configuration module

use crate::constants;

/// Analyzer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Base URL of the analysis engine
    pub engine_url: String,

    /// Timeout for one analysis request (seconds)
    pub request_timeout_secs: u64,

    /// How many IP frequency entries are displayed
    pub top_ip_limit: usize,

    /// Filename handed to the export sink
    pub export_filename: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            engine_url: constants::DEFAULT_ENGINE_URL.to_string(),
            request_timeout_secs: constants::DEFAULT_REQUEST_TIMEOUT_SECS,
            top_ip_limit: constants::DEFAULT_TOP_IP_LIMIT,
            export_filename: constants::DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_ok() {
            log::debug!("Loaded .env file");
        }

        Self {
            engine_url: constants::get_engine_url(),
            request_timeout_secs: constants::get_request_timeout_secs(),
            top_ip_limit: constants::get_top_ip_limit(),
            export_filename: constants::get_export_filename(),
        }
    }
}

//! Error handling

use thiserror::Error;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Failure surfaced by the analysis contract
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Request rejected before dispatch
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Engine answered with something that is not a valid report
    #[error("Analysis engine returned a malformed report: {0}")]
    ContractViolation(String),

    /// Engine call failed or timed out
    #[error("{message}")]
    Upstream {
        message: String,
        #[source]
        source: EngineError,
    },

    /// Another analysis is still in flight for this session
    #[error("An analysis is already in progress")]
    Busy,

    /// Response belongs to an abandoned request and was discarded
    #[error("Analysis result discarded: a newer request superseded it")]
    Superseded,
}

impl AnalysisError {
    /// Message used when the engine call itself fails
    pub const UPSTREAM_MESSAGE: &'static str =
        "Failed to analyze traffic data. Please check server logs.";

    pub fn upstream(source: EngineError) -> Self {
        AnalysisError::Upstream {
            message: Self::UPSTREAM_MESSAGE.to_string(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AnalysisError::Validation(_))
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, AnalysisError::ContractViolation(_))
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, AnalysisError::Upstream { .. })
    }
}

/// Transport-level failure of an analysis engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Engine responded with status {0}")]
    Status(u16),

    #[error("Engine did not respond within {0}s")]
    Timeout(u64),

    #[error("Could not decode engine response: {0}")]
    Decode(String),
}

/// Rule construction failure (raw user input)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("Value is required")]
    EmptyValue,

    #[error("Field {field} expects a number, got {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("Unknown filter field: {0}")]
    UnknownField(String),

    #[error("Unknown filter operator: {0}")]
    UnknownOperator(String),
}

/// Record source failure
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read records: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse records: {0}")]
    Parse(#[from] serde_json::Error),
}

//! Analysis Client
//!
//! validate request → dispatch (with timeout) → validate response.
//! No retries: retry policy belongs to the caller.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;

use super::contract;
use super::engine::{AnalysisEngine, HttpAnalysisEngine};
use super::types::*;
use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, AnalysisResult, EngineError};

#[derive(Clone)]
pub struct AnalysisClient {
    engine: Arc<dyn AnalysisEngine>,
    timeout: Duration,
}

impl AnalysisClient {
    pub fn new(engine: Arc<dyn AnalysisEngine>, config: &AnalyzerConfig) -> Self {
        Self {
            engine,
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// Client talking to the configured HTTP engine
    pub fn http(config: &AnalyzerConfig) -> Result<Self, EngineError> {
        let engine = HttpAnalysisEngine::new(config)?;
        Ok(Self::new(Arc::new(engine), config))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full traffic report
    pub async fn generate_report(&self, request: ReportRequest) -> AnalysisResult<AnalysisReport> {
        let request = AnalysisRequest::Report(contract::normalize_report_request(request));
        let value = self.dispatch(&request).await?;
        let report = contract::parse_report(value).map_err(|e| {
            log::error!("Rejected analysis report: {}", e);
            e
        })?;

        log::info!(
            "Analysis complete: threats={:?} anomalies={:?} ip_frequency_entries={}",
            report.threat_count,
            report.anomaly_count,
            report.ip_frequency.as_ref().map_or(0, |v| v.len())
        );
        Ok(report)
    }

    /// Short summary of the traffic
    pub async fn summarize(&self, request: SummaryRequest) -> AnalysisResult<TrafficSummary> {
        let request = AnalysisRequest::Summary(request);
        let value = self.dispatch(&request).await?;
        contract::parse_summary(value).map_err(|e| {
            log::error!("Rejected traffic summary: {}", e);
            e
        })
    }

    async fn dispatch(&self, request: &AnalysisRequest) -> AnalysisResult<Value> {
        contract::validate_request(request)?;

        log::info!(
            "Dispatching {} request ({} bytes of traffic data)",
            request.flow(),
            request.traffic_data().len()
        );
        let started = Instant::now();

        let outcome = match tokio::time::timeout(self.timeout, self.engine.analyze(request)).await {
            Ok(result) => result,
            Err(_) => Err(EngineError::Timeout(self.timeout.as_secs())),
        };

        match outcome {
            Ok(value) => {
                log::debug!("Engine answered in {} ms", started.elapsed().as_millis());
                Ok(value)
            }
            Err(e) => {
                log::error!("Error analyzing traffic data: {}", e);
                Err(AnalysisError::upstream(e))
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

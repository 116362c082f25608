//! Analysis Engine Boundary
//!
//! The engine is an opaque capability: request in, untrusted JSON out.
//! Validation happens in `contract.rs`, never here.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::types::AnalysisRequest;
use crate::config::AnalyzerConfig;
use crate::error::EngineError;

/// External analysis capability
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, EngineError>;
}

// ============================================================================
// FUNCTION ENGINE
// ============================================================================

/// Engine backed by a plain function. Deterministic, no network.
pub struct FnEngine<F>(pub F);

impl<F> FnEngine<F>
where
    F: Fn(&AnalysisRequest) -> Result<Value, EngineError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> AnalysisEngine for FnEngine<F>
where
    F: Fn(&AnalysisRequest) -> Result<Value, EngineError> + Send + Sync,
{
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, EngineError> {
        (self.0)(request)
    }
}

// ============================================================================
// HTTP ENGINE
// ============================================================================

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Engine reached over HTTP: `POST {engine_url}/{flow}` with the request as JSON.
/// No request timeout here: `AnalysisClient` owns the deadline.
pub struct HttpAnalysisEngine {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpAnalysisEngine {
    pub fn new(config: &AnalyzerConfig) -> Result<Self, EngineError> {
        Self::with_builder(config, Self::client_builder())
    }

    /// Builder with the engine's connection settings, for callers that need
    /// extra options (proxies, TLS roots)
    pub fn client_builder() -> reqwest::ClientBuilder {
        reqwest::Client::builder().connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
    }

    pub fn with_builder(config: &AnalyzerConfig, builder: reqwest::ClientBuilder) -> Result<Self, EngineError> {
        let http_client = builder
            .build()
            .map_err(|e| EngineError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.engine_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn url_for(&self, request: &AnalysisRequest) -> String {
        format!("{}/{}", self.base_url, request.flow())
    }
}

#[async_trait]
impl AnalysisEngine for HttpAnalysisEngine {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, EngineError> {
        let url = self.url_for(request);
        log::debug!("POST {} ({} bytes of traffic data)", url, request.traffic_data().len());

        let response = self.http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| EngineError::Network(e.to_string()))?;

        if response.status().is_success() {
            response.json().await
                .map_err(|e| EngineError::Decode(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            log::error!("Analysis engine failed ({}): {}", status, error_text);
            Err(EngineError::Status(status))
        }
    }
}

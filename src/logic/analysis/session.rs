//! Analysis Session
//!
//! At most one analysis in flight per session. Each request gets a generation
//! number; a response whose generation is no longer current is discarded.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

use super::client::AnalysisClient;
use super::contract;
use super::types::{AnalysisReport, AnalysisRequest, ReportRequest};
use crate::error::{AnalysisError, AnalysisResult};

/// Proof that a request was admitted. Consumed by `complete`.
#[derive(Debug)]
pub struct AnalysisTicket {
    generation: u64,
    started_at: DateTime<Utc>,
}

impl AnalysisTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

/// What a view renders
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub analyzing: bool,
    pub generation: u64,
    pub report: Option<AnalysisReport>,
    pub error: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct SessionState {
    generation: u64,
    in_flight: Option<u64>,
    report: Option<AnalysisReport>,
    error: Option<String>,
    completed_at: Option<DateTime<Utc>>,
}

/// Releases the in-flight slot when `run` is dropped before it completes
struct InFlightGuard<'a> {
    session: &'a AnalysisSession,
    generation: u64,
    armed: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.session.release(self.generation);
        }
    }
}

#[derive(Debug, Default)]
pub struct AnalysisSession {
    state: Mutex<SessionState>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a new request. Fails with `Busy` while another one is unresolved.
    /// Clears the previous report and error.
    pub fn begin(&self) -> AnalysisResult<AnalysisTicket> {
        let mut state = self.state.lock();
        if state.in_flight.is_some() {
            return Err(AnalysisError::Busy);
        }

        state.generation += 1;
        state.in_flight = Some(state.generation);
        state.report = None;
        state.error = None;

        log::debug!("Analysis generation {} started", state.generation);
        Ok(AnalysisTicket {
            generation: state.generation,
            started_at: Utc::now(),
        })
    }

    /// Stop waiting for the in-flight request. Its response will be discarded.
    pub fn abandon(&self) {
        let mut state = self.state.lock();
        if let Some(generation) = state.in_flight.take() {
            state.generation += 1;
            log::info!("Analysis generation {} abandoned", generation);
        }
    }

    /// Like `abandon`, but only if `generation` is still the in-flight one
    fn release(&self, generation: u64) {
        let mut state = self.state.lock();
        if state.in_flight == Some(generation) {
            state.in_flight = None;
            state.generation += 1;
            log::info!("Analysis generation {} dropped before completion", generation);
        }
    }

    /// Record the outcome of an admitted request.
    /// Stale tickets are dropped and reported as `Superseded`.
    pub fn complete(
        &self,
        ticket: AnalysisTicket,
        result: AnalysisResult<AnalysisReport>,
    ) -> AnalysisResult<AnalysisReport> {
        let mut state = self.state.lock();
        if state.in_flight != Some(ticket.generation) {
            log::warn!(
                "Discarding stale analysis result (generation {}, current {})",
                ticket.generation,
                state.generation
            );
            return Err(AnalysisError::Superseded);
        }

        state.in_flight = None;
        state.completed_at = Some(Utc::now());
        match &result {
            Ok(report) => {
                state.report = Some(report.clone());
                state.error = None;
            }
            Err(e) => {
                state.report = None;
                state.error = Some(e.to_string());
            }
        }

        let elapsed = Utc::now().signed_duration_since(ticket.started_at);
        log::info!(
            "Analysis generation {} finished in {} ms (ok={})",
            ticket.generation,
            elapsed.num_milliseconds(),
            result.is_ok()
        );
        result
    }

    /// Validate, admit, run and record one report request
    pub async fn run(&self, client: &AnalysisClient, request: ReportRequest) -> AnalysisResult<AnalysisReport> {
        contract::validate_request(&AnalysisRequest::Report(request.clone()))?;

        let ticket = self.begin()?;
        let mut guard = InFlightGuard {
            session: self,
            generation: ticket.generation,
            armed: true,
        };
        let result = client.generate_report(request).await;
        guard.armed = false;
        self.complete(ticket, result)
    }

    pub fn is_analyzing(&self) -> bool {
        self.state.lock().in_flight.is_some()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock();
        SessionSnapshot {
            analyzing: state.in_flight.is_some(),
            generation: state.generation,
            report: state.report.clone(),
            error: state.error.clone(),
            completed_at: state.completed_at,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! Analysis Types
//!
//! Request and response shapes exchanged with the analysis engine.
//! KHÔNG chứa logic validate - xem `contract.rs`.

use serde::{Deserialize, Serialize};

use crate::logic::export;
use crate::logic::records::ConnectionRecord;

// ============================================================================
// REQUESTS
// ============================================================================

/// Full report request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// Textual rendering of the traffic, forwarded untouched
    pub traffic_data: String,
    /// Optional free-text context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<String>,
    /// Comma-separated trusted domains
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitelisted_domains: Option<String>,
}

impl ReportRequest {
    pub fn new(traffic_data: impl Into<String>) -> Self {
        Self {
            traffic_data: traffic_data.into(),
            filters: None,
            whitelisted_domains: None,
        }
    }

    /// Use the CSV rendering of a record view as traffic data
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ConnectionRecord>,
    {
        Self::new(export::export_csv(records).unwrap_or_default())
    }

    pub fn with_filters(mut self, filters: impl Into<String>) -> Self {
        self.filters = Some(filters.into());
        self
    }

    pub fn with_whitelist(mut self, domains: impl Into<String>) -> Self {
        self.whitelisted_domains = Some(domains.into());
        self
    }

    /// Whitelist as a list: trimmed, lower-cased, empties dropped
    pub fn whitelist(&self) -> Vec<String> {
        self.whitelisted_domains
            .as_deref()
            .map(|list| {
                list.split(',')
                    .map(|d| d.trim().to_lowercase())
                    .filter(|d| !d.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Short summary request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub traffic_data: String,
}

impl SummaryRequest {
    pub fn new(traffic_data: impl Into<String>) -> Self {
        Self {
            traffic_data: traffic_data.into(),
        }
    }
}

/// Anything the engine can be asked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnalysisRequest {
    Report(ReportRequest),
    Summary(SummaryRequest),
}

impl AnalysisRequest {
    pub fn traffic_data(&self) -> &str {
        match self {
            AnalysisRequest::Report(r) => &r.traffic_data,
            AnalysisRequest::Summary(r) => &r.traffic_data,
        }
    }

    /// Engine flow name
    pub fn flow(&self) -> &'static str {
        match self {
            AnalysisRequest::Report(_) => "generate-report",
            AnalysisRequest::Summary(_) => "summarize",
        }
    }
}

// ============================================================================
// RESPONSES
// ============================================================================

/// Connection count for one destination IP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpFrequency {
    pub ip: String,
    pub count: u64,
}

impl IpFrequency {
    pub fn new(ip: impl Into<String>, count: u64) -> Self {
        Self { ip: ip.into(), count }
    }
}

/// Structured report. Optional fields are `None` when the engine could not
/// determine them from the supplied data (not zero / empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub summary: String,
    pub potential_threats: String,
    pub anomalies: String,
    pub outbound_src_to_remote: String,
    pub recommendations: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections_to_whitelisted_domains: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections_to_non_whitelisted_domains: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_requests_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_handshake_analysis: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_frequency: Option<Vec<IpFrequency>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub significant_outbound_connections_count: Option<u64>,
}

/// Short summary response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficSummary {
    pub summary: String,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::records::Protocol;

    #[test]
    fn test_request_wire_format() {
        let request = ReportRequest::new("10.0.0.1 -> 8.8.8.8 UDP 53").with_whitelist("google.com");
        let json = serde_json::to_value(AnalysisRequest::Report(request)).unwrap();
        assert_eq!(json["trafficData"], "10.0.0.1 -> 8.8.8.8 UDP 53");
        assert_eq!(json["whitelistedDomains"], "google.com");
        assert!(json.get("filters").is_none());
    }

    #[test]
    fn test_whitelist_parsing() {
        let request = ReportRequest::new("x").with_whitelist(" Google.com, ,example.com ,");
        assert_eq!(request.whitelist(), vec!["google.com", "example.com"]);
        assert!(ReportRequest::new("x").whitelist().is_empty());
    }

    #[test]
    fn test_from_records_uses_csv() {
        let records = vec![
            ConnectionRecord::new("1", "2024-05-01T10:00:00Z", "10.0.0.1", "8.8.8.8", 53, Protocol::Udp, 74),
        ];
        let request = ReportRequest::from_records(&records);
        assert!(request.traffic_data.starts_with("id,timestamp,"));
        assert!(request.traffic_data.contains("8.8.8.8"));

        let empty: Vec<ConnectionRecord> = Vec::new();
        assert!(ReportRequest::from_records(&empty).traffic_data.is_empty());
    }

    #[test]
    fn test_flow_names() {
        assert_eq!(AnalysisRequest::Report(ReportRequest::new("x")).flow(), "generate-report");
        assert_eq!(AnalysisRequest::Summary(SummaryRequest::new("x")).flow(), "summarize");
    }
}

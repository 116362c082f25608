//! Analysis Contract
//!
//! Validation at the engine boundary: requests before dispatch,
//! responses before anything reaches the caller. All-or-nothing.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::types::*;
use crate::error::{AnalysisError, AnalysisResult};

/// Required non-empty text fields of a full report
pub const REQUIRED_REPORT_FIELDS: [&str; 5] = [
    "summary",
    "potentialThreats",
    "anomalies",
    "outboundSrcToRemote",
    "recommendations",
];

const REQUIRED_SUMMARY_FIELDS: [&str; 1] = ["summary"];

// ============================================================================
// REQUEST
// ============================================================================

/// Reject requests without traffic data (whitespace-only counts as empty)
pub fn validate_request(request: &AnalysisRequest) -> AnalysisResult<()> {
    if request.traffic_data().trim().is_empty() {
        return Err(AnalysisError::Validation(
            "trafficData is required and must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Blank optional context becomes absent. Traffic data is left as is.
pub fn normalize_report_request(mut request: ReportRequest) -> ReportRequest {
    request.filters = non_blank(request.filters);
    request.whitelisted_domains = non_blank(request.whitelisted_domains);
    request
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// ============================================================================
// RESPONSE
// ============================================================================

/// Validate and decode a full report
pub fn parse_report(value: Value) -> AnalysisResult<AnalysisReport> {
    parse_validated(value, &REQUIRED_REPORT_FIELDS)
}

/// Validate and decode a short summary
pub fn parse_summary(value: Value) -> AnalysisResult<TrafficSummary> {
    parse_validated(value, &REQUIRED_SUMMARY_FIELDS)
}

fn parse_validated<T: DeserializeOwned>(value: Value, required: &[&str]) -> AnalysisResult<T> {
    let object = value.as_object().ok_or_else(|| {
        AnalysisError::ContractViolation(format!("expected a JSON object, got {}", kind_of(&value)))
    })?;

    for field in required {
        require_text(object, field)?;
    }

    // Typed decode covers optional strings, counts (non-negative integers)
    // and ipFrequency entries.
    serde_json::from_value(value).map_err(|e| AnalysisError::ContractViolation(e.to_string()))
}

fn require_text(object: &Map<String, Value>, field: &str) -> AnalysisResult<()> {
    match object.get(field) {
        None | Some(Value::Null) => Err(AnalysisError::ContractViolation(format!(
            "missing required field `{}`",
            field
        ))),
        Some(Value::String(s)) if s.trim().is_empty() => Err(AnalysisError::ContractViolation(
            format!("required field `{}` is empty", field),
        )),
        Some(Value::String(_)) => Ok(()),
        Some(other) => Err(AnalysisError::ContractViolation(format!(
            "field `{}` must be a string, got {}",
            field,
            kind_of(other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_report() -> Value {
        json!({
            "summary": "Mostly DNS and HTTPS traffic.",
            "potentialThreats": "Beaconing to 203.0.113.9 every 60s.",
            "anomalies": "Large upload on port 8443.",
            "outboundSrcToRemote": "192.168.1.10 -> 142.250.72.14 TCP/443",
            "recommendations": "Block 203.0.113.9.",
            "connectionsToWhitelistedDomains": "google.com (Chrome)",
            "ipFrequency": [{"ip": "8.8.8.8", "count": 5}, {"ip": "1.1.1.1", "count": 42}],
            "threatCount": 1,
            "anomalyCount": 2
        })
    }

    #[test]
    fn test_empty_traffic_rejected() {
        let request = AnalysisRequest::Report(ReportRequest::new(""));
        assert!(validate_request(&request).unwrap_err().is_validation());

        let request = AnalysisRequest::Summary(SummaryRequest::new(" \n\t"));
        assert!(validate_request(&request).unwrap_err().is_validation());

        let request = AnalysisRequest::Report(ReportRequest::new("tcp 10.0.0.1:5000 > 1.1.1.1:443"));
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn test_normalize_blank_context() {
        let request = ReportRequest::new("  data  ")
            .with_filters("   ")
            .with_whitelist(" google.com ");
        let normalized = normalize_report_request(request);
        assert_eq!(normalized.traffic_data, "  data  ");
        assert!(normalized.filters.is_none());
        assert_eq!(normalized.whitelisted_domains.as_deref(), Some("google.com"));
    }

    #[test]
    fn test_valid_report() {
        let report = parse_report(valid_report()).unwrap();
        assert_eq!(report.threat_count, Some(1));
        assert_eq!(report.significant_outbound_connections_count, None);
        assert_eq!(report.ip_frequency.as_ref().map(|v| v.len()), Some(2));
        assert!(report.tcp_handshake_analysis.is_none());
    }

    #[test]
    fn test_missing_summary_is_violation() {
        let mut value = valid_report();
        value.as_object_mut().unwrap().remove("summary");
        let err = parse_report(value).unwrap_err();
        assert!(err.is_contract_violation());
        assert!(err.to_string().contains("summary"));
    }

    #[test]
    fn test_empty_required_field_is_violation() {
        let mut value = valid_report();
        value["recommendations"] = json!("  ");
        assert!(parse_report(value).unwrap_err().is_contract_violation());
    }

    #[test]
    fn test_wrong_types_are_violations() {
        let mut value = valid_report();
        value["anomalies"] = json!(["a", "b"]);
        assert!(parse_report(value).unwrap_err().is_contract_violation());

        let mut value = valid_report();
        value["threatCount"] = json!(-1);
        assert!(parse_report(value).unwrap_err().is_contract_violation());

        let mut value = valid_report();
        value["ipFrequency"] = json!([{"ip": "8.8.8.8", "count": "many"}]);
        assert!(parse_report(value).unwrap_err().is_contract_violation());

        let mut value = valid_report();
        value["httpRequestsSummary"] = json!(12);
        assert!(parse_report(value).unwrap_err().is_contract_violation());

        assert!(parse_report(json!("just text")).unwrap_err().is_contract_violation());
    }

    #[test]
    fn test_null_optional_is_absent() {
        let mut value = valid_report();
        value["tcpHandshakeAnalysis"] = Value::Null;
        value["anomalyCount"] = Value::Null;
        let report = parse_report(value).unwrap();
        assert!(report.tcp_handshake_analysis.is_none());
        assert!(report.anomaly_count.is_none());
    }

    #[test]
    fn test_parse_summary() {
        let summary = parse_summary(json!({"summary": "Quiet network."})).unwrap();
        assert_eq!(summary.summary, "Quiet network.");
        assert!(parse_summary(json!({})).unwrap_err().is_contract_violation());
    }
}

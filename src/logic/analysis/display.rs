//! Report Display Helpers
//!
//! Read-only transforms of a validated report for charts and cards.
//! The stored report is never modified.

use serde::Serialize;

use super::types::{AnalysisReport, IpFrequency};

/// Top destinations by connection count, highest first.
/// Ties keep the engine's order.
pub fn top_ip_frequency(report: &AnalysisReport, limit: usize) -> Vec<IpFrequency> {
    let mut entries: Vec<IpFrequency> = match &report.ip_frequency {
        Some(entries) => entries.clone(),
        None => return Vec::new(),
    };
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(limit);
    entries
}

/// Headline counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub threat_count: Option<u64>,
    pub anomaly_count: Option<u64>,
    pub significant_outbound_connections_count: Option<u64>,
}

/// `None` when the report carries none of the counters
pub fn summary_stats(report: &AnalysisReport) -> Option<SummaryStats> {
    let stats = SummaryStats {
        threat_count: report.threat_count,
        anomaly_count: report.anomaly_count,
        significant_outbound_connections_count: report.significant_outbound_connections_count,
    };

    if stats.threat_count.is_none()
        && stats.anomaly_count.is_none()
        && stats.significant_outbound_connections_count.is_none()
    {
        None
    } else {
        Some(stats)
    }
}

/// One titled block of report text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection<'a> {
    pub title: &'static str,
    pub body: &'a str,
}

fn optional<'a>(title: &'static str, body: &'a Option<String>) -> Option<ReportSection<'a>> {
    body.as_deref().map(|body| ReportSection { title, body })
}

/// Report text in display order. Optional sections only when present.
pub fn report_sections(report: &AnalysisReport) -> Vec<ReportSection<'_>> {
    let mut sections = vec![
        ReportSection { title: "Summary", body: &report.summary },
        ReportSection { title: "Potential Threats", body: &report.potential_threats },
        ReportSection { title: "Anomalies Detected", body: &report.anomalies },
        ReportSection { title: "Outbound Traffic (Source to Remote)", body: &report.outbound_src_to_remote },
    ];
    sections.extend(
        [
            optional("Connections to Whitelisted Domains", &report.connections_to_whitelisted_domains),
            optional("Connections to Non-Whitelisted Domains", &report.connections_to_non_whitelisted_domains),
            optional("HTTP Requests", &report.http_requests_summary),
            optional("TCP Handshake Analysis", &report.tcp_handshake_analysis),
        ]
        .into_iter()
        .flatten(),
    );
    sections.push(ReportSection { title: "Recommendations", body: &report.recommendations });
    sections
}

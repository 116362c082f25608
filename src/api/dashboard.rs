//! Dashboard - per-session facade for frontends
//!
//! Holds the immutable record collection, the user's rules and table state,
//! the whitelist input and the analysis session.

use crate::config::AnalyzerConfig;
use crate::error::{AnalysisResult, RuleError, SourceError};
use crate::logic::analysis::{
    self, AnalysisClient, AnalysisReport, AnalysisSession, IpFrequency, ReportRequest, SessionSnapshot,
};
use crate::logic::export::{self, ExportFormat, ExportSink};
use crate::logic::filter::{self, FilterRule, RuleSet};
use crate::logic::records::{ConnectionRecord, RecordField, RecordSource};
use crate::logic::view::{self, ViewQuery};

pub struct Dashboard {
    records: Box<[ConnectionRecord]>,
    rules: RuleSet,
    query: ViewQuery,
    whitelist: String,
    session: AnalysisSession,
    config: AnalyzerConfig,
}

impl Dashboard {
    pub fn new(records: Vec<ConnectionRecord>, config: AnalyzerConfig) -> Self {
        Self {
            records: records.into_boxed_slice(),
            rules: RuleSet::new(),
            query: ViewQuery::default(),
            whitelist: String::new(),
            session: AnalysisSession::new(),
            config,
        }
    }

    pub fn from_source<S: RecordSource>(source: &S, config: AnalyzerConfig) -> Result<Self, SourceError> {
        Ok(Self::new(source.load()?, config))
    }

    pub fn records(&self) -> &[ConnectionRecord] {
        &self.records
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Rules
    // ------------------------------------------------------------------------

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Add a rule from raw form input, returns its id
    pub fn add_rule(&mut self, field: &str, operator: &str, value: &str) -> Result<String, RuleError> {
        let rule = FilterRule::from_input(field, operator, value)?;
        Ok(self.rules.add(rule))
    }

    pub fn insert_rule(&mut self, rule: FilterRule) -> String {
        self.rules.add(rule)
    }

    pub fn toggle_rule(&mut self, id: &str) -> Option<bool> {
        self.rules.toggle(id)
    }

    pub fn remove_rule(&mut self, id: &str) -> Option<FilterRule> {
        self.rules.remove(id)
    }

    // ------------------------------------------------------------------------
    // Table
    // ------------------------------------------------------------------------

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
    }

    pub fn request_sort(&mut self, key: RecordField) {
        self.query.sort.request(key);
    }

    /// Rows currently displayed: filtered, searched, sorted
    pub fn rows(&self) -> Vec<&ConnectionRecord> {
        view::run(&self.records, self.rules.as_slice(), &self.query)
    }

    /// CSV of the displayed rows, `None` when there are none
    pub fn export_csv(&self) -> Option<String> {
        export::export_csv(self.rows())
    }

    /// Hand the displayed rows to a sink under the configured filename
    pub fn export_to(&self, sink: &mut dyn ExportSink) -> std::io::Result<bool> {
        export::export_to(sink, &self.config.export_filename, self.rows(), ExportFormat::Csv)
    }

    // ------------------------------------------------------------------------
    // Analysis
    // ------------------------------------------------------------------------

    pub fn set_whitelist(&mut self, domains: impl Into<String>) {
        self.whitelist = domains.into();
    }

    /// Request for some traffic text, with whitelist and enabled rules as context
    pub fn analysis_request(&self, traffic_data: impl Into<String>) -> ReportRequest {
        let mut request = ReportRequest::new(traffic_data);
        request.whitelisted_domains = Some(self.whitelist.clone());
        request.filters = filter::describe_rules(self.rules.as_slice());
        analysis::normalize_report_request(request)
    }

    /// Analyze uploaded traffic text
    pub async fn analyze(&self, client: &AnalysisClient, traffic_data: impl Into<String>) -> AnalysisResult<AnalysisReport> {
        let request = self.analysis_request(traffic_data);
        self.session.run(client, request).await
    }

    /// Analyze the rows currently displayed (rendered as CSV)
    pub async fn analyze_view(&self, client: &AnalysisClient) -> AnalysisResult<AnalysisReport> {
        let traffic = export::export_csv(self.rows()).unwrap_or_default();
        self.analyze(client, traffic).await
    }

    /// Stop waiting for the in-flight analysis
    pub fn abandon_analysis(&self) {
        self.session.abandon();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Chart data for the last report
    pub fn top_ips(&self) -> Vec<IpFrequency> {
        self.session
            .snapshot()
            .report
            .map(|report| analysis::top_ip_frequency(&report, self.config.top_ip_limit))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::analysis::FnEngine;
    use crate::logic::export::MemorySink;
    use crate::logic::records::Protocol;
    use crate::logic::view::SortDirection;
    use parking_lot::Mutex;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn dashboard() -> Dashboard {
        Dashboard::new(
            vec![
                ConnectionRecord::new("1", "2024-05-01T10:00:00Z", "192.168.1.10", "8.8.8.8", 53, Protocol::Udp, 74),
                ConnectionRecord::new("2", "2024-05-01T10:00:01Z", "192.168.1.10", "142.250.72.14", 443, Protocol::Tcp, 1500),
                ConnectionRecord::new("3", "2024-05-01T10:00:02Z", "192.168.1.11", "8.8.8.8", 443, Protocol::Tcp, 600),
            ],
            AnalyzerConfig::default(),
        )
    }

    #[test]
    fn test_rules_drive_rows() {
        let mut dash = dashboard();
        let id = dash.add_rule("destinationIp", "equals", "8.8.8.8").unwrap();
        dash.request_sort(RecordField::Size);
        assert_eq!(dash.query().sort.direction, SortDirection::Ascending);

        let ids: Vec<&str> = dash.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        dash.toggle_rule(&id);
        assert_eq!(dash.rows().len(), 3);

        assert!(dash.add_rule("size", "greaterThan", "big").is_err());
    }

    #[test]
    fn test_records_kept_in_load_order() {
        let dash = dashboard();
        let ids: Vec<&str> = dash.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_export_displayed_rows() {
        let mut dash = dashboard();
        dash.set_search("142.250");
        let mut sink = MemorySink::default();
        assert!(dash.export_to(&mut sink).unwrap());
        assert_eq!(sink.files[0].0, "outbound_traffic.csv");

        dash.set_search("no-such-host");
        assert!(dash.export_csv().is_none());
        assert!(!dash.export_to(&mut sink).unwrap());
        assert_eq!(sink.files.len(), 1);
    }

    #[test]
    fn test_analysis_request_context() {
        let mut dash = dashboard();
        assert!(dash.analysis_request("x").whitelisted_domains.is_none());
        assert!(dash.analysis_request("x").filters.is_none());

        dash.set_whitelist("google.com, example.com");
        dash.add_rule("protocol", "equals", "TCP").unwrap();
        let request = dash.analysis_request("x");
        assert_eq!(request.whitelist(), vec!["google.com", "example.com"]);
        assert_eq!(request.filters.as_deref(), Some("Only records where protocol equals \"TCP\""));
    }

    #[tokio::test]
    async fn test_analyze_view_populates_snapshot() {
        let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        let captured = seen.clone();
        let client = AnalysisClient::new(
            Arc::new(FnEngine::new(move |request: &analysis::AnalysisRequest| -> Result<Value, crate::error::EngineError> {
                *captured.lock() = Some(request.traffic_data().to_string());
                Ok(json!({
                    "summary": "Two destinations.",
                    "potentialThreats": "None.",
                    "anomalies": "None.",
                    "outboundSrcToRemote": "192.168.1.10 -> 8.8.8.8 UDP/53",
                    "recommendations": "None.",
                    "ipFrequency": [{"ip": "142.250.72.14", "count": 1}, {"ip": "8.8.8.8", "count": 2}]
                }))
            })),
            &AnalyzerConfig::default(),
        );

        let mut dash = dashboard();
        dash.add_rule("size", "lessThan", "1000").unwrap();
        dash.analyze_view(&client).await.unwrap();

        let traffic = seen.lock().clone().unwrap();
        assert_eq!(traffic.lines().count(), 3); // header + 2 rows under 1000 bytes

        let snapshot = dash.snapshot();
        assert!(!snapshot.analyzing);
        assert_eq!(snapshot.report.unwrap().summary, "Two destinations.");
        assert_eq!(dash.top_ips()[0], IpFrequency::new("8.8.8.8", 2));
    }

    #[tokio::test]
    async fn test_analyze_empty_upload_rejected() {
        let client = AnalysisClient::new(
            Arc::new(FnEngine::new(|_: &analysis::AnalysisRequest| Ok(json!({})))),
            &AnalyzerConfig::default(),
        );
        let err = dashboard().analyze(&client, "").await.unwrap_err();
        assert!(err.is_validation());
    }
}

//! Filter Engine
//!
//! CHỈ chứa logic evaluate - không có types definitions.
//! Input: records + rules
//! Output: records matching every enabled rule

use crate::logic::records::{ConnectionRecord, FieldValue, RecordField};
use super::types::*;

// ============================================================================
// PREDICATE
// ============================================================================

/// Compiled form of a rule operator. Text needles are already lower-cased;
/// ordering bounds are `None` when the rule value is not a number.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Equals(String),
    Contains(String),
    StartsWith(String),
    EndsWith(String),
    GreaterThan(Option<f64>),
    LessThan(Option<f64>),
}

impl Predicate {
    fn from_rule(operator: RuleOperator, value: &RuleValue) -> Self {
        let needle = || value.to_text().to_lowercase();
        match operator {
            RuleOperator::Equals => Predicate::Equals(needle()),
            RuleOperator::Contains => Predicate::Contains(needle()),
            RuleOperator::StartsWith => Predicate::StartsWith(needle()),
            RuleOperator::EndsWith => Predicate::EndsWith(needle()),
            RuleOperator::GreaterThan => Predicate::GreaterThan(value.as_number()),
            RuleOperator::LessThan => Predicate::LessThan(value.as_number()),
        }
    }

    /// Evaluate against a resolved value. Missing values never match.
    pub fn test(&self, value: FieldValue<'_>) -> bool {
        let text = match value.to_text() {
            Some(text) => text.to_lowercase(),
            None => return false,
        };

        match self {
            Predicate::Equals(needle) => text == *needle,
            Predicate::Contains(needle) => text.contains(needle.as_str()),
            Predicate::StartsWith(needle) => text.starts_with(needle.as_str()),
            Predicate::EndsWith(needle) => text.ends_with(needle.as_str()),
            Predicate::GreaterThan(bound) => match (value.as_number(), bound) {
                (Some(actual), Some(bound)) => actual > *bound,
                _ => false,
            },
            Predicate::LessThan(bound) => match (value.as_number(), bound) {
                (Some(actual), Some(bound)) => actual < *bound,
                _ => false,
            },
        }
    }
}

// ============================================================================
// COMPILED RULE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRule {
    pub field: RecordField,
    pub predicate: Predicate,
}

impl CompiledRule {
    /// `None` for disabled rules
    pub fn compile(rule: &FilterRule) -> Option<Self> {
        if !rule.is_enabled {
            return None;
        }

        if rule.operator.is_ordering() && (!rule.field.is_numeric() || rule.value.as_number().is_none()) {
            log::debug!(
                "Rule {} ({} {} {:?}) compares non-numeric values - excludes every record",
                rule.id, rule.field, rule.operator, rule.value
            );
        }

        Some(Self {
            field: rule.field.record_field(),
            predicate: Predicate::from_rule(rule.operator, &rule.value),
        })
    }

    pub fn matches(&self, record: &ConnectionRecord) -> bool {
        self.predicate.test(record.get(self.field))
    }
}

/// Compile the enabled subset of a rule list
pub fn compile_rules(rules: &[FilterRule]) -> Vec<CompiledRule> {
    rules.iter().filter_map(CompiledRule::compile).collect()
}

// ============================================================================
// APPLY
// ============================================================================

/// Does the record satisfy every enabled rule?
pub fn matches_all(record: &ConnectionRecord, rules: &[CompiledRule]) -> bool {
    rules.iter().all(|rule| rule.matches(record))
}

/// Keep the records matching every enabled rule, in input order.
/// No enabled rule means every record passes.
pub fn apply<'a>(records: &'a [ConnectionRecord], rules: &[FilterRule]) -> Vec<&'a ConnectionRecord> {
    let compiled = compile_rules(rules);
    if compiled.is_empty() {
        return records.iter().collect();
    }

    let kept: Vec<&ConnectionRecord> = records
        .iter()
        .filter(|record| matches_all(record, &compiled))
        .collect();

    log::debug!(
        "Filter: {} of {} records kept by {} enabled rules",
        kept.len(),
        records.len(),
        compiled.len()
    );
    kept
}

// ============================================================================
// DESCRIBE
// ============================================================================

/// Human-readable form of one rule: `destinationIp equals "8.8.8.8"`
pub fn describe(rule: &FilterRule) -> String {
    let value = match &rule.value {
        RuleValue::Number(_) => rule.value.to_text(),
        RuleValue::Text(s) => format!("{:?}", s),
    };
    format!("{} {} {}", rule.field, rule.operator, value)
}

/// Enabled rules joined with AND, `None` when nothing is enabled.
/// Used as the `filters` context of an analysis request.
pub fn describe_rules(rules: &[FilterRule]) -> Option<String> {
    let parts: Vec<String> = rules
        .iter()
        .filter(|rule| rule.is_enabled)
        .map(describe)
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(format!("Only records where {}", parts.join(" AND ")))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::records::Protocol;

    fn records() -> Vec<ConnectionRecord> {
        vec![
            ConnectionRecord::new("1", "2024-05-01T10:00:00Z", "192.168.1.10", "142.250.72.14", 443, Protocol::Tcp, 1500)
                .with_summary("TLS ClientHello google.com"),
            ConnectionRecord::new("2", "2024-05-01T10:00:01Z", "192.168.1.10", "8.8.8.8", 53, Protocol::Udp, 74)
                .with_summary("DNS A? example.com"),
            ConnectionRecord::new("3", "2024-05-01T10:00:02Z", "192.168.1.22", "8.8.4.4", 53, Protocol::Udp, 80)
                .with_summary("DNS AAAA? example.org"),
            ConnectionRecord::new("4", "2024-05-01T10:00:03Z", "192.168.1.22", "10.0.0.1", 0, Protocol::Icmp, 64),
            ConnectionRecord::new("5", "2024-05-01T10:00:04Z", "192.168.1.30", "8.8.8.8", 443, Protocol::Tcp, 9000)
                .with_summary("HTTP/2 POST /upload"),
        ]
    }

    fn ids(kept: &[&ConnectionRecord]) -> Vec<String> {
        kept.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_no_rules_is_identity() {
        let data = records();
        let kept = apply(&data, &[]);
        assert_eq!(kept.len(), data.len());
    }

    #[test]
    fn test_disabled_rules_are_identity() {
        let data = records();
        let rules = vec![
            FilterRule::new(RuleField::Protocol, RuleOperator::Equals, "ICMP").disabled(),
            FilterRule::new(RuleField::Size, RuleOperator::GreaterThan, 1e9).disabled(),
        ];
        let kept = apply(&data, &rules);
        assert!(kept.iter().zip(data.iter()).all(|(a, b)| *a == b));
        assert_eq!(kept.len(), data.len());
    }

    #[test]
    fn test_port_equals_number() {
        let data = records();
        let rules = vec![FilterRule::new(RuleField::DestinationPort, RuleOperator::Equals, 443u32)];
        let kept = apply(&data, &rules);
        assert_eq!(ids(&kept), vec!["1", "5"]);
        assert!(kept.iter().all(|r| r.destination_port == 443));
    }

    #[test]
    fn test_disabled_rule_ignored_in_scenario() {
        let data = records();
        let rules = vec![
            FilterRule::new(RuleField::DestinationIp, RuleOperator::Equals, "8.8.8.8"),
            FilterRule::new(RuleField::Protocol, RuleOperator::Equals, "ICMP").disabled(),
        ];
        assert_eq!(ids(&apply(&data, &rules)), vec!["2", "5"]);

        let rules = vec![
            FilterRule::new(RuleField::DestinationIp, RuleOperator::Equals, "8.8.8.8"),
            FilterRule::new(RuleField::Protocol, RuleOperator::Equals, "UDP"),
        ];
        assert_eq!(ids(&apply(&data, &rules)), vec!["2"]);
    }

    #[test]
    fn test_disabled_udp_rule_yields_single_dns_record() {
        let data = vec![
            ConnectionRecord::new("a", "2024-05-01T09:00:00Z", "10.0.0.5", "1.1.1.1", 53, Protocol::Udp, 70),
            ConnectionRecord::new("b", "2024-05-01T09:00:01Z", "10.0.0.5", "8.8.8.8", 53, Protocol::Udp, 74),
            ConnectionRecord::new("c", "2024-05-01T09:00:02Z", "10.0.0.6", "140.82.112.3", 443, Protocol::Tcp, 5200),
            ConnectionRecord::new("d", "2024-05-01T09:00:03Z", "10.0.0.6", "8.8.4.4", 443, Protocol::Tcp, 900),
            ConnectionRecord::new("e", "2024-05-01T09:00:04Z", "10.0.0.7", "9.9.9.9", 53, Protocol::Udp, 80),
        ];
        let rules = vec![
            FilterRule::new(RuleField::DestinationIp, RuleOperator::Equals, "8.8.8.8"),
            FilterRule::new(RuleField::Protocol, RuleOperator::Equals, "UDP").disabled(),
        ];
        assert_eq!(ids(&apply(&data, &rules)), vec!["b"]);
    }

    #[test]
    fn test_text_operators_case_insensitive() {
        let data = records();
        let rule = |op, v: &str| vec![FilterRule::new(RuleField::Custom, op, v)];

        assert_eq!(ids(&apply(&data, &rule(RuleOperator::Contains, "dns"))), vec!["2", "3"]);
        assert_eq!(ids(&apply(&data, &rule(RuleOperator::StartsWith, "tls"))), vec!["1"]);
        assert_eq!(ids(&apply(&data, &rule(RuleOperator::EndsWith, "/UPLOAD"))), vec!["5"]);
        assert_eq!(
            ids(&apply(&data, &vec![FilterRule::new(RuleField::Protocol, RuleOperator::Equals, "udp")])),
            vec!["2", "3"]
        );
    }

    #[test]
    fn test_missing_value_never_matches() {
        let data = records();
        // record 4 has no packet summary
        let rules = vec![FilterRule::new(RuleField::Custom, RuleOperator::Contains, "")];
        assert_eq!(ids(&apply(&data, &rules)), vec!["1", "2", "3", "5"]);
    }

    #[test]
    fn test_ordering_operators_numeric() {
        let data = records();
        let gt = vec![FilterRule::new(RuleField::Size, RuleOperator::GreaterThan, 1000.0)];
        assert_eq!(ids(&apply(&data, &gt)), vec!["1", "5"]);

        let lt = vec![FilterRule::new(RuleField::DestinationPort, RuleOperator::LessThan, 53u32)];
        assert_eq!(ids(&apply(&data, &lt)), vec!["4"]);
    }

    #[test]
    fn test_ordering_on_non_numeric_fails_closed() {
        let data = records();
        // text value on a numeric field
        let rules = vec![FilterRule::new(RuleField::Size, RuleOperator::GreaterThan, "10")];
        assert!(apply(&data, &rules).is_empty());

        // numeric value on a text field
        let rules = vec![FilterRule::new(RuleField::Timestamp, RuleOperator::LessThan, 5.0)];
        assert!(apply(&data, &rules).is_empty());
    }

    #[test]
    fn test_rules_are_and_combined() {
        let data = records();
        let rules = vec![
            FilterRule::new(RuleField::SourceIp, RuleOperator::StartsWith, "192.168.1.2"),
            FilterRule::new(RuleField::DestinationPort, RuleOperator::Equals, "53"),
        ];
        assert_eq!(ids(&apply(&data, &rules)), vec!["3"]);
    }

    #[test]
    fn test_describe_rules() {
        let rules = vec![
            FilterRule::new(RuleField::DestinationIp, RuleOperator::Equals, "8.8.8.8"),
            FilterRule::new(RuleField::DestinationPort, RuleOperator::GreaterThan, 1024u32),
            FilterRule::new(RuleField::Protocol, RuleOperator::Equals, "UDP").disabled(),
        ];
        assert_eq!(
            describe_rules(&rules).unwrap(),
            "Only records where destinationIp equals \"8.8.8.8\" AND destinationPort greaterThan 1024"
        );
        assert!(describe_rules(&[]).is_none());
    }
}

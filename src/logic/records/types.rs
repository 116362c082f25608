//! Record Types
//!
//! Connection-log entry and its typed field access.
//! KHÔNG chứa logic filter/sort - chỉ data structures.

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

// ============================================================================
// PROTOCOL
// ============================================================================

/// Transport protocol of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Tcp,
    Udp,
    Icmp,
    #[serde(other)]
    Other,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
            Protocol::Icmp => "ICMP",
            Protocol::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CONNECTION RECORD
// ============================================================================

/// One observed connection (immutable once created)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    pub id: String,
    /// ISO-8601 instant, kept verbatim
    pub timestamp: String,
    pub source_ip: String,
    pub destination_ip: String,
    pub destination_port: u32,
    pub protocol: Protocol,
    /// Bytes
    pub size: u64,
    /// Missing in some capture sources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet_summary: Option<String>,
}

impl ConnectionRecord {
    pub fn new(
        id: impl Into<String>,
        timestamp: impl Into<String>,
        source_ip: impl Into<String>,
        destination_ip: impl Into<String>,
        destination_port: u32,
        protocol: Protocol,
        size: u64,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: timestamp.into(),
            source_ip: source_ip.into(),
            destination_ip: destination_ip.into(),
            destination_port,
            protocol,
            size,
            packet_summary: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.packet_summary = Some(summary.into());
        self
    }

    /// Parsed timestamp, `None` if it is not RFC 3339
    pub fn observed_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.timestamp).ok()
    }

    /// Field value by column
    pub fn get(&self, field: RecordField) -> FieldValue<'_> {
        match field {
            RecordField::Id => FieldValue::Text(&self.id),
            RecordField::Timestamp => FieldValue::Text(&self.timestamp),
            RecordField::SourceIp => FieldValue::Text(&self.source_ip),
            RecordField::DestinationIp => FieldValue::Text(&self.destination_ip),
            RecordField::DestinationPort => FieldValue::Number(u64::from(self.destination_port)),
            RecordField::Protocol => FieldValue::Text(self.protocol.as_str()),
            RecordField::Size => FieldValue::Number(self.size),
            RecordField::PacketSummary => match &self.packet_summary {
                Some(summary) => FieldValue::Text(summary),
                None => FieldValue::Missing,
            },
        }
    }
}

// ============================================================================
// RECORD FIELDS
// ============================================================================

/// Columns of a connection record, in export order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    Id,
    Timestamp,
    SourceIp,
    DestinationIp,
    DestinationPort,
    Protocol,
    Size,
    PacketSummary,
}

impl RecordField {
    pub const ALL: [RecordField; 8] = [
        RecordField::Id,
        RecordField::Timestamp,
        RecordField::SourceIp,
        RecordField::DestinationIp,
        RecordField::DestinationPort,
        RecordField::Protocol,
        RecordField::Size,
        RecordField::PacketSummary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::Id => "id",
            RecordField::Timestamp => "timestamp",
            RecordField::SourceIp => "sourceIp",
            RecordField::DestinationIp => "destinationIp",
            RecordField::DestinationPort => "destinationPort",
            RecordField::Protocol => "protocol",
            RecordField::Size => "size",
            RecordField::PacketSummary => "packetSummary",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, RecordField::DestinationPort | RecordField::Size)
    }
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// FIELD VALUE
// ============================================================================

/// Resolved value of one record field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(u64),
    Missing,
}

impl<'a> FieldValue<'a> {
    /// String form, `None` when missing
    pub fn to_text(&self) -> Option<Cow<'a, str>> {
        match *self {
            FieldValue::Text(s) => Some(Cow::Borrowed(s)),
            FieldValue::Number(n) => Some(Cow::Owned(n.to_string())),
            FieldValue::Missing => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match *self {
            FieldValue::Number(n) => Some(n as f64),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Value-typed ordering: numbers numerically, everything else on string form.
    /// Missing sorts first.
    pub fn compare(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => a.cmp(b),
            (FieldValue::Missing, FieldValue::Missing) => Ordering::Equal,
            (FieldValue::Missing, _) => Ordering::Less,
            (_, FieldValue::Missing) => Ordering::Greater,
            _ => self.to_text().cmp(&other.to_text()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConnectionRecord {
        ConnectionRecord::new("r1", "2024-05-01T10:00:00Z", "192.168.1.10", "8.8.8.8", 53, Protocol::Udp, 120)
            .with_summary("DNS query example.com")
    }

    #[test]
    fn test_serde_wire_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["sourceIp"], "192.168.1.10");
        assert_eq!(json["destinationPort"], 53);
        assert_eq!(json["protocol"], "UDP");
        assert_eq!(json["packetSummary"], "DNS query example.com");
    }

    #[test]
    fn test_unknown_protocol_is_other() {
        let json = r#"{"id":"x","timestamp":"t","sourceIp":"a","destinationIp":"b",
            "destinationPort":1,"protocol":"SCTP","size":0}"#;
        let record: ConnectionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.protocol, Protocol::Other);
        assert!(record.packet_summary.is_none());
        assert!(record.get(RecordField::PacketSummary).is_missing());
    }

    #[test]
    fn test_field_resolution() {
        let record = sample();
        assert_eq!(record.get(RecordField::DestinationPort), FieldValue::Number(53));
        assert_eq!(record.get(RecordField::Protocol), FieldValue::Text("UDP"));
        assert_eq!(record.get(RecordField::Size).to_text().unwrap(), "120");
    }

    #[test]
    fn test_compare_numeric_not_lexicographic() {
        let a = FieldValue::Number(9);
        let b = FieldValue::Number(10);
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(FieldValue::Text("9").compare(&FieldValue::Text("10")), Ordering::Greater);
        assert_eq!(FieldValue::Missing.compare(&FieldValue::Text("")), Ordering::Less);
    }

    #[test]
    fn test_observed_at() {
        assert!(sample().observed_at().is_some());
        let mut bad = sample();
        bad.timestamp = "yesterday".to_string();
        assert!(bad.observed_at().is_none());
    }
}

//! Filter Types
//!
//! Rule schema: field / operator / value with an enable toggle.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RuleError;
use crate::logic::records::RecordField;

// ============================================================================
// RULE FIELD
// ============================================================================

/// Field a rule targets. `Custom` reads the packet summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleField {
    Timestamp,
    SourceIp,
    DestinationIp,
    DestinationPort,
    Protocol,
    Size,
    Custom,
}

impl RuleField {
    pub fn record_field(&self) -> RecordField {
        match self {
            RuleField::Timestamp => RecordField::Timestamp,
            RuleField::SourceIp => RecordField::SourceIp,
            RuleField::DestinationIp => RecordField::DestinationIp,
            RuleField::DestinationPort => RecordField::DestinationPort,
            RuleField::Protocol => RecordField::Protocol,
            RuleField::Size => RecordField::Size,
            RuleField::Custom => RecordField::PacketSummary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleField::Custom => "custom",
            other => other.record_field().as_str(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.record_field().is_numeric()
    }
}

impl FromStr for RuleField {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "timestamp" => Ok(RuleField::Timestamp),
            "sourceIp" => Ok(RuleField::SourceIp),
            "destinationIp" => Ok(RuleField::DestinationIp),
            "destinationPort" => Ok(RuleField::DestinationPort),
            "protocol" => Ok(RuleField::Protocol),
            "size" => Ok(RuleField::Size),
            "custom" => Ok(RuleField::Custom),
            other => Err(RuleError::UnknownField(other.to_string())),
        }
    }
}

impl std::fmt::Display for RuleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RULE OPERATOR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleOperator {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
}

impl RuleOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleOperator::Equals => "equals",
            RuleOperator::Contains => "contains",
            RuleOperator::StartsWith => "startsWith",
            RuleOperator::EndsWith => "endsWith",
            RuleOperator::GreaterThan => "greaterThan",
            RuleOperator::LessThan => "lessThan",
        }
    }

    /// Ordering operators only apply to numeric pairs
    pub fn is_ordering(&self) -> bool {
        matches!(self, RuleOperator::GreaterThan | RuleOperator::LessThan)
    }
}

impl FromStr for RuleOperator {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equals" => Ok(RuleOperator::Equals),
            "contains" => Ok(RuleOperator::Contains),
            "startsWith" => Ok(RuleOperator::StartsWith),
            "endsWith" => Ok(RuleOperator::EndsWith),
            "greaterThan" => Ok(RuleOperator::GreaterThan),
            "lessThan" => Ok(RuleOperator::LessThan),
            other => Err(RuleError::UnknownOperator(other.to_string())),
        }
    }
}

impl std::fmt::Display for RuleOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RULE VALUE
// ============================================================================

/// Rule operand: number or text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Number(f64),
    Text(String),
}

impl RuleValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RuleValue::Number(n) => Some(*n),
            RuleValue::Text(_) => None,
        }
    }

    /// String form used by the text operators (443.0 -> "443")
    pub fn to_text(&self) -> String {
        match self {
            RuleValue::Number(n) => n.to_string(),
            RuleValue::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for RuleValue {
    fn from(s: &str) -> Self {
        RuleValue::Text(s.to_string())
    }
}

impl From<String> for RuleValue {
    fn from(s: String) -> Self {
        RuleValue::Text(s)
    }
}

impl From<f64> for RuleValue {
    fn from(n: f64) -> Self {
        RuleValue::Number(n)
    }
}

impl From<u32> for RuleValue {
    fn from(n: u32) -> Self {
        RuleValue::Number(f64::from(n))
    }
}

// ============================================================================
// FILTER RULE
// ============================================================================

/// Single field/operator/value predicate. Disabled rules are kept but inert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRule {
    pub id: String,
    pub field: RuleField,
    pub operator: RuleOperator,
    pub value: RuleValue,
    pub is_enabled: bool,
}

impl FilterRule {
    /// New enabled rule with a fresh id
    pub fn new(field: RuleField, operator: RuleOperator, value: impl Into<RuleValue>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            field,
            operator,
            value: value.into(),
            is_enabled: true,
        }
    }

    /// Build a rule from raw form input.
    ///
    /// The value is required; `destinationPort` and `size` parse it as a number,
    /// every other field keeps the text as typed.
    pub fn from_input(field: &str, operator: &str, raw_value: &str) -> Result<Self, RuleError> {
        let field: RuleField = field.parse()?;
        let operator: RuleOperator = operator.parse()?;

        let trimmed = raw_value.trim();
        if trimmed.is_empty() {
            return Err(RuleError::EmptyValue);
        }

        let value = if field.is_numeric() {
            let number = trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| RuleError::InvalidNumber {
                    field: field.as_str().to_string(),
                    value: raw_value.to_string(),
                })?;
            RuleValue::Number(number)
        } else {
            RuleValue::Text(raw_value.to_string())
        };

        Ok(Self::new(field, operator, value))
    }

    pub fn disabled(mut self) -> Self {
        self.is_enabled = false;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================

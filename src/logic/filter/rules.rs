//! Rule Set
//!
//! Ordered collection of user rules. Order only matters for display;
//! evaluation is an AND over the enabled rules.

use serde::{Deserialize, Serialize};

use super::types::FilterRule;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<FilterRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule, returns its id
    pub fn add(&mut self, rule: FilterRule) -> String {
        let id = rule.id.clone();
        log::info!("Filter rule added: {} {} {:?}", rule.field, rule.operator, rule.value);
        self.rules.push(rule);
        id
    }

    /// Flip the enable toggle, returns the new state
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let rule = self.rules.iter_mut().find(|r| r.id == id)?;
        rule.is_enabled = !rule.is_enabled;
        log::debug!("Filter rule {} enabled={}", id, rule.is_enabled);
        Some(rule.is_enabled)
    }

    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.rules.iter_mut().find(|r| r.id == id) {
            Some(rule) => {
                rule.is_enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<FilterRule> {
        let index = self.rules.iter().position(|r| r.id == id)?;
        log::info!("Filter rule removed: {}", id);
        Some(self.rules.remove(index))
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn get(&self, id: &str) -> Option<&FilterRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn enabled_count(&self) -> usize {
        self.rules.iter().filter(|r| r.is_enabled).count()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn as_slice(&self) -> &[FilterRule] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterRule> {
        self.rules.iter()
    }
}

impl From<Vec<FilterRule>> for RuleSet {
    fn from(rules: Vec<FilterRule>) -> Self {
        Self { rules }
    }
}

//! Filter Module
//!
//! Narrow a record list with composable, individually toggled rules.
//!
//! ## Structure
//! - `types`: FilterRule, RuleField, RuleOperator, RuleValue
//! - `engine`: Rule compilation and evaluation
//! - `rules`: RuleSet (ordered, user-managed collection)
//!
//! ## Usage
//! ```ignore
//! use outbound_core::logic::filter::{apply, FilterRule, RuleField, RuleOperator};
//!
//! let rules = vec![FilterRule::new(RuleField::DestinationPort, RuleOperator::Equals, 443u32)];
//! let https = apply(&records, &rules);
//! ```

pub mod types;
pub mod engine;
pub mod rules;

pub use types::{FilterRule, RuleField, RuleOperator, RuleValue};
pub use engine::{apply, compile_rules, describe, describe_rules, matches_all, CompiledRule, Predicate};
pub use rules::RuleSet;

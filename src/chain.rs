//! Property chains: ordered rules for one property plus cascade control.

use tracing::{debug, trace};

use crate::model::ModelSnapshot;
use crate::result::ValidationResult;
use crate::rule::{PropertyRule, RuleOutcome};

/// Whether a chain keeps evaluating after a rule fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CascadeMode {
    /// Evaluate every rule and report all failures.
    #[default]
    Continue,
    /// Stop the chain at the first failing rule.
    Stop,
}

/// A chain the fluent builder can grow: somewhere to push rules, reach back
/// into them for modifiers and guards, and set the cascade mode.
///
/// Implemented by [`PropertyChain`] and [`ArrayPropertyChain`] so one
/// generic [`RuleBuilder`](crate::RuleBuilder) serves both.
pub trait RuleHost {
    /// Property this chain validates.
    fn property_name(&self) -> &str;

    /// The rules added so far, in insertion order.
    fn rules_mut(&mut self) -> &mut Vec<PropertyRule>;

    /// Set the chain's cascade mode.
    fn set_cascade(&mut self, mode: CascadeMode);

    /// Append a rule, stamping it with this chain's property name.
    fn push_rule(&mut self, mut rule: PropertyRule) {
        rule.set_property_name(self.property_name().to_string());
        self.rules_mut().push(rule);
    }
}

/// Rules for one scalar property.
#[derive(Debug, Clone)]
pub struct PropertyChain {
    property_name: String,
    rules: Vec<PropertyRule>,
    cascade: CascadeMode,
}

impl PropertyChain {
    pub(crate) fn new(property_name: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            rules: Vec::new(),
            cascade: CascadeMode::default(),
        }
    }

    /// The chain's own cascade mode.
    pub fn cascade(&self) -> CascadeMode {
        self.cascade
    }

    pub(crate) fn execute(
        &self,
        snapshot: &ModelSnapshot,
        cascade: CascadeMode,
    ) -> ValidationResult {
        let value = snapshot.property(&self.property_name);
        trace!(
            property = %self.property_name,
            rules = self.rules.len(),
            "Validating property"
        );

        let mut result = ValidationResult::new();
        for rule in &self.rules {
            match rule.evaluate(value, snapshot) {
                RuleOutcome::Pass => {}
                RuleOutcome::Skipped => {
                    trace!(property = %self.property_name, "Rule skipped");
                }
                RuleOutcome::Fail(failures) => {
                    for failure in failures {
                        result.add(failure);
                    }
                    if cascade == CascadeMode::Stop {
                        debug!(property = %self.property_name, "Stopping chain after failed rule");
                        break;
                    }
                }
            }
        }
        result
    }
}

impl RuleHost for PropertyChain {
    fn property_name(&self) -> &str {
        &self.property_name
    }

    fn rules_mut(&mut self) -> &mut Vec<PropertyRule> {
        &mut self.rules
    }

    fn set_cascade(&mut self, mode: CascadeMode) {
        self.cascade = mode;
    }
}

/// Rules applied to every element of an array-valued property.
///
/// Each rule evaluates against all elements and reports one failure per
/// failing element. A non-array value skips the whole chain.
#[derive(Debug, Clone)]
pub struct ArrayPropertyChain {
    property_name: String,
    rules: Vec<PropertyRule>,
    cascade: CascadeMode,
}

impl ArrayPropertyChain {
    pub(crate) fn new(property_name: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            rules: Vec::new(),
            cascade: CascadeMode::default(),
        }
    }

    /// The chain's own cascade mode.
    pub fn cascade(&self) -> CascadeMode {
        self.cascade
    }

    pub(crate) fn execute(
        &self,
        snapshot: &ModelSnapshot,
        cascade: CascadeMode,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();
        let Some(elements) = snapshot.property(&self.property_name).as_array() else {
            trace!(property = %self.property_name, "Value is not an array, skipping chain");
            return result;
        };
        trace!(
            property = %self.property_name,
            rules = self.rules.len(),
            elements = elements.len(),
            "Validating array property"
        );

        for rule in &self.rules {
            let mut rule_failed = false;
            for element in elements {
                match rule.evaluate(element, snapshot) {
                    RuleOutcome::Pass | RuleOutcome::Skipped => {}
                    RuleOutcome::Fail(failures) => {
                        rule_failed = true;
                        for failure in failures {
                            result.add(failure);
                        }
                    }
                }
            }
            // every element of the failing rule is already reported
            if rule_failed && cascade == CascadeMode::Stop {
                debug!(property = %self.property_name, "Stopping array chain after failed rule");
                break;
            }
        }
        result
    }
}

impl RuleHost for ArrayPropertyChain {
    fn property_name(&self) -> &str {
        &self.property_name
    }

    fn rules_mut(&mut self) -> &mut Vec<PropertyRule> {
        &mut self.rules
    }

    fn set_cascade(&mut self, mode: CascadeMode) {
        self.cascade = mode;
    }
}

/// Registered chain of either shape, in the validator's insertion order.
#[derive(Debug, Clone)]
pub(crate) enum Chain {
    Property(PropertyChain),
    Array(ArrayPropertyChain),
}

impl Chain {
    pub(crate) fn property_name(&self) -> &str {
        match self {
            Self::Property(chain) => chain.property_name(),
            Self::Array(chain) => chain.property_name(),
        }
    }

    pub(crate) fn cascade(&self) -> CascadeMode {
        match self {
            Self::Property(chain) => chain.cascade(),
            Self::Array(chain) => chain.cascade(),
        }
    }

    pub(crate) fn execute(
        &self,
        snapshot: &ModelSnapshot,
        cascade: CascadeMode,
    ) -> ValidationResult {
        match self {
            Self::Property(chain) => chain.execute(snapshot, cascade),
            Self::Array(chain) => chain.execute(snapshot, cascade),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules;
    use serde_json::json;

    fn snapshot(model: serde_json::Value) -> ModelSnapshot {
        ModelSnapshot::capture(&model).unwrap()
    }

    #[test]
    fn test_push_rule_stamps_property_name() {
        let mut chain = PropertyChain::new("age");
        chain.push_rule(rules::not_null());
        assert_eq!(chain.rules_mut()[0].property_name(), Some("age"));
    }

    #[test]
    fn test_continue_reports_every_failure() {
        let mut chain = PropertyChain::new("name");
        chain.push_rule(rules::not_empty());
        chain.push_rule(rules::min_length(3));

        let result = chain.execute(&snapshot(json!({ "name": "" })), CascadeMode::Continue);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_stop_ends_chain_at_first_failure() {
        let mut chain = PropertyChain::new("name");
        chain.push_rule(rules::not_empty());
        chain.push_rule(rules::min_length(3));

        let result = chain.execute(&snapshot(json!({ "name": "" })), CascadeMode::Stop);
        assert_eq!(result.len(), 1);
        assert_eq!(result.errors()[0].error_message, "Value should not be empty.");
    }

    #[test]
    fn test_skipped_rule_neither_fails_nor_stops() {
        let mut chain = PropertyChain::new("name");
        chain.push_rule(rules::is_positive()); // not a number: skipped
        chain.push_rule(rules::min_length(5));

        let result = chain.execute(&snapshot(json!({ "name": "ada" })), CascadeMode::Stop);
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.errors()[0].error_message,
            "Value does not satisfy minimum length of '5'."
        );
    }

    #[test]
    fn test_array_chain_reports_per_element() {
        let mut chain = ArrayPropertyChain::new("names");
        chain.push_rule(rules::min_length(4));

        let result = chain.execute(
            &snapshot(json!({ "names": ["Jon", "Roberta", "Bob"] })),
            CascadeMode::Continue,
        );
        assert_eq!(result.len(), 2);
        assert_eq!(result.errors()[0].attempted_value, json!("Jon"));
        assert_eq!(result.errors()[1].attempted_value, json!("Bob"));
    }

    #[test]
    fn test_array_stop_keeps_all_elements_of_failing_rule() {
        let mut chain = ArrayPropertyChain::new("names");
        chain.push_rule(rules::min_length(4));
        chain.push_rule(rules::max_length(1));

        let result = chain.execute(
            &snapshot(json!({ "names": ["Jon", "Bob"] })),
            CascadeMode::Stop,
        );
        // both elements of the first rule, nothing from the second
        assert_eq!(result.len(), 2);
        assert!(
            result
                .errors()
                .iter()
                .all(|f| f.error_message == "Value does not satisfy minimum length of '4'.")
        );
    }

    #[test]
    fn test_array_chain_skips_non_array_values() {
        let mut chain = ArrayPropertyChain::new("names");
        chain.push_rule(rules::min_length(4));

        let result = chain.execute(&snapshot(json!({ "names": "Jon" })), CascadeMode::Continue);
        assert!(result.is_valid());

        let result = chain.execute(&snapshot(json!({})), CascadeMode::Continue);
        assert!(result.is_valid());
    }
}

// Validation failures and their aggregate result

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Group key used by [`ValidationResult::to_map`] for unnamed failures.
pub const UNKNOWN_PROPERTY: &str = "UNKNOWN";

/// A single failed rule invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationFailure {
    /// Property the failure is reported under, when known
    pub property_name: Option<String>,

    /// Human-readable message
    pub error_message: String,

    /// The value the rule rejected, captured at evaluation time
    pub attempted_value: Value,
}

impl ValidationFailure {
    /// Create an unnamed failure.
    pub fn new(message: impl Into<String>, attempted_value: Value) -> Self {
        Self {
            property_name: None,
            error_message: message.into(),
            attempted_value,
        }
    }

    /// Set the reported property name.
    pub fn with_property_name(mut self, name: impl Into<String>) -> Self {
        self.property_name = Some(name.into());
        self
    }

    /// Re-parent under `parent` using dotted-path notation. An unnamed
    /// failure takes the parent name alone.
    pub(crate) fn reparent(&mut self, parent: &str) {
        self.property_name = Some(match self.property_name.take() {
            Some(child) => format!("{parent}.{child}"),
            None => parent.to_string(),
        });
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property_name {
            Some(name) => write!(f, "{}: {}", name, self.error_message),
            None => write!(f, "{}", self.error_message),
        }
    }
}

impl std::error::Error for ValidationFailure {}

/// Ordered collection of failures produced by one `validate` call.
///
/// Failures keep chain registration order; a result with no failures is
/// valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    failures: Vec<ValidationFailure>,
}

impl ValidationResult {
    /// Create an empty (valid) result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a result from collected failures.
    pub fn from_failures(failures: Vec<ValidationFailure>) -> Self {
        Self { failures }
    }

    /// `true` when no rule failed.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// All failures, in evaluation order.
    pub fn errors(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// Check if there are any failures.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Record a failure.
    pub fn add(&mut self, failure: ValidationFailure) {
        self.failures.push(failure);
    }

    /// Absorb another result's failures, preserving order.
    pub fn extend(&mut self, other: ValidationResult) {
        self.failures.extend(other.failures);
    }

    /// Failures reported under a specific property name.
    pub fn failures_for(&self, property: &str) -> Vec<&ValidationFailure> {
        self.failures
            .iter()
            .filter(|failure| failure.property_name.as_deref() == Some(property))
            .collect()
    }

    /// Consume the result, yielding its failures.
    pub fn into_failures(self) -> Vec<ValidationFailure> {
        self.failures
    }

    /// Group messages by property name. Unnamed failures group under
    /// [`UNKNOWN_PROPERTY`]; keys are sorted, messages keep evaluation order.
    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for failure in &self.failures {
            let key = failure
                .property_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_PROPERTY.to_string());
            map.entry(key).or_default().push(failure.error_message.clone());
        }
        map
    }

    /// Join all messages with a caller-chosen separator.
    pub fn join(&self, separator: &str) -> String {
        self.failures
            .iter()
            .map(|failure| failure.error_message.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.join("\n"))
    }
}

impl From<Vec<ValidationFailure>> for ValidationResult {
    fn from(failures: Vec<ValidationFailure>) -> Self {
        Self::from_failures(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn named(name: &str, message: &str) -> ValidationFailure {
        ValidationFailure::new(message, Value::Null).with_property_name(name)
    }

    #[test]
    fn test_empty_result_is_valid() {
        let result = ValidationResult::new();
        assert!(result.is_valid());
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
    }

    #[test]
    fn test_add_and_access() {
        let mut result = ValidationResult::new();
        result.add(named("age", "too small"));
        assert!(!result.is_valid());
        assert_eq!(result.len(), 1);
        assert_eq!(result.errors()[0].error_message, "too small");
    }

    #[test]
    fn test_failures_for_filters_by_name() {
        let result = ValidationResult::from_failures(vec![
            named("a", "first"),
            named("b", "second"),
            named("a", "third"),
        ]);
        let for_a = result.failures_for("a");
        assert_eq!(for_a.len(), 2);
        assert_eq!(for_a[1].error_message, "third");
    }

    #[test]
    fn test_to_map_groups_and_keeps_order() {
        let result = ValidationResult::from_failures(vec![
            named("b", "b1"),
            named("a", "a1"),
            named("b", "b2"),
            ValidationFailure::new("nameless", Value::Null),
        ]);
        let map = result.to_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map["b"], vec!["b1", "b2"]);
        assert_eq!(map["a"], vec!["a1"]);
        assert_eq!(map[UNKNOWN_PROPERTY], vec!["nameless"]);

        let total: usize = map.values().map(Vec::len).sum();
        assert_eq!(total, result.len());
    }

    #[test]
    fn test_join_and_display() {
        let result =
            ValidationResult::from_failures(vec![named("a", "first"), named("b", "second")]);
        assert_eq!(result.join("; "), "first; second");
        assert_eq!(result.to_string(), "first\nsecond");
    }

    #[test]
    fn test_reparent_builds_dotted_path() {
        let mut failure = named("street", "required");
        failure.reparent("address");
        assert_eq!(failure.property_name.as_deref(), Some("address.street"));

        let mut unnamed = ValidationFailure::new("invalid", json!(1));
        unnamed.reparent("address");
        assert_eq!(unnamed.property_name.as_deref(), Some("address"));
    }

    #[test]
    fn test_failure_serializes() {
        let failure = named("age", "too small");
        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value["property_name"], json!("age"));
        assert_eq!(value["error_message"], json!("too small"));
        assert_eq!(value["attempted_value"], Value::Null);
    }
}

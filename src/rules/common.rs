// Rules applicable to any property shape

use serde_json::Value;

use super::{display_value, operand_rule, values_equal};
use crate::model::ModelSnapshot;
use crate::rule::{Operand, PropertyRule};

/// Passes when the value is null (or the property is absent).
pub fn is_null() -> PropertyRule {
    PropertyRule::new("Value should be null.", |value, _| Some(value.is_null()))
}

/// Passes when the value is present and not null.
pub fn not_null() -> PropertyRule {
    PropertyRule::new("Value should not be null.", |value, _| {
        Some(!value.is_null())
    })
}

/// Passes when the value equals the reference, with numeric coercion.
pub fn equal(operand: impl Into<Operand>) -> PropertyRule {
    operand_rule(
        operand.into(),
        |reference| format!("Value should be equal to '{}'.", display_value(reference)),
        |value, reference| Some(values_equal(value, reference)),
    )
}

/// Passes when the value differs from the reference.
pub fn not_equal(operand: impl Into<Operand>) -> PropertyRule {
    operand_rule(
        operand.into(),
        |reference| format!("Value should not be equal to '{}'.", display_value(reference)),
        |value, reference| Some(!values_equal(value, reference)),
    )
}

/// Passes when the caller's predicate holds for the value and model.
pub fn must<F>(predicate: F) -> PropertyRule
where
    F: Fn(&Value, &ModelSnapshot) -> bool + Send + Sync + 'static,
{
    PropertyRule::new("The specified condition was not met", move |value, snapshot| {
        Some(predicate(value, snapshot))
    })
}

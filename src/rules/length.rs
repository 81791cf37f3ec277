// Length rules over strings and arrays

use serde_json::Value;

use super::value_length;
use crate::rule::PropertyRule;

/// Passes when the length sits within `min..=max`.
pub fn length(min: usize, max: usize) -> PropertyRule {
    PropertyRule::new(
        format!(
            "Value does not satisfy minimum length of '{min}' and/or maximum length of '{max}'."
        ),
        move |value, _| {
            let len = value_length(value)?;
            Some(len >= min && len <= max)
        },
    )
}

/// Passes when the length is at least `min`.
pub fn min_length(min: usize) -> PropertyRule {
    PropertyRule::new(
        format!("Value does not satisfy minimum length of '{min}'."),
        move |value, _| Some(value_length(value)? >= min),
    )
}

/// Passes when the length is at most `max`.
pub fn max_length(max: usize) -> PropertyRule {
    PropertyRule::new(
        format!("Value does not satisfy maximum length of '{max}'."),
        move |value, _| Some(value_length(value)? <= max),
    )
}

/// Passes for null values and zero-length strings or arrays.
pub fn empty() -> PropertyRule {
    PropertyRule::new("Value should be empty.", |value, _| match value {
        Value::Null => Some(true),
        _ => value_length(value).map(|len| len == 0),
    })
}

/// Fails for null values and zero-length strings or arrays.
pub fn not_empty() -> PropertyRule {
    PropertyRule::new("Value should not be empty.", |value, _| match value {
        Value::Null => Some(false),
        _ => value_length(value).map(|len| len > 0),
    })
}

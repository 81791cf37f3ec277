//! Built-in rule catalogue.
//!
//! Every constructor returns a ready-to-install [`PropertyRule`]. The fluent
//! builder calls these for you; they are public so custom rules can be
//! composed from the same parts and installed with the builder's `rule`
//! method.

mod common;
mod length;
mod number;
mod object;
mod string;

pub use common::{equal, is_null, must, not_equal, not_null};
pub use length::{empty, length, max_length, min_length, not_empty};
pub use number::{
    exclusive_between, greater_than, greater_than_or_equal, inclusive_between, is_negative,
    is_positive, less_than, less_than_or_equal,
};
pub use object::nested;
pub use string::{credit_card, matches};

use std::cmp::Ordering;
use std::sync::Arc;

use serde_json::Value;

use crate::rule::{CheckFn, MessageFn, Operand, PropertyRule};

/// Length of a value for the length rules: strings count characters,
/// arrays count elements, everything else has no length.
pub(crate) fn value_length(value: &Value) -> Option<usize> {
    match value {
        Value::String(text) => Some(text.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Deep equality with numeric coercion, so `5` and `5.0` compare equal
/// regardless of how serialization represented them.
pub(crate) fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => numbers_equal(l, r),
        _ => left == right,
    }
}

fn numbers_equal(left: &serde_json::Number, right: &serde_json::Number) -> bool {
    if let (Some(l), Some(r)) = (left.as_i64(), right.as_i64()) {
        return l == r;
    }
    if let (Some(l), Some(r)) = (left.as_u64(), right.as_u64()) {
        return l == r;
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => l == r,
        _ => false,
    }
}

/// Ordering for the comparison rules: numbers compare numerically, strings
/// lexicographically (ISO-8601 timestamps order correctly). Mixed or
/// unordered shapes have no ordering.
pub(crate) fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => l.as_f64()?.partial_cmp(&r.as_f64()?),
        (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
        _ => None,
    }
}

/// Message interpolation: strings render without quotes, everything else
/// renders as JSON.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Build a rule comparing the property value against an operand. Literal
/// operands bake the default message once; derived operands re-resolve the
/// reference (and therefore the message) against the snapshot on every
/// evaluation.
pub(crate) fn operand_rule<M, C>(operand: Operand, message: M, check: C) -> PropertyRule
where
    M: Fn(&Value) -> String + Send + Sync + 'static,
    C: Fn(&Value, &Value) -> Option<bool> + Send + Sync + 'static,
{
    match operand {
        Operand::Literal(reference) => {
            let default_message = message(&reference);
            PropertyRule::new(default_message, move |value, _| check(value, &reference))
        }
        Operand::Derived(resolve) => {
            let message_resolve = Arc::clone(&resolve);
            let message_fn: MessageFn =
                Arc::new(move |snapshot| message(&message_resolve(snapshot)));
            let check_fn: CheckFn =
                Arc::new(move |value, snapshot| check(value, &resolve(snapshot)));
            PropertyRule::with_derived_message(message_fn, check_fn)
        }
    }
}

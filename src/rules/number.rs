// Sign and ordering rules

use serde_json::Value;

use super::{compare_values, display_value, operand_rule};
use crate::rule::{Operand, PropertyRule};

/// Passes when the value orders strictly below the reference.
pub fn less_than(operand: impl Into<Operand>) -> PropertyRule {
    operand_rule(
        operand.into(),
        |reference| format!("Value must be less than '{}'.", display_value(reference)),
        |value, reference| Some(compare_values(value, reference)?.is_lt()),
    )
}

/// Passes when the value orders at or below the reference.
pub fn less_than_or_equal(operand: impl Into<Operand>) -> PropertyRule {
    operand_rule(
        operand.into(),
        |reference| {
            format!(
                "Value must be less than or equal to '{}'.",
                display_value(reference)
            )
        },
        |value, reference| Some(compare_values(value, reference)?.is_le()),
    )
}

/// Passes when the value orders strictly above the reference.
pub fn greater_than(operand: impl Into<Operand>) -> PropertyRule {
    operand_rule(
        operand.into(),
        |reference| format!("Value must be greater than '{}'.", display_value(reference)),
        |value, reference| Some(compare_values(value, reference)?.is_gt()),
    )
}

/// Passes when the value orders at or above the reference.
pub fn greater_than_or_equal(operand: impl Into<Operand>) -> PropertyRule {
    operand_rule(
        operand.into(),
        |reference| {
            format!(
                "Value must be greater than or equal to '{}'.",
                display_value(reference)
            )
        },
        |value, reference| Some(compare_values(value, reference)?.is_ge()),
    )
}

/// Passes for numbers strictly greater than zero.
pub fn is_positive() -> PropertyRule {
    PropertyRule::new("Value must be greater than 0.", |value, _| {
        Some(value.as_f64()? > 0.0)
    })
}

/// Passes for numbers strictly less than zero.
pub fn is_negative() -> PropertyRule {
    PropertyRule::new("Value must be less than 0.", |value, _| {
        Some(value.as_f64()? < 0.0)
    })
}

/// Passes when the value orders strictly between both bounds.
pub fn exclusive_between(min: impl Into<Value>, max: impl Into<Value>) -> PropertyRule {
    let min = min.into();
    let max = max.into();
    let message = format!(
        "Value must be greater than '{}' and less than '{}'.",
        display_value(&min),
        display_value(&max)
    );
    PropertyRule::new(message, move |value, _| {
        Some(compare_values(value, &min)?.is_gt() && compare_values(value, &max)?.is_lt())
    })
}

/// Passes when the value orders between both bounds, bounds included.
pub fn inclusive_between(min: impl Into<Value>, max: impl Into<Value>) -> PropertyRule {
    let min = min.into();
    let max = max.into();
    let message = format!(
        "Value must be greater than or equal to '{}' and less than or equal to '{}'.",
        display_value(&min),
        display_value(&max)
    );
    PropertyRule::new(message, move |value, _| {
        Some(compare_values(value, &min)?.is_ge() && compare_values(value, &max)?.is_le())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelSnapshot;
    use crate::rule::RuleOutcome;
    use serde_json::json;

    fn snapshot() -> ModelSnapshot {
        ModelSnapshot::capture(&json!({ "floor": 3, "ceiling": 9 })).unwrap()
    }

    fn outcome(rule: &PropertyRule, value: Value) -> RuleOutcome {
        rule.evaluate(&value, &snapshot())
    }

    #[test]
    fn test_strict_comparisons() {
        assert_eq!(outcome(&less_than(5), json!(4)), RuleOutcome::Pass);
        assert!(outcome(&less_than(5), json!(5)).is_fail());
        assert_eq!(outcome(&greater_than(5), json!(6)), RuleOutcome::Pass);
        assert!(outcome(&greater_than(5), json!(5)).is_fail());
    }

    #[test]
    fn test_inclusive_comparisons() {
        assert_eq!(outcome(&less_than_or_equal(5), json!(5)), RuleOutcome::Pass);
        assert!(outcome(&less_than_or_equal(5), json!(5.5)).is_fail());
        assert_eq!(outcome(&greater_than_or_equal(5), json!(5)), RuleOutcome::Pass);
        assert!(outcome(&greater_than_or_equal(5), json!(4.9)).is_fail());
    }

    #[test]
    fn test_strings_order_lexicographically() {
        let rule = less_than("2024-06-15T00:00:00Z");
        assert_eq!(outcome(&rule, json!("2024-01-01T00:00:00Z")), RuleOutcome::Pass);
        assert!(outcome(&rule, json!("2025-01-01T00:00:00Z")).is_fail());
    }

    #[test]
    fn test_unorderable_shapes_skip() {
        assert_eq!(outcome(&less_than(5), json!("abc")), RuleOutcome::Skipped);
        assert_eq!(outcome(&greater_than(5), json!({ "a": 1 })), RuleOutcome::Skipped);
        assert_eq!(outcome(&less_than(5), Value::Null), RuleOutcome::Skipped);
    }

    #[test]
    fn test_comparison_messages() {
        let RuleOutcome::Fail(failures) = outcome(&greater_than_or_equal(18), json!(17)) else {
            panic!("expected failure");
        };
        assert_eq!(
            failures[0].error_message,
            "Value must be greater than or equal to '18'."
        );
    }

    #[test]
    fn test_derived_operand_resolves_and_interpolates() {
        let rule = greater_than(Operand::derived(|model| model.property("floor").clone()));
        assert_eq!(outcome(&rule, json!(4)), RuleOutcome::Pass);

        let RuleOutcome::Fail(failures) = outcome(&rule, json!(2)) else {
            panic!("expected failure");
        };
        assert_eq!(failures[0].error_message, "Value must be greater than '3'.");
    }

    #[test]
    fn test_sign_rules() {
        let snap = snapshot();
        assert_eq!(is_positive().evaluate(&json!(0.1), &snap), RuleOutcome::Pass);
        assert!(is_positive().evaluate(&json!(0), &snap).is_fail());
        assert!(is_positive().evaluate(&json!(-2), &snap).is_fail());
        assert_eq!(is_negative().evaluate(&json!(-2), &snap), RuleOutcome::Pass);
        assert!(is_negative().evaluate(&json!(0), &snap).is_fail());
        assert_eq!(is_positive().evaluate(&json!("5"), &snap), RuleOutcome::Skipped);
    }

    #[test]
    fn test_between_rules() {
        let snap = snapshot();
        let exclusive = exclusive_between(1, 10);
        assert_eq!(exclusive.evaluate(&json!(5), &snap), RuleOutcome::Pass);
        assert!(exclusive.evaluate(&json!(1), &snap).is_fail());
        assert!(exclusive.evaluate(&json!(10), &snap).is_fail());

        let inclusive = inclusive_between(1, 10);
        assert_eq!(inclusive.evaluate(&json!(1), &snap), RuleOutcome::Pass);
        assert_eq!(inclusive.evaluate(&json!(10), &snap), RuleOutcome::Pass);
        assert!(inclusive.evaluate(&json!(11), &snap).is_fail());
        assert_eq!(inclusive.evaluate(&json!("mid"), &snap), RuleOutcome::Skipped);
    }

    #[test]
    fn test_between_messages() {
        let snap = snapshot();
        let RuleOutcome::Fail(failures) = exclusive_between(1, 10).evaluate(&json!(0), &snap)
        else {
            panic!("expected failure");
        };
        assert_eq!(
            failures[0].error_message,
            "Value must be greater than '1' and less than '10'."
        );

        let RuleOutcome::Fail(failures) = inclusive_between(1, 10).evaluate(&json!(11), &snap)
        else {
            panic!("expected failure");
        };
        assert_eq!(
            failures[0].error_message,
            "Value must be greater than or equal to '1' and less than or equal to '10'."
        );
    }
}

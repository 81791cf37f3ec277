//! The executable rule unit.
//!
//! A [`PropertyRule`] bundles one check with its guards and message
//! resolution. Evaluation is pure: the rule never stores results, it returns
//! a [`RuleOutcome`] and the caller decides what to do with it.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::model::ModelSnapshot;
use crate::result::ValidationFailure;
use crate::validator::Validatable;

/// Check executed against a property value. `None` means the rule does not
/// apply to this value's shape.
pub type CheckFn = Arc<dyn Fn(&Value, &ModelSnapshot) -> Option<bool> + Send + Sync>;

/// `when`/`unless` guard over the model snapshot.
pub type GuardFn = Arc<dyn Fn(&ModelSnapshot) -> bool + Send + Sync>;

/// Model-derived reference value resolver.
pub type OperandFn = Arc<dyn Fn(&ModelSnapshot) -> Value + Send + Sync>;

/// Model-derived default message resolver.
pub type MessageFn = Arc<dyn Fn(&ModelSnapshot) -> String + Send + Sync>;

/// Reference value of a comparison rule: a literal, or a function of the
/// model resolved at evaluation time.
#[derive(Clone)]
pub enum Operand {
    /// Fixed reference value.
    Literal(Value),
    /// Reference value computed from the snapshot on every evaluation.
    Derived(OperandFn),
}

impl Operand {
    /// Build a derived operand from a resolver function.
    pub fn derived<F>(resolve: F) -> Self
    where
        F: Fn(&ModelSnapshot) -> Value + Send + Sync + 'static,
    {
        Self::Derived(Arc::new(resolve))
    }

    /// Resolve the reference value against a snapshot.
    pub fn resolve(&self, snapshot: &ModelSnapshot) -> Value {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Derived(resolve) => resolve(snapshot),
        }
    }
}

impl fmt::Debug for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

macro_rules! impl_operand_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Self::Literal(Value::from(value))
                }
            }
        )*
    };
}

impl_operand_from!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, bool, &str, String);

/// Outcome of evaluating one rule against one value.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// The check held.
    Pass,
    /// A guard declined the rule, or the value's shape is not one the rule
    /// can judge. Records nothing, stops nothing.
    Skipped,
    /// The check failed. Ordinary rules carry exactly one failure; nested
    /// validator rules carry the child's hoisted failures.
    Fail(Vec<ValidationFailure>),
}

impl RuleOutcome {
    /// `true` for [`RuleOutcome::Fail`].
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }
}

#[derive(Clone)]
enum Check {
    Predicate(CheckFn),
    Nested(Arc<dyn Validatable>),
}

#[derive(Clone)]
enum MessageSource {
    Fixed(String),
    Derived(MessageFn),
}

impl MessageSource {
    fn resolve(&self, snapshot: &ModelSnapshot) -> String {
        match self {
            Self::Fixed(message) => message.clone(),
            Self::Derived(resolve) => resolve(snapshot),
        }
    }
}

/// One executable rule: check, guards, and message resolution.
///
/// Built-in rules come from the [`rules`](crate::rules) catalogue; custom
/// rules are built with [`PropertyRule::new`] and installed through the
/// builder's `rule` method.
#[derive(Clone)]
pub struct PropertyRule {
    check: Check,
    default_message: MessageSource,
    custom_message: Option<String>,
    property_name: Option<String>,
    when: Option<GuardFn>,
    unless: Option<GuardFn>,
}

impl PropertyRule {
    /// Create a rule from a fixed default message and a check.
    ///
    /// The check returns `Some(true)` to pass, `Some(false)` to fail, and
    /// `None` when the value's shape is not one it can judge.
    pub fn new<F>(default_message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value, &ModelSnapshot) -> Option<bool> + Send + Sync + 'static,
    {
        Self::from_parts(
            Check::Predicate(Arc::new(check)),
            MessageSource::Fixed(default_message.into()),
        )
    }

    /// Rule whose default message is resolved against the snapshot, for
    /// checks comparing against derived operands.
    pub(crate) fn with_derived_message(message: MessageFn, check: CheckFn) -> Self {
        Self::from_parts(Check::Predicate(check), MessageSource::Derived(message))
    }

    /// Rule delegating to a nested validator; child failures are hoisted
    /// under this rule's property name as dotted paths.
    pub(crate) fn delegating(validator: Arc<dyn Validatable>) -> Self {
        Self::from_parts(Check::Nested(validator), MessageSource::Fixed(String::new()))
    }

    fn from_parts(check: Check, default_message: MessageSource) -> Self {
        Self {
            check,
            default_message,
            custom_message: None,
            property_name: None,
            when: None,
            unless: None,
        }
    }

    /// The property name this rule reports failures under.
    pub fn property_name(&self) -> Option<&str> {
        self.property_name.as_deref()
    }

    /// Set the reported property name.
    pub fn with_property_name(mut self, name: impl Into<String>) -> Self {
        self.property_name = Some(name.into());
        self
    }

    pub(crate) fn set_property_name(&mut self, name: impl Into<String>) {
        self.property_name = Some(name.into());
    }

    pub(crate) fn set_custom_message(&mut self, message: String) {
        self.custom_message = Some(message);
    }

    pub(crate) fn set_when(&mut self, guard: GuardFn) {
        self.when = Some(guard);
    }

    pub(crate) fn set_unless(&mut self, guard: GuardFn) {
        self.unless = Some(guard);
    }

    /// Evaluate against a property value. Guards run first: a false `when`
    /// or a true `unless` skips the check entirely.
    pub fn evaluate(&self, value: &Value, snapshot: &ModelSnapshot) -> RuleOutcome {
        if let Some(when) = &self.when {
            if !when(snapshot) {
                return RuleOutcome::Skipped;
            }
        }
        if let Some(unless) = &self.unless {
            if unless(snapshot) {
                return RuleOutcome::Skipped;
            }
        }

        match &self.check {
            Check::Predicate(check) => match check(value, snapshot) {
                None => RuleOutcome::Skipped,
                Some(true) => RuleOutcome::Pass,
                Some(false) => RuleOutcome::Fail(vec![self.failure(value, snapshot)]),
            },
            Check::Nested(validator) => self.evaluate_nested(validator.as_ref(), value),
        }
    }

    fn failure(&self, value: &Value, snapshot: &ModelSnapshot) -> ValidationFailure {
        let message = match &self.custom_message {
            Some(message) => message.clone(),
            None => self.default_message.resolve(snapshot),
        };
        let mut failure = ValidationFailure::new(message, value.clone());
        if let Some(name) = &self.property_name {
            failure = failure.with_property_name(name.clone());
        }
        failure
    }

    fn evaluate_nested(&self, validator: &dyn Validatable, value: &Value) -> RuleOutcome {
        if !value.is_object() {
            return RuleOutcome::Skipped;
        }
        let result = validator.validate_value(value);
        if result.is_valid() {
            return RuleOutcome::Pass;
        }
        let mut failures = result.into_failures();
        if let Some(parent) = &self.property_name {
            for failure in &mut failures {
                failure.reparent(parent);
            }
        }
        RuleOutcome::Fail(failures)
    }
}

impl fmt::Debug for PropertyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyRule")
            .field("property_name", &self.property_name)
            .field("custom_message", &self.custom_message)
            .field("nested", &matches!(self.check, Check::Nested(_)))
            .finish_non_exhaustive()
    }
}

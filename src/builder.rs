//! Fluent rule builder.
//!
//! One generic builder grows any [`RuleHost`]: scalar chains from
//! `rule_for`, array chains from `rule_for_each`. The `K` type tag narrows
//! the method surface to rules that make sense for the property's kind, so
//! a number chain never sees `matches` and an object chain never sees
//! `less_than`.

use std::marker::PhantomData;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::chain::{CascadeMode, RuleHost};
use crate::model::ModelSnapshot;
use crate::rule::{GuardFn, Operand, PropertyRule};
use crate::rules;
use crate::validator::Validatable;

/// Scope of a `when`/`unless` guard over the chain built so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyConditionTo {
    /// Guard every rule added to the chain so far.
    #[default]
    AllRules,
    /// Guard only the most recently added rule.
    CurrentRule,
}

/// Semantic kind of the property a chain validates.
pub trait PropertyKind {}

/// Kinds whose values order against a reference value.
pub trait Comparable: PropertyKind {}

/// Kinds with a measurable length.
pub trait HasLength: PropertyKind {}

/// String-valued property.
pub struct StringProperty;

/// Number-valued property.
pub struct NumberProperty;

/// Boolean-valued property.
pub struct BooleanProperty;

/// Object-valued property; supports nested validators.
pub struct ObjectProperty;

/// Array-valued property; length rules apply to the array itself.
pub struct ArrayProperty;

impl PropertyKind for StringProperty {}
impl PropertyKind for NumberProperty {}
impl PropertyKind for BooleanProperty {}
impl PropertyKind for ObjectProperty {}
impl PropertyKind for ArrayProperty {}

impl Comparable for StringProperty {}
impl Comparable for NumberProperty {}

impl HasLength for StringProperty {}
impl HasLength for ArrayProperty {}

/// Fluent builder over one chain.
///
/// Every method consumes and returns the builder, so chains read as one
/// sentence. Modifiers (`with_message`, `with_name`) and `CurrentRule`
/// guards target the most recently added rule and do nothing on an empty
/// chain.
pub struct RuleBuilder<'a, H, K> {
    host: &'a mut H,
    kind: PhantomData<K>,
}

impl<'a, H: RuleHost, K: PropertyKind> RuleBuilder<'a, H, K> {
    pub(crate) fn new(host: &'a mut H) -> Self {
        Self {
            host,
            kind: PhantomData,
        }
    }

    /// Install a caller-constructed rule.
    pub fn rule(self, rule: PropertyRule) -> Self {
        self.host.push_rule(rule);
        self
    }

    /// Value must be null (or absent).
    pub fn is_null(self) -> Self {
        self.rule(rules::is_null())
    }

    /// Value must be present and not null.
    pub fn not_null(self) -> Self {
        self.rule(rules::not_null())
    }

    /// Value must equal the reference.
    pub fn equal(self, operand: impl Into<Operand>) -> Self {
        self.rule(rules::equal(operand))
    }

    /// Value must differ from the reference.
    pub fn not_equal(self, operand: impl Into<Operand>) -> Self {
        self.rule(rules::not_equal(operand))
    }

    /// Value must satisfy the caller's predicate.
    pub fn must<F>(self, predicate: F) -> Self
    where
        F: Fn(&Value, &ModelSnapshot) -> bool + Send + Sync + 'static,
    {
        self.rule(rules::must(predicate))
    }

    /// Replace the default message of the most recently added rule.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        if let Some(last) = self.host.rules_mut().last_mut() {
            last.set_custom_message(message.into());
        }
        self
    }

    /// Override the reported property name of the most recently added rule.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        if let Some(last) = self.host.rules_mut().last_mut() {
            last.set_property_name(name.into());
        }
        self
    }

    /// Run rules only when the condition holds. Guards every rule added so
    /// far; use [`when_scoped`](Self::when_scoped) to guard only the last.
    pub fn when<F>(self, condition: F) -> Self
    where
        F: Fn(&ModelSnapshot) -> bool + Send + Sync + 'static,
    {
        self.when_scoped(condition, ApplyConditionTo::AllRules)
    }

    /// `when` with an explicit guard scope.
    pub fn when_scoped<F>(self, condition: F, scope: ApplyConditionTo) -> Self
    where
        F: Fn(&ModelSnapshot) -> bool + Send + Sync + 'static,
    {
        let guard: GuardFn = Arc::new(condition);
        match scope {
            ApplyConditionTo::AllRules => {
                for rule in self.host.rules_mut().iter_mut() {
                    rule.set_when(Arc::clone(&guard));
                }
            }
            ApplyConditionTo::CurrentRule => {
                if let Some(last) = self.host.rules_mut().last_mut() {
                    last.set_when(guard);
                }
            }
        }
        self
    }

    /// Skip rules when the condition holds. Guards every rule added so far;
    /// use [`unless_scoped`](Self::unless_scoped) to guard only the last.
    pub fn unless<F>(self, condition: F) -> Self
    where
        F: Fn(&ModelSnapshot) -> bool + Send + Sync + 'static,
    {
        self.unless_scoped(condition, ApplyConditionTo::AllRules)
    }

    /// `unless` with an explicit guard scope.
    pub fn unless_scoped<F>(self, condition: F, scope: ApplyConditionTo) -> Self
    where
        F: Fn(&ModelSnapshot) -> bool + Send + Sync + 'static,
    {
        let guard: GuardFn = Arc::new(condition);
        match scope {
            ApplyConditionTo::AllRules => {
                for rule in self.host.rules_mut().iter_mut() {
                    rule.set_unless(Arc::clone(&guard));
                }
            }
            ApplyConditionTo::CurrentRule => {
                if let Some(last) = self.host.rules_mut().last_mut() {
                    last.set_unless(guard);
                }
            }
        }
        self
    }

    /// Set the owning chain's cascade mode.
    pub fn cascade(self, mode: CascadeMode) -> Self {
        self.host.set_cascade(mode);
        self
    }
}

impl<'a, H: RuleHost, K: Comparable> RuleBuilder<'a, H, K> {
    /// Value must order strictly below the reference.
    pub fn less_than(self, operand: impl Into<Operand>) -> Self {
        self.rule(rules::less_than(operand))
    }

    /// Value must order at or below the reference.
    pub fn less_than_or_equal(self, operand: impl Into<Operand>) -> Self {
        self.rule(rules::less_than_or_equal(operand))
    }

    /// Value must order strictly above the reference.
    pub fn greater_than(self, operand: impl Into<Operand>) -> Self {
        self.rule(rules::greater_than(operand))
    }

    /// Value must order at or above the reference.
    pub fn greater_than_or_equal(self, operand: impl Into<Operand>) -> Self {
        self.rule(rules::greater_than_or_equal(operand))
    }

    /// Value must order strictly between both bounds.
    pub fn exclusive_between(self, min: impl Into<Value>, max: impl Into<Value>) -> Self {
        self.rule(rules::exclusive_between(min, max))
    }

    /// Value must order between both bounds, bounds included.
    pub fn inclusive_between(self, min: impl Into<Value>, max: impl Into<Value>) -> Self {
        self.rule(rules::inclusive_between(min, max))
    }
}

impl<'a, H: RuleHost, K: HasLength> RuleBuilder<'a, H, K> {
    /// Length must sit within `min..=max`.
    pub fn length(self, min: usize, max: usize) -> Self {
        self.rule(rules::length(min, max))
    }

    /// Length must be at least `min`.
    pub fn min_length(self, min: usize) -> Self {
        self.rule(rules::min_length(min))
    }

    /// Length must be at most `max`.
    pub fn max_length(self, max: usize) -> Self {
        self.rule(rules::max_length(max))
    }

    /// Value must be null or zero-length.
    pub fn empty(self) -> Self {
        self.rule(rules::empty())
    }

    /// Value must be present with nonzero length.
    pub fn not_empty(self) -> Self {
        self.rule(rules::not_empty())
    }
}

impl<'a, H: RuleHost> RuleBuilder<'a, H, StringProperty> {
    /// Value must match the pattern.
    pub fn matches(self, pattern: Regex) -> Self {
        self.rule(rules::matches(pattern))
    }

    /// Value must be a Luhn-valid card number.
    pub fn credit_card(self) -> Self {
        self.rule(rules::credit_card())
    }
}

impl<'a, H: RuleHost> RuleBuilder<'a, H, NumberProperty> {
    /// Value must be strictly greater than zero.
    pub fn is_positive(self) -> Self {
        self.rule(rules::is_positive())
    }

    /// Value must be strictly less than zero.
    pub fn is_negative(self) -> Self {
        self.rule(rules::is_negative())
    }
}

impl<'a, H: RuleHost> RuleBuilder<'a, H, ObjectProperty> {
    /// Delegate the property's object value to a nested validator; child
    /// failures report under `parent.child` dotted paths.
    pub fn set_validator<V>(self, validator: V) -> Self
    where
        V: Validatable + 'static,
    {
        self.rule(rules::nested(validator))
    }
}

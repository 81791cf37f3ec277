//! # rulekit
//!
//! Fluent model validation: describe per-property rule chains with a
//! builder DSL, then run them all against a model snapshot and collect
//! every failure in one result.
//!
//! ## Features
//!
//! - **Fluent chains** - `rule_for("age").greater_than(0).less_than(150)`
//! - **Type-tagged builders** - only rules that fit the property's kind are
//!   exposed; a number chain has no `matches`, an object chain no `less_than`
//! - **Conditions** - `when` / `unless` guards over the whole chain or just
//!   the last rule
//! - **Cascade control** - per chain, forced across all chains, or
//!   stop-at-first-failing-chain at the validator level
//! - **Array element rules** - `rule_for_each` runs a chain against every
//!   element, reporting one failure per offending element
//! - **Nested validators** - object properties delegate to child validators;
//!   their failures come back under `parent.child` dotted paths
//! - **Custom rules and messages** - install hand-built [`PropertyRule`]s,
//!   override messages and reported names per rule
//! - **Stateless execution** - validators are `Send + Sync` and hold no
//!   per-call state; share one behind an `Arc` across threads
//!
//! ## Quick Start
//!
//! ```
//! use rulekit::{ModelValidator, NumberProperty, StringProperty};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct SignupForm {
//!     username: String,
//!     age: u32,
//! }
//!
//! let mut validator = ModelValidator::new();
//! validator
//!     .rule_for::<StringProperty>("username")
//!     .not_empty()
//!     .min_length(3);
//! validator
//!     .rule_for::<NumberProperty>("age")
//!     .greater_than_or_equal(18);
//!
//! let result = validator.validate(&SignupForm {
//!     username: "jo".to_string(),
//!     age: 17,
//! });
//! assert!(!result.is_valid());
//! assert_eq!(result.len(), 2);
//! ```
//!
//! ## Conditional Rules
//!
//! Guards read the same snapshot the rules do, so conditions can depend on
//! any property of the model:
//!
//! ```
//! use rulekit::{ModelValidator, StringProperty};
//! use serde_json::json;
//!
//! let mut validator = ModelValidator::new();
//! validator
//!     .rule_for::<StringProperty>("company")
//!     .not_empty()
//!     .when(|model| model.get_bool("business_account") == Some(true));
//!
//! let personal = json!({ "company": "", "business_account": false });
//! assert!(validator.validate(&personal).is_valid());
//!
//! let business = json!({ "company": "", "business_account": true });
//! assert!(!validator.validate(&business).is_valid());
//! ```
//!
//! ## Nested Validators
//!
//! ```
//! use rulekit::{ModelValidator, ObjectProperty, StringProperty};
//! use serde_json::json;
//!
//! let mut address = ModelValidator::new();
//! address.rule_for::<StringProperty>("street").not_empty();
//!
//! let mut person = ModelValidator::new();
//! person
//!     .rule_for::<ObjectProperty>("address")
//!     .set_validator(address);
//!
//! let result = person.validate(&json!({ "address": { "street": "" } }));
//! assert_eq!(
//!     result.errors()[0].property_name.as_deref(),
//!     Some("address.street")
//! );
//! ```

mod builder;
mod chain;
mod model;
mod result;
mod rule;
pub mod rules;
mod validator;

pub use builder::{
    ApplyConditionTo, ArrayProperty, BooleanProperty, Comparable, HasLength, NumberProperty,
    ObjectProperty, PropertyKind, RuleBuilder, StringProperty,
};
pub use chain::{ArrayPropertyChain, CascadeMode, PropertyChain, RuleHost};
pub use model::{ModelSnapshot, SnapshotError};
pub use result::{UNKNOWN_PROPERTY, ValidationFailure, ValidationResult};
pub use rule::{CheckFn, GuardFn, MessageFn, Operand, OperandFn, PropertyRule, RuleOutcome};
pub use validator::{ModelValidator, Validatable, ValidationOptions};

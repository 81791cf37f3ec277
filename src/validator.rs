//! The orchestrating model validator.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::builder::{PropertyKind, RuleBuilder};
use crate::chain::{ArrayPropertyChain, CascadeMode, Chain, PropertyChain};
use crate::model::{ModelSnapshot, SnapshotError};
use crate::result::ValidationResult;

/// Anything that can judge a raw JSON value and report failures.
///
/// This is the nesting seam: `set_validator` accepts any implementor, and
/// [`ModelValidator`] implements it, so validators compose transitively.
pub trait Validatable: Send + Sync {
    /// Validate a raw value. Implementations decide what to do with shapes
    /// they do not handle; [`ModelValidator`] treats non-objects as valid.
    fn validate_value(&self, value: &Value) -> ValidationResult;
}

impl<T: Validatable + ?Sized> Validatable for std::sync::Arc<T> {
    fn validate_value(&self, value: &Value) -> ValidationResult {
        (**self).validate_value(value)
    }
}

/// Per-call options: an allow-list of properties to validate.
///
/// Empty options (the default) validate everything.
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    include_properties: Vec<String>,
}

impl ValidationOptions {
    /// Options that validate every registered chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options restricted to the given properties.
    pub fn only<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include_properties: properties.into_iter().map(Into::into).collect(),
        }
    }

    /// Add a property to the allow-list.
    pub fn include(mut self, property: impl Into<String>) -> Self {
        self.include_properties.push(property.into());
        self
    }

    /// Whether a chain for `property` runs under these options.
    pub fn includes(&self, property: &str) -> bool {
        self.include_properties.is_empty()
            || self.include_properties.iter().any(|name| name == property)
    }
}

/// Registers property chains and runs them against model snapshots.
///
/// Chains execute in registration order; failures aggregate into one
/// [`ValidationResult`]. A validator holds no per-call state, so a shared
/// reference can validate different models concurrently.
#[derive(Debug, Clone, Default)]
pub struct ModelValidator {
    chains: Vec<Chain>,
    class_cascade: CascadeMode,
    rule_cascade: Option<CascadeMode>,
}

impl ModelValidator {
    /// An empty validator; register chains with [`rule_for`](Self::rule_for)
    /// and [`rule_for_each`](Self::rule_for_each).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a chain for a scalar property and return its builder.
    pub fn rule_for<K: PropertyKind>(
        &mut self,
        property: impl Into<String>,
    ) -> RuleBuilder<'_, PropertyChain, K> {
        self.chains.push(Chain::Property(PropertyChain::new(property)));
        match self.chains.last_mut() {
            Some(Chain::Property(chain)) => RuleBuilder::new(chain),
            _ => unreachable!("chain was just registered"),
        }
    }

    /// Register a chain applied to every element of an array-valued
    /// property and return its builder. `K` is the element kind.
    pub fn rule_for_each<K: PropertyKind>(
        &mut self,
        property: impl Into<String>,
    ) -> RuleBuilder<'_, ArrayPropertyChain, K> {
        self.chains.push(Chain::Array(ArrayPropertyChain::new(property)));
        match self.chains.last_mut() {
            Some(Chain::Array(chain)) => RuleBuilder::new(chain),
            _ => unreachable!("chain was just registered"),
        }
    }

    /// `Stop` ends validation after the first chain that produced a
    /// failure; `Continue` (default) always runs every chain.
    pub fn set_class_cascade(&mut self, mode: CascadeMode) -> &mut Self {
        self.class_cascade = mode;
        self
    }

    /// Force every chain's cascade mode at execution time, overriding
    /// per-chain settings.
    pub fn set_rule_cascade(&mut self, mode: CascadeMode) -> &mut Self {
        self.rule_cascade = Some(mode);
        self
    }

    /// Validate a model with default options.
    ///
    /// # Panics
    ///
    /// Panics when the model does not serialize to a JSON object; use
    /// [`try_validate`](Self::try_validate) for checked handling.
    pub fn validate<T: Serialize>(&self, model: &T) -> ValidationResult {
        self.validate_with(model, &ValidationOptions::default())
    }

    /// Validate a model under the given options.
    ///
    /// # Panics
    ///
    /// Panics when the model does not serialize to a JSON object.
    pub fn validate_with<T: Serialize>(
        &self,
        model: &T,
        options: &ValidationOptions,
    ) -> ValidationResult {
        match self.try_validate_with(model, options) {
            Ok(result) => result,
            Err(err) => panic!("cannot snapshot model for validation: {err}"),
        }
    }

    /// Checked variant of [`validate`](Self::validate).
    pub fn try_validate<T: Serialize>(
        &self,
        model: &T,
    ) -> Result<ValidationResult, SnapshotError> {
        self.try_validate_with(model, &ValidationOptions::default())
    }

    /// Checked variant of [`validate_with`](Self::validate_with).
    pub fn try_validate_with<T: Serialize>(
        &self,
        model: &T,
        options: &ValidationOptions,
    ) -> Result<ValidationResult, SnapshotError> {
        let snapshot = ModelSnapshot::capture(model)?;
        Ok(self.validate_snapshot(&snapshot, options))
    }

    /// Run every included chain against an already-captured snapshot.
    pub fn validate_snapshot(
        &self,
        snapshot: &ModelSnapshot,
        options: &ValidationOptions,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();
        for chain in &self.chains {
            if !options.includes(chain.property_name()) {
                trace!(property = %chain.property_name(), "Property excluded by options");
                continue;
            }
            let cascade = self.rule_cascade.unwrap_or(chain.cascade());
            let chain_result = chain.execute(snapshot, cascade);
            let chain_failed = !chain_result.is_valid();
            result.extend(chain_result);
            if chain_failed && self.class_cascade == CascadeMode::Stop {
                debug!(property = %chain.property_name(), "Stopping validation after failed chain");
                break;
            }
        }
        debug!(failures = result.len(), "Validation finished");
        result
    }
}

impl Validatable for ModelValidator {
    fn validate_value(&self, value: &Value) -> ValidationResult {
        match value.as_object() {
            Some(object) => {
                let snapshot = ModelSnapshot::from_object(object.clone());
                self.validate_snapshot(&snapshot, &ValidationOptions::default())
            }
            None => ValidationResult::new(),
        }
    }
}

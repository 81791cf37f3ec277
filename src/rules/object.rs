// Nested-validator delegation

use std::sync::Arc;

use crate::rule::PropertyRule;
use crate::validator::Validatable;

/// Delegates an object-valued property to a nested validator. Child
/// failures are hoisted into the parent result under dotted paths; null or
/// non-object values skip the delegation.
pub fn nested<V>(validator: V) -> PropertyRule
where
    V: Validatable + 'static,
{
    PropertyRule::delegating(Arc::new(validator))
}

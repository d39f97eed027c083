//! # Validator Trait
//!
//! Every kind of check (primitive, literal, array, map, union,
//! intersection, object, instantiated generic) implements [`Validator`].
//! Composition happens through [`Shape`], a shared immutable handle, so a
//! union can wrap an object, an object field can hold an intersection, and
//! so on without any kind being special-cased.
//!
//! ## Thread Safety
//!
//! Validators are `Send + Sync` and hold no interior mutability. A `Shape`
//! built once at start-up can be cloned into every request handler and
//! invoked concurrently without locks.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::diagnostic::{PropertyPath, Validation};

/// A pure check over an untyped value.
///
/// `input` is `None` when there is no value at all (missing body, absent
/// key) and `Some(Value::Null)` for an explicit null. On success the
/// returned value is what callers must use from then on: objects are
/// pruned to their declared fields, enumerations may be canonicalized.
pub trait Validator: Send + Sync + fmt::Debug {
    fn validate(&self, input: Option<&Value>, path: &PropertyPath) -> Validation;
}

/// Shared handle to any validator.
pub type Shape = Arc<dyn Validator>;

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate(&self, input: Option<&Value>, path: &PropertyPath) -> Validation {
        (**self).validate(input, path)
    }
}

/// Wrap a concrete validator into a [`Shape`].
pub fn shape<V: Validator + 'static>(validator: V) -> Shape {
    Arc::new(validator)
}

/// Run `shape` against `input` from the root path.
///
/// This is the raw composition primitive: the full [`crate::Diagnostic`]
/// comes back untouched. Request boundaries usually want
/// [`crate::check_and_prune`] instead.
pub fn validate<V: Validator + ?Sized>(shape: &V, input: Option<&Value>) -> Validation {
    shape.validate(input, &PropertyPath::root())
}

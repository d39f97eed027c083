//! # oms-shape — Structural Validation & Pruning Engine
//!
//! Guards every request and response boundary of the organization
//! management service. Given an untyped `serde_json::Value` and a
//! declarative [`Shape`], decides whether the value conforms, reports the
//! first failing property and why, and on success returns a *pruned* copy
//! holding only declared fields.
//!
//! ## Components
//!
//! - [`diagnostic`] — [`Validation`] result alias, [`Diagnostic`],
//!   [`PropertyPath`].
//! - [`primitive`] — `string`, `number`, `boolean`, `null`, `nothing`,
//!   `strict_value`, `one_of_strict`, `enumeration`.
//! - [`combinator`] — `array_of`, `values`, `or`, `or_verbose`, `and`.
//! - [`object`] — [`ObjectShape`] with required / optional / required-if
//!   fields, and the pruning walk.
//! - [`generic`] — [`GenericShape`] for name-driven instantiation.
//! - [`format`] — flattening and [`check_and_prune`].
//!
//! ## Entry Points
//!
//! - [`validate`] — raw composition primitive; returns the [`Diagnostic`].
//! - [`check_and_prune`] — request boundary; returns a [`FormattedError`].
//!
//! ## Crate Policy
//!
//! - No I/O, no logging, no interior mutability. Validators are pure and
//!   `Send + Sync`; rejected payloads are returned, never logged here.
//! - Malformed input is an `Err`, never a panic. Only shape *declarations*
//!   can be defective, and those surface as [`ShapeError`] at build time.

pub mod combinator;
pub mod diagnostic;
pub mod error;
pub mod format;
pub mod generic;
pub mod object;
pub mod primitive;
pub mod validator;

pub use combinator::{and, array_of, nullable, or, or_verbose, values};
pub use diagnostic::{Diagnostic, PathSegment, PropertyPath, Validation};
pub use error::{FormattedError, PropertyError, ShapeError};
pub use format::{check_and_prune, flatten};
pub use generic::GenericShape;
pub use object::{sibling_equals, FieldDescriptor, ObjectShape, ObjectShapeBuilder, Requiredness};
pub use primitive::{
    boolean, deep_equal, enumeration, nothing, null, number, one_of_strict, strict_value, string,
    Enumeration,
};
pub use validator::{shape, validate, Shape, Validator};

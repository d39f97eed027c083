//! # Error Types
//!
//! Two kinds of failure exist around the engine, and they never mix:
//!
//! - [`ShapeError`] — a defect in a shape *declaration* (duplicate field,
//!   wrong generic arity). Raised while shapes are built at start-up.
//! - [`FormattedError`] — the presentational form of a rejected *payload*,
//!   produced by [`crate::check_and_prune`] for the request boundary.
//!
//! Runtime data problems are never `ShapeError`s and never panics; they are
//! [`crate::Diagnostic`]s carried in the `Err` arm of a [`crate::Validation`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shape declaration is malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// The same field name was declared twice in one object shape.
    #[error("field '{field}' is declared more than once")]
    DuplicateField {
        /// The repeated field name.
        field: String,
    },

    /// A generic shape was instantiated with the wrong number of arguments.
    #[error("generic shape '{name}' expects {expected} argument(s), got {actual}")]
    Arity {
        /// Name of the generic shape.
        name: String,
        /// Declared number of type parameters.
        expected: usize,
        /// Number of shapes supplied.
        actual: usize,
    },
}

/// One flattened diagnostic: the rendered path and its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyError {
    pub property: String,
    pub message: String,
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ({})", self.property, self.message)
    }
}

/// A rejected payload, flattened for humans and HTTP bodies.
///
/// `message` is every entry rendered as `property: (message)` and joined
/// with `"; "`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct FormattedError {
    pub errors: Vec<PropertyError>,
    pub message: String,
}

impl FormattedError {
    pub fn new(errors: Vec<PropertyError>) -> Self {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self { errors, message }
    }

    /// Returns the number of flattened entries.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

//! # Combinators
//!
//! Validators assembled from other validators:
//!
//! - [`array_of`] — homogeneous sequence; each element checked at `[i]`.
//! - [`values`] — string-keyed map; keys are data, so none are pruned.
//! - [`or`] / [`or_verbose`] — union; first accepting branch wins.
//! - [`and`] — intersection; every branch must accept the same raw input.
//!
//! Every combinator takes and returns [`Shape`], so they nest freely with
//! primitives, objects and each other.

use serde_json::{Map, Value};

use crate::diagnostic::{Diagnostic, PropertyPath, Validation, NO_BRANCH_MATCHED};
use crate::validator::{shape, Shape, Validator};

/// Sequence whose every element satisfies one shape.
#[derive(Debug, Clone)]
pub struct ArrayOf {
    element: Shape,
}

impl Validator for ArrayOf {
    fn validate(&self, input: Option<&Value>, path: &PropertyPath) -> Validation {
        let items = match input {
            None => return Err(Diagnostic::required(path)),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(Diagnostic::new(path, "must be an array")),
        };
        let mut pruned = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            pruned.push(self.element.validate(Some(item), &path.index(index))?);
        }
        Ok(Value::Array(pruned))
    }
}

pub fn array_of(element: Shape) -> Shape {
    shape(ArrayOf { element })
}

/// Map from arbitrary string keys to values of one shape.
#[derive(Debug, Clone)]
pub struct Values {
    value: Shape,
}

impl Validator for Values {
    fn validate(&self, input: Option<&Value>, path: &PropertyPath) -> Validation {
        let entries = match input {
            None => return Err(Diagnostic::required(path)),
            Some(Value::Object(entries)) => entries,
            Some(_) => return Err(Diagnostic::new(path, "must be an object")),
        };
        let mut pruned = Map::with_capacity(entries.len());
        for (key, value) in entries {
            let accepted = self.value.validate(Some(value), &path.key(key.as_str()))?;
            pruned.insert(key.clone(), accepted);
        }
        Ok(Value::Object(pruned))
    }
}

pub fn values(value: Shape) -> Shape {
    shape(Values { value })
}

/// Union of branches tried in declaration order.
#[derive(Debug, Clone)]
pub struct Or {
    branches: Vec<Shape>,
    keep_branch_diagnostics: bool,
}

impl Validator for Or {
    fn validate(&self, input: Option<&Value>, path: &PropertyPath) -> Validation {
        let mut rejected = Vec::new();
        for branch in &self.branches {
            match branch.validate(input, path) {
                Ok(accepted) => return Ok(accepted),
                Err(diag) if self.keep_branch_diagnostics => rejected.push(diag),
                Err(_) => {}
            }
        }
        Err(Diagnostic::new(path, NO_BRANCH_MATCHED).with_causes(rejected))
    }
}

/// Union that reports only `no branch matched` when every branch fails.
pub fn or<I: IntoIterator<Item = Shape>>(branches: I) -> Shape {
    shape(Or {
        branches: branches.into_iter().collect(),
        keep_branch_diagnostics: false,
    })
}

/// Union that keeps each rejected branch's diagnostic as a cause.
pub fn or_verbose<I: IntoIterator<Item = Shape>>(branches: I) -> Shape {
    shape(Or {
        branches: branches.into_iter().collect(),
        keep_branch_diagnostics: true,
    })
}

/// `shape | null | absent`, the usual spelling of a nullable optional field.
pub fn nullable(inner: Shape) -> Shape {
    or([inner, crate::primitive::nothing()])
}

/// Intersection of branches over the same raw input.
#[derive(Debug, Clone)]
pub struct And {
    branches: Vec<Shape>,
}

impl Validator for And {
    fn validate(&self, input: Option<&Value>, path: &PropertyPath) -> Validation {
        let mut merged: Option<Value> = None;
        for branch in &self.branches {
            let accepted = branch.validate(input, path)?;
            merged = Some(match (merged, accepted) {
                (Some(Value::Object(mut acc)), Value::Object(next)) => {
                    acc.extend(next);
                    Value::Object(acc)
                }
                (_, next) => next,
            });
        }
        Ok(merged.unwrap_or_else(|| input.cloned().unwrap_or(Value::Null)))
    }
}

/// Intersection: shallow-merges object outputs, later branches win.
///
/// When any branch produces a non-object the last branch's output stands.
pub fn and<I: IntoIterator<Item = Shape>>(branches: I) -> Shape {
    shape(And {
        branches: branches.into_iter().collect(),
    })
}

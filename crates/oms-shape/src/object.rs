//! # Object Shapes & Pruning
//!
//! The structural validator. An [`ObjectShape`] is an ordered table of
//! field name → [`FieldDescriptor`]; validating walks the table in
//! declaration order and builds a fresh object holding only the declared
//! fields, each set to its own validator's output.
//!
//! ## Pruning guarantee
//!
//! Keys present in the input but absent from the table are never copied.
//! The output key set is therefore always a subset of the declared names,
//! and re-validating an output yields the same output (unless a field
//! validator canonicalizes, e.g. a case-insensitive enumeration).
//!
//! ## Requiredness
//!
//! For each declared field:
//!
//! 1. Resolve [`Requiredness`]; a `RequiredIf` predicate sees the candidate
//!    value and the whole input object.
//! 2. Absent and not required → omitted from the output.
//! 3. Absent and required → `property is required` at `[field]`.
//! 4. Present → the field validator runs at `[field]`; its first failure
//!    is the object's failure.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::diagnostic::{Diagnostic, PropertyPath, Validation};
use crate::error::ShapeError;
use crate::validator::{shape, Shape, Validator};

/// Decides from sibling values whether a field must be present.
///
/// Called with the field's own value (`None` when absent) and the whole
/// input object.
pub type RequiredIf = Arc<dyn Fn(Option<&Value>, &Map<String, Value>) -> bool + Send + Sync>;

/// Whether a field must be present.
#[derive(Clone)]
pub enum Requiredness {
    Required,
    Optional,
    RequiredIf(RequiredIf),
}

impl Requiredness {
    fn resolve(&self, candidate: Option<&Value>, whole: &Map<String, Value>) -> bool {
        match self {
            Self::Required => true,
            Self::Optional => false,
            Self::RequiredIf(predicate) => predicate(candidate, whole),
        }
    }
}

impl fmt::Debug for Requiredness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("Required"),
            Self::Optional => f.write_str("Optional"),
            Self::RequiredIf(_) => f.write_str("RequiredIf(..)"),
        }
    }
}

/// A declared field: its validator and when it must be present.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub validator: Shape,
    pub requiredness: Requiredness,
}

/// Ordered field table with the structural validator over it.
#[derive(Debug, Clone, Default)]
pub struct ObjectShape {
    fields: Vec<(String, FieldDescriptor)>,
}

impl ObjectShape {
    pub fn builder() -> ObjectShapeBuilder {
        ObjectShapeBuilder::default()
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|(declared, _)| declared == name)
            .map(|(_, field)| field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_shape(self) -> Shape {
        shape(self)
    }
}

impl Validator for ObjectShape {
    fn validate(&self, input: Option<&Value>, path: &PropertyPath) -> Validation {
        let whole = match input {
            None => return Err(Diagnostic::required(path)),
            Some(Value::Object(whole)) => whole,
            Some(_) => return Err(Diagnostic::new(path, "must be an object")),
        };

        let mut pruned = Map::new();
        for (name, field) in &self.fields {
            let candidate = whole.get(name);
            let field_path = path.key(name.as_str());
            match candidate {
                None if field.requiredness.resolve(None, whole) => {
                    return Err(Diagnostic::required(&field_path));
                }
                None => continue,
                Some(value) => {
                    let accepted = field.validator.validate(Some(value), &field_path)?;
                    pruned.insert(name.clone(), accepted);
                }
            }
        }
        Ok(Value::Object(pruned))
    }
}

/// Collects field declarations; [`ObjectShapeBuilder::build`] rejects
/// duplicates.
#[derive(Debug, Default)]
pub struct ObjectShapeBuilder {
    fields: Vec<(String, FieldDescriptor)>,
}

impl ObjectShapeBuilder {
    pub fn field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.fields.push((name.into(), descriptor));
        self
    }

    pub fn required(self, name: impl Into<String>, validator: Shape) -> Self {
        self.field(
            name,
            FieldDescriptor {
                validator,
                requiredness: Requiredness::Required,
            },
        )
    }

    pub fn optional(self, name: impl Into<String>, validator: Shape) -> Self {
        self.field(
            name,
            FieldDescriptor {
                validator,
                requiredness: Requiredness::Optional,
            },
        )
    }

    pub fn required_if<F>(self, name: impl Into<String>, validator: Shape, predicate: F) -> Self
    where
        F: Fn(Option<&Value>, &Map<String, Value>) -> bool + Send + Sync + 'static,
    {
        self.field(
            name,
            FieldDescriptor {
                validator,
                requiredness: Requiredness::RequiredIf(Arc::new(predicate)),
            },
        )
    }

    /// Append every field of an existing shape, keeping its order.
    pub fn extend(mut self, other: &ObjectShape) -> Self {
        self.fields.extend(other.fields.iter().cloned());
        self
    }

    pub fn build(self) -> Result<ObjectShape, ShapeError> {
        for (i, (name, _)) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|(earlier, _)| earlier == name) {
                return Err(ShapeError::DuplicateField {
                    field: name.clone(),
                });
            }
        }
        Ok(ObjectShape {
            fields: self.fields,
        })
    }
}

/// Predicate for [`ObjectShapeBuilder::required_if`]: true when the sibling
/// `field` deep-equals `expected`.
pub fn sibling_equals(
    field: &'static str,
    expected: Value,
) -> impl Fn(Option<&Value>, &Map<String, Value>) -> bool + Send + Sync + 'static {
    move |_, whole| {
        whole
            .get(field)
            .is_some_and(|v| crate::primitive::deep_equal(v, &expected))
    }
}

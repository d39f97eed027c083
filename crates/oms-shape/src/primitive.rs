//! # Primitive & Literal Validators
//!
//! Leaf checks on the runtime kind of a value (`string`, `number`,
//! `boolean`, `null`, `nothing`) and on literal membership
//! (`strict_value`, `one_of_strict`, `enumeration`).
//!
//! Leaves never prune: the accepted value is returned as-is, except for a
//! case-insensitive [`Enumeration`], which canonicalizes to the declared
//! spelling.

use serde_json::Value;

use crate::diagnostic::{Diagnostic, PropertyPath, Validation};
use crate::validator::{shape, Shape, Validator};

/// Runtime kind checked by a [`Primitive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    /// The explicit null sentinel only.
    Null,
    /// Absence, or null standing in for it.
    Nothing,
}

impl PrimitiveKind {
    fn message(self) -> &'static str {
        match self {
            Self::String => "must be a string",
            Self::Number => "must be a number",
            Self::Boolean => "must be a boolean",
            Self::Null => "must be null",
            Self::Nothing => "must be nothing",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::String, Value::String(_))
                | (Self::Number, Value::Number(_))
                | (Self::Boolean, Value::Bool(_))
                | (Self::Null, Value::Null)
                | (Self::Nothing, Value::Null)
        )
    }
}

/// Kind check on a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Primitive {
    kind: PrimitiveKind,
}

impl Primitive {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self { kind }
    }
}

impl Validator for Primitive {
    fn validate(&self, input: Option<&Value>, path: &PropertyPath) -> Validation {
        match input {
            None if self.kind == PrimitiveKind::Nothing => Ok(Value::Null),
            None => Err(Diagnostic::required(path)),
            Some(value) if self.kind.accepts(value) => Ok(value.clone()),
            Some(_) => Err(Diagnostic::new(path, self.kind.message())),
        }
    }
}

pub fn string() -> Shape {
    shape(Primitive::new(PrimitiveKind::String))
}

pub fn number() -> Shape {
    shape(Primitive::new(PrimitiveKind::Number))
}

pub fn boolean() -> Shape {
    shape(Primitive::new(PrimitiveKind::Boolean))
}

/// Accepts exactly `null`; absence is reported as `property is required`.
pub fn null() -> Shape {
    shape(Primitive::new(PrimitiveKind::Null))
}

/// Accepts absence and `null`.
pub fn nothing() -> Shape {
    shape(Primitive::new(PrimitiveKind::Nothing))
}

/// Structural equality with JSON-number semantics: `1` equals `1.0`.
pub fn deep_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            match (integer(a), integer(b)) {
                (Some(a), Some(b)) => a == b,
                (None, None) => a.as_f64() == b.as_f64(),
                _ => false,
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| deep_equal(x, y)))
        }
        _ => left == right,
    }
}

/// Exact integer value of a JSON number. Floats qualify only when they have
/// no fractional part and lie inside the integer range, so a large integer
/// is never rounded to meet a nearby float.
fn integer(n: &serde_json::Number) -> Option<i128> {
    if let Some(i) = n.as_i64() {
        return Some(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(i128::from(u));
    }
    let f = n.as_f64()?;
    // 2^64 is exactly representable; every whole f64 inside it fits in i128.
    const LIMIT: f64 = 18_446_744_073_709_551_616.0;
    if f.fract() == 0.0 && f.abs() < LIMIT {
        Some(f as i128)
    } else {
        None
    }
}

/// Accepts only values deep-equal to one literal.
#[derive(Debug, Clone, PartialEq)]
pub struct StrictValue {
    expected: Value,
}

impl Validator for StrictValue {
    fn validate(&self, input: Option<&Value>, path: &PropertyPath) -> Validation {
        let value = input.ok_or_else(|| Diagnostic::required(path))?;
        if deep_equal(value, &self.expected) {
            Ok(value.clone())
        } else {
            Err(Diagnostic::new(path, format!("must equal {}", self.expected)))
        }
    }
}

pub fn strict_value(expected: impl Into<Value>) -> Shape {
    shape(StrictValue {
        expected: expected.into(),
    })
}

/// Accepts values deep-equal to any member of a fixed literal set.
///
/// This is the building block for enumerations and for tagged-union
/// discriminants.
#[derive(Debug, Clone, PartialEq)]
pub struct OneOfStrict {
    members: Vec<Value>,
}

impl OneOfStrict {
    pub fn new<I, V>(members: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn members(&self) -> &[Value] {
        &self.members
    }

    fn position(&self, value: &Value) -> Option<usize> {
        self.members.iter().position(|m| deep_equal(m, value))
    }

    fn rejection(&self, path: &PropertyPath) -> Diagnostic {
        let listed = self
            .members
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Diagnostic::new(path, format!("must be one of {listed}"))
    }
}

impl Validator for OneOfStrict {
    fn validate(&self, input: Option<&Value>, path: &PropertyPath) -> Validation {
        let value = input.ok_or_else(|| Diagnostic::required(path))?;
        match self.position(value) {
            Some(_) => Ok(value.clone()),
            None => Err(self.rejection(path)),
        }
    }
}

pub fn one_of_strict<I, V>(members: I) -> Shape
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    shape(OneOfStrict::new(members))
}

/// A named set of string or number literals.
///
/// Strict by default. [`Enumeration::case_insensitive`] additionally
/// accepts strings that match a declared variant ignoring ASCII case and
/// returns the declared spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct Enumeration {
    name: String,
    variants: OneOfStrict,
    case_insensitive: bool,
}

impl Enumeration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> &[Value] {
        self.variants.members()
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    pub fn into_shape(self) -> Shape {
        shape(self)
    }

    fn canonical(&self, candidate: &str) -> Option<&Value> {
        self.variants
            .members()
            .iter()
            .find(|v| v.as_str().is_some_and(|s| s.eq_ignore_ascii_case(candidate)))
    }
}

impl Validator for Enumeration {
    fn validate(&self, input: Option<&Value>, path: &PropertyPath) -> Validation {
        let value = input.ok_or_else(|| Diagnostic::required(path))?;
        if self.variants.position(value).is_some() {
            return Ok(value.clone());
        }
        if self.case_insensitive {
            if let Some(canonical) = value.as_str().and_then(|s| self.canonical(s)) {
                return Ok(canonical.clone());
            }
        }
        Err(self.variants.rejection(path))
    }
}

pub fn enumeration<I, V>(name: impl Into<String>, variants: I) -> Enumeration
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Enumeration {
        name: name.into(),
        variants: OneOfStrict::new(variants),
        case_insensitive: false,
    }
}

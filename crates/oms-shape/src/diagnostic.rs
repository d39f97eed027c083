//! # Diagnostics
//!
//! The failure half of every validation outcome: where in the payload the
//! check failed ([`PropertyPath`]) and why ([`Diagnostic::message`]).
//!
//! Paths are absolute. A validator receives the path of the value it is
//! looking at and derives child paths with [`PropertyPath::key`] and
//! [`PropertyPath::index`], so a diagnostic raised three levels down already
//! carries the full `members.[2].role` location when it surfaces.

use std::fmt;

use serde_json::Value;

/// Outcome of a single validator invocation.
///
/// `Ok` carries the accepted (and possibly pruned) value; `Err` carries the
/// first diagnostic raised on the failing branch.
pub type Validation<T = Value> = Result<T, Diagnostic>;

/// Message used whenever a value that must be present is absent.
pub const REQUIRED: &str = "property is required";

/// Message used when every branch of a union rejects the input.
pub const NO_BRANCH_MATCHED: &str = "no branch matched";

/// One step into a payload: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object field name.
    Key(String),
    /// Zero-based array position.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Ordered location of a value inside a payload.
///
/// Renders as segments joined by `.`, with indices as `[i]`; the empty path
/// renders as `(root)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    segments: Vec<PathSegment>,
}

impl PropertyPath {
    /// The path of the payload itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Child path for an object field.
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.child(PathSegment::Key(key.into()))
    }

    /// Child path for an array element.
    pub fn index(&self, index: usize) -> Self {
        self.child(PathSegment::Index(index))
    }

    fn child(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for PropertyPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Why a value was rejected, and where.
///
/// `causes` is empty for every validator except the verbose union
/// ([`crate::or_verbose`]), which keeps the rejected branches' diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: PropertyPath,
    pub message: String,
    pub causes: Vec<Diagnostic>,
}

impl Diagnostic {
    pub fn new(path: &PropertyPath, message: impl Into<String>) -> Self {
        Self {
            path: path.clone(),
            message: message.into(),
            causes: Vec::new(),
        }
    }

    /// The diagnostic for an absent value that had to be present.
    pub fn required(path: &PropertyPath) -> Self {
        Self::new(path, REQUIRED)
    }

    /// Attach the diagnostics that led to this one.
    pub fn with_causes(mut self, causes: Vec<Diagnostic>) -> Self {
        self.causes = causes;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ({})", self.path, self.message)
    }
}

impl std::error::Error for Diagnostic {}

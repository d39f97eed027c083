//! # Generic Shapes
//!
//! A parameterized shape is just a function from argument shapes to a
//! concrete shape:
//!
//! ```
//! use oms_shape::{array_of, number, ObjectShape, Shape};
//!
//! fn page(item: Shape) -> Shape {
//!     ObjectShape::builder()
//!         .required("items", array_of(item))
//!         .required("total", number())
//!         .build()
//!         .expect("static shape")
//!         .into_shape()
//! }
//! ```
//!
//! Callers instantiate once per concrete argument and keep the result.
//! [`GenericShape`] wraps such a function with a name and an arity for
//! callers that pick generics by name at runtime (registries, CLIs).

use std::fmt;
use std::sync::Arc;

use crate::error::ShapeError;
use crate::validator::Shape;

type Build = Arc<dyn Fn(&[Shape]) -> Result<Shape, ShapeError> + Send + Sync>;

/// A named, fixed-arity shape constructor.
#[derive(Clone)]
pub struct GenericShape {
    name: String,
    arity: usize,
    build: Build,
}

impl GenericShape {
    /// Wrap a constructor that receives exactly `arity` argument shapes.
    pub fn new<F>(name: impl Into<String>, arity: usize, build: F) -> Self
    where
        F: Fn(&[Shape]) -> Result<Shape, ShapeError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity,
            build: Arc::new(build),
        }
    }

    /// Convenience for the common single-parameter case.
    pub fn unary<F>(name: impl Into<String>, build: F) -> Self
    where
        F: Fn(Shape) -> Result<Shape, ShapeError> + Send + Sync + 'static,
    {
        Self::new(name, 1, move |args| build(args[0].clone()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Build the concrete shape for `args`.
    ///
    /// # Errors
    ///
    /// [`ShapeError::Arity`] when `args.len()` differs from the declared
    /// arity; any error the constructor itself returns.
    pub fn instantiate(&self, args: &[Shape]) -> Result<Shape, ShapeError> {
        if args.len() != self.arity {
            return Err(ShapeError::Arity {
                name: self.name.clone(),
                expected: self.arity,
                actual: args.len(),
            });
        }
        (self.build)(args)
    }
}

impl fmt::Debug for GenericShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericShape")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

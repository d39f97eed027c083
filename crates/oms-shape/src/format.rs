//! # Diagnostic Formatting & Boundary Entry Point
//!
//! Turns the diagnostic tree into the flat `{ property, message }` list and
//! the single `property: (message); ...` string returned to clients.
//! Purely presentational: nothing here influences whether a value passes.

use serde_json::Value;

use crate::diagnostic::Diagnostic;
use crate::error::{FormattedError, PropertyError};
use crate::validator::{validate, Validator};

/// Depth-first flattening: a diagnostic, then each of its causes.
pub fn flatten(diagnostic: &Diagnostic) -> Vec<PropertyError> {
    let mut out = Vec::new();
    push_flat(diagnostic, &mut out);
    out
}

fn push_flat(diagnostic: &Diagnostic, out: &mut Vec<PropertyError>) {
    out.push(PropertyError {
        property: diagnostic.path.to_string(),
        message: diagnostic.message.clone(),
    });
    for cause in &diagnostic.causes {
        push_flat(cause, out);
    }
}

impl From<&Diagnostic> for FormattedError {
    fn from(diagnostic: &Diagnostic) -> Self {
        FormattedError::new(flatten(diagnostic))
    }
}

impl From<Diagnostic> for FormattedError {
    fn from(diagnostic: Diagnostic) -> Self {
        FormattedError::from(&diagnostic)
    }
}

/// Validate at a request boundary.
///
/// On success returns the pruned value, which is the only value that may
/// flow on to business logic. On failure returns a [`FormattedError`]
/// suitable for a 4xx response body.
pub fn check_and_prune<V: Validator + ?Sized>(
    shape: &V,
    input: Option<&Value>,
) -> Result<Value, FormattedError> {
    validate(shape, input).map_err(FormattedError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::{array_of, or_verbose};
    use crate::diagnostic::PropertyPath;
    use crate::object::ObjectShape;
    use crate::primitive::{number, string};
    use serde_json::json;

    #[test]
    fn single_diagnostic_flattens_to_one_entry() {
        let diag = Diagnostic::new(&PropertyPath::root().key("thing"), "must be a string");
        let flat = flatten(&diag);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].property, "thing");
    }

    #[test]
    fn causes_flatten_depth_first() {
        let root = PropertyPath::root().key("v");
        let diag = Diagnostic::new(&root, "no branch matched").with_causes(vec![
            Diagnostic::new(&root, "must be a string")
                .with_causes(vec![Diagnostic::new(&root.key("x"), "inner")]),
            Diagnostic::new(&root, "must be a number"),
        ]);
        let messages: Vec<_> = flatten(&diag).into_iter().map(|e| e.message).collect();
        assert_eq!(
            messages,
            ["no branch matched", "must be a string", "inner", "must be a number"]
        );
    }

    #[test]
    fn check_and_prune_success_is_pruned() {
        let s = ObjectShape::builder()
            .required("thing", string())
            .build()
            .unwrap();
        let out = check_and_prune(&s, Some(&json!({"thing": "s", "drop": 1}))).unwrap();
        assert_eq!(out, json!({"thing": "s"}));
    }

    #[test]
    fn check_and_prune_failure_is_formatted() {
        let s = ObjectShape::builder()
            .required("thing", string())
            .build()
            .unwrap();
        let err = check_and_prune(&s, Some(&json!({"thing": 4}))).unwrap_err();
        assert_eq!(err.message, "thing: (must be a string)");
    }

    #[test]
    fn root_failures_render_root_property() {
        let err = check_and_prune(&array_of(number()), Some(&json!("x"))).unwrap_err();
        assert_eq!(err.errors[0].property, "(root)");
        assert_eq!(err.message, "(root): (must be an array)");
    }

    #[test]
    fn verbose_union_formats_every_branch() {
        let err = check_and_prune(&or_verbose([string(), number()]), Some(&json!(true)))
            .unwrap_err();
        assert_eq!(err.len(), 3);
        assert_eq!(
            err.message,
            "(root): (no branch matched); (root): (must be a string); (root): (must be a number)"
        );
    }
}

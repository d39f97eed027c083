//! # Generic Wrappers
//!
//! Response wrappers parameterized over their payload. Each is a plain
//! function from the payload shape to the wrapped shape, plus a
//! [`GenericShape`] for registry lookups by name.

use oms_shape::{
    array_of, nullable, number, strict_value, string, GenericShape, ObjectShape, Shape,
    ShapeError,
};

/// One page of a listing.
pub fn page(item: Shape) -> Result<Shape, ShapeError> {
    Ok(ObjectShape::builder()
        .required("items", array_of(item))
        .required("total", number())
        .optional("cursor", nullable(string()))
        .build()?
        .into_shape())
}

/// Successful single-resource response.
pub fn envelope(data: Shape) -> Result<Shape, ShapeError> {
    Ok(ObjectShape::builder()
        .required("ok", strict_value(true))
        .required("data", data)
        .build()?
        .into_shape())
}

pub fn page_generic() -> GenericShape {
    GenericShape::unary("page", page)
}

pub fn envelope_generic() -> GenericShape {
    GenericShape::unary("envelope", envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::member;
    use oms_shape::check_and_prune;
    use serde_json::json;

    #[test]
    fn page_of_members_prunes_each_item() {
        let members = page(member().unwrap().into_shape()).unwrap();
        let input = json!({
            "items": [{
                "id": "mem_1",
                "organizationId": "org_1",
                "email": "a@b.c",
                "role": "member",
                "active": true,
                "secret": 1
            }],
            "total": 1,
            "cursor": null
        });
        let out = check_and_prune(&members, Some(&input)).unwrap();
        assert!(out["items"][0].get("secret").is_none());
        assert_eq!(out["total"], 1);
    }

    #[test]
    fn envelope_requires_literal_ok() {
        let wrapped = envelope(string()).unwrap();
        assert!(check_and_prune(&wrapped, Some(&json!({"ok": true, "data": "x"}))).is_ok());
        let err = check_and_prune(&wrapped, Some(&json!({"ok": false, "data": "x"}))).unwrap_err();
        assert_eq!(err.message, "ok: (must equal true)");
    }

    #[test]
    fn nested_generic_item_failure_path() {
        let nested = page(page(number()).unwrap()).unwrap();
        let input = json!({"items": [{"items": [1, "two"], "total": 2}], "total": 1});
        let err = check_and_prune(&nested, Some(&input)).unwrap_err();
        assert_eq!(err.errors[0].property, "items.[0].items.[1]");
    }

    #[test]
    fn generics_instantiate_through_wrappers() {
        let pages = page_generic();
        assert_eq!((pages.name(), pages.arity()), ("page", 1));
        let strings = pages.instantiate(&[string()]).unwrap();
        let err = check_and_prune(&strings, Some(&json!({"items": [1], "total": 1}))).unwrap_err();
        assert_eq!(err.message, "items.[0]: (must be a string)");

        let envelopes = envelope_generic().instantiate(&[number()]).unwrap();
        let out = check_and_prune(&envelopes, Some(&json!({"ok": true, "data": 2, "x": 0}))).unwrap();
        assert_eq!(out, json!({"ok": true, "data": 2}));
    }
}

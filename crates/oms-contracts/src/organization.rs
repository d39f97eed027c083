//! # Organization Contracts
//!
//! Tenants of the service. Every other resource hangs off an
//! organization id.

use oms_shape::{
    boolean, enumeration, number, or, string, values, ObjectShape, Shape, ShapeError,
};

/// Subscription tier.
pub fn plan() -> Shape {
    enumeration("plan", ["free", "team", "enterprise"]).into_shape()
}

/// Free-form per-tenant settings: string keys to scalar values.
pub fn settings() -> Shape {
    values(or([string(), number(), boolean()]))
}

/// A stored organization as returned by the API.
pub fn organization() -> Result<ObjectShape, ShapeError> {
    ObjectShape::builder()
        .required("id", string())
        .required("name", string())
        .required("plan", plan())
        .optional("settings", settings())
        .build()
}

/// Body of `POST /v1/organizations`.
pub fn create_organization() -> Result<ObjectShape, ShapeError> {
    ObjectShape::builder()
        .required("name", string())
        .optional("plan", plan())
        .optional("settings", settings())
        .build()
}

/// Just enough of an organization to label a nested resource.
pub fn organization_summary() -> Result<ObjectShape, ShapeError> {
    ObjectShape::builder()
        .required("id", string())
        .required("name", string())
        .build()
}

/// Path parameters of `/v1/organizations/{organizationId}/...`.
pub fn organization_path() -> Result<ObjectShape, ShapeError> {
    ObjectShape::builder()
        .required("organizationId", string())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oms_shape::check_and_prune;
    use serde_json::json;

    #[test]
    fn organization_prunes_internal_fields() {
        let input = json!({
            "id": "org_1",
            "name": "Acme",
            "plan": "team",
            "billingSecret": "sk_live_x"
        });
        let out = check_and_prune(&organization().unwrap(), Some(&input)).unwrap();
        assert_eq!(out, json!({"id": "org_1", "name": "Acme", "plan": "team"}));
    }

    #[test]
    fn unknown_plan_is_rejected() {
        let err = check_and_prune(
            &create_organization().unwrap(),
            Some(&json!({"name": "Acme", "plan": "platinum"})),
        )
        .unwrap_err();
        assert_eq!(err.errors[0].property, "plan");
        assert!(err.errors[0].message.starts_with("must be one of"));
    }

    #[test]
    fn settings_reject_nested_objects() {
        let err = check_and_prune(
            &create_organization().unwrap(),
            Some(&json!({"name": "Acme", "settings": {"theme": {"dark": true}}})),
        )
        .unwrap_err();
        assert_eq!(err.message, "settings.theme: (no branch matched)");
    }

    #[test]
    fn settings_keep_every_key() {
        let out = check_and_prune(
            &create_organization().unwrap(),
            Some(&json!({"name": "Acme", "settings": {"seats": 5, "sso": false}})),
        )
        .unwrap();
        assert_eq!(out["settings"], json!({"seats": 5, "sso": false}));
    }
}

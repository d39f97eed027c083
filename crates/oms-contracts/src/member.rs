//! # Member Contracts
//!
//! Memberships of users in an organization, invitations, and role changes.
//! Roles are matched case-insensitively and stored in lowercase.

use oms_shape::{
    and, boolean, enumeration, nullable, sibling_equals, string, ObjectShape, Shape, ShapeError,
};
use serde_json::Value;

use crate::organization::organization_summary;

pub fn role() -> Shape {
    enumeration("role", ["owner", "admin", "member", "viewer"])
        .case_insensitive()
        .into_shape()
}

/// A stored membership.
pub fn member() -> Result<ObjectShape, ShapeError> {
    ObjectShape::builder()
        .required("id", string())
        .required("organizationId", string())
        .required("email", string())
        .required("role", role())
        .required("active", boolean())
        .optional("temporary", boolean())
        .required_if(
            "expiresAt",
            string(),
            sibling_equals("temporary", Value::Bool(true)),
        )
        .optional("invitedBy", nullable(string()))
        .build()
}

/// A membership together with the organization it belongs to.
pub fn member_view() -> Result<Shape, ShapeError> {
    let organization = ObjectShape::builder()
        .required("organization", organization_summary()?.into_shape())
        .build()?;
    Ok(and([member()?.into_shape(), organization.into_shape()]))
}

/// Body of `POST /v1/organizations/{organizationId}/members`.
///
/// Temporary invitations must say when they lapse.
pub fn invite_member() -> Result<ObjectShape, ShapeError> {
    ObjectShape::builder()
        .required("email", string())
        .required("role", role())
        .required("temporary", boolean())
        .required_if(
            "expiresAt",
            string(),
            sibling_equals("temporary", Value::Bool(true)),
        )
        .optional("invitedBy", nullable(string()))
        .build()
}

/// Body of `PATCH /v1/organizations/{organizationId}/members/{memberId}`.
pub fn member_patch() -> Result<ObjectShape, ShapeError> {
    ObjectShape::builder()
        .optional("role", role())
        .optional("active", boolean())
        .build()
}

/// Path parameters of `/v1/organizations/{organizationId}/members/{memberId}`.
pub fn member_path() -> Result<ObjectShape, ShapeError> {
    ObjectShape::builder()
        .required("organizationId", string())
        .required("memberId", string())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oms_shape::check_and_prune;
    use serde_json::json;

    #[test]
    fn temporary_invite_needs_expiry() {
        let invite = invite_member().unwrap();
        let err = check_and_prune(
            &invite,
            Some(&json!({"email": "a@b.c", "role": "member", "temporary": true})),
        )
        .unwrap_err();
        assert_eq!(err.message, "expiresAt: (property is required)");

        let ok = check_and_prune(
            &invite,
            Some(&json!({"email": "a@b.c", "role": "member", "temporary": false})),
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn role_is_canonicalized() {
        let out = check_and_prune(
            &member_patch().unwrap(),
            Some(&json!({"role": "Admin", "id": "ignored"})),
        )
        .unwrap();
        assert_eq!(out, json!({"role": "admin"}));
    }

    #[test]
    fn member_view_merges_both_sides() {
        let view = member_view().unwrap();
        let input = json!({
            "id": "mem_1",
            "organizationId": "org_1",
            "email": "a@b.c",
            "role": "owner",
            "active": true,
            "passwordHash": "x",
            "organization": {"id": "org_1", "name": "Acme", "plan": "free"}
        });
        let out = check_and_prune(&view, Some(&input)).unwrap();
        assert!(out.get("passwordHash").is_none());
        assert_eq!(out["organization"], json!({"id": "org_1", "name": "Acme"}));
        assert_eq!(out["email"], "a@b.c");
    }

    #[test]
    fn invited_by_may_be_null() {
        let out = check_and_prune(
            &member().unwrap(),
            Some(&json!({
                "id": "mem_1",
                "organizationId": "org_1",
                "email": "a@b.c",
                "role": "viewer",
                "active": false,
                "invitedBy": null
            })),
        )
        .unwrap();
        assert_eq!(out["invitedBy"], Value::Null);
    }

    #[test]
    fn temporary_member_keeps_expiry() {
        let base = json!({
            "id": "mem_1",
            "organizationId": "org_1",
            "email": "a@b.c",
            "role": "member",
            "active": true,
            "temporary": true
        });
        let err = check_and_prune(&member().unwrap(), Some(&base)).unwrap_err();
        assert_eq!(err.message, "expiresAt: (property is required)");

        let mut with_expiry = base.clone();
        with_expiry["expiresAt"] = json!("2027-01-01T00:00:00Z");
        let out = check_and_prune(&member().unwrap(), Some(&with_expiry)).unwrap();
        assert_eq!(out["temporary"], json!(true));
        assert_eq!(out["expiresAt"], "2027-01-01T00:00:00Z");
    }
}

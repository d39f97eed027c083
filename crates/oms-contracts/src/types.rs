//! # Typed Wire Types
//!
//! Statically typed mirrors of the contracts. Handlers deserialize a
//! *pruned* value into these; building them from raw payloads bypasses
//! the boundary and is a bug.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Team,
    Enterprise,
}

impl Default for Plan {
    fn default() -> Self {
        Self::Free
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Admin,
    Member,
    Viewer,
}

/// Scalar setting value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub plan: Plan,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: BTreeMap<String, SettingValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganization {
    pub name: String,
    #[serde(default)]
    pub plan: Plan,
    #[serde(default)]
    pub settings: BTreeMap<String, SettingValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSummary {
    pub id: String,
    pub name: String,
}

impl From<&Organization> for OrganizationSummary {
    fn from(org: &Organization) -> Self {
        Self {
            id: org.id.clone(),
            name: org.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub organization_id: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
    #[serde(default)]
    pub temporary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub invited_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    #[serde(flatten)]
    pub member: Member,
    pub organization: OrganizationSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteMember {
    pub email: String,
    pub role: Role,
    pub temporary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub invited_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl MemberPatch {
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.active.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPath {
    pub organization_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPath {
    pub organization_id: String,
    pub member_id: String,
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Successful single-resource response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub ok: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { ok: true, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::member_view;
    use oms_shape::check_and_prune;
    use serde_json::json;

    #[test]
    fn member_view_round_trips_through_contract() {
        let view = MemberView {
            member: Member {
                id: "mem_1".into(),
                organization_id: "org_1".into(),
                email: "a@b.c".into(),
                role: Role::Admin,
                active: true,
                temporary: false,
                expires_at: None,
                invited_by: None,
            },
            organization: OrganizationSummary {
                id: "org_1".into(),
                name: "Acme".into(),
            },
        };
        let raw = serde_json::to_value(&view).unwrap();
        let pruned = check_and_prune(&member_view().unwrap(), Some(&raw)).unwrap();
        let back: MemberView = serde_json::from_value(pruned).unwrap();
        assert_eq!(back, view);
    }

    #[test]
    fn create_organization_defaults() {
        let req: CreateOrganization = serde_json::from_value(json!({"name": "Acme"})).unwrap();
        assert_eq!(req.plan, Plan::Free);
        assert!(req.settings.is_empty());
    }

    #[test]
    fn setting_values_are_untagged() {
        let v: SettingValue = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(v, SettingValue::Bool(true));
        let v: SettingValue = serde_json::from_value(json!("dark")).unwrap();
        assert_eq!(v, SettingValue::Text("dark".into()));
    }
}

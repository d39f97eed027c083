//! # Tenant Store
//!
//! In-memory stand-in for the persistence layer. It only ever receives
//! typed values built from pruned payloads, so it performs no shape checks
//! of its own.

use std::collections::BTreeMap;

use oms_contracts::types::{
    CreateOrganization, InviteMember, Member, MemberPatch, MemberView, Organization,
    OrganizationSummary,
};
use parking_lot::RwLock;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("organization {0} not found")]
    OrganizationNotFound(String),

    #[error("member {0} not found")]
    MemberNotFound(String),

    #[error("{email} is already a member of this organization")]
    DuplicateMember { email: String },
}

#[derive(Debug, Default)]
struct Inner {
    organizations: BTreeMap<String, Organization>,
    /// Keyed by member id.
    members: BTreeMap<String, Member>,
}

/// Organizations and their memberships.
#[derive(Debug, Default)]
pub struct TenantStore {
    inner: RwLock<Inner>,
}

fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

impl TenantStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_organization(&self, req: CreateOrganization) -> Organization {
        let org = Organization {
            id: new_id("org"),
            name: req.name,
            plan: req.plan,
            settings: req.settings,
        };
        self.inner
            .write()
            .organizations
            .insert(org.id.clone(), org.clone());
        org
    }

    pub fn list_organizations(&self) -> Vec<Organization> {
        self.inner.read().organizations.values().cloned().collect()
    }

    pub fn get_organization(&self, id: &str) -> Result<Organization, StoreError> {
        self.inner
            .read()
            .organizations
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::OrganizationNotFound(id.to_string()))
    }

    pub fn invite_member(
        &self,
        organization_id: &str,
        req: InviteMember,
    ) -> Result<MemberView, StoreError> {
        let mut inner = self.inner.write();
        let summary = inner
            .organizations
            .get(organization_id)
            .map(OrganizationSummary::from)
            .ok_or_else(|| StoreError::OrganizationNotFound(organization_id.to_string()))?;

        let duplicate = inner.members.values().any(|m| {
            m.organization_id == organization_id && m.email.eq_ignore_ascii_case(&req.email)
        });
        if duplicate {
            return Err(StoreError::DuplicateMember { email: req.email });
        }

        let member = Member {
            id: new_id("mem"),
            organization_id: organization_id.to_string(),
            email: req.email,
            role: req.role,
            active: true,
            temporary: req.temporary,
            expires_at: req.expires_at,
            invited_by: req.invited_by,
        };
        inner.members.insert(member.id.clone(), member.clone());
        Ok(MemberView {
            member,
            organization: summary,
        })
    }

    pub fn list_members(&self, organization_id: &str) -> Result<Vec<MemberView>, StoreError> {
        let inner = self.inner.read();
        let summary = inner
            .organizations
            .get(organization_id)
            .map(OrganizationSummary::from)
            .ok_or_else(|| StoreError::OrganizationNotFound(organization_id.to_string()))?;
        Ok(inner
            .members
            .values()
            .filter(|m| m.organization_id == organization_id)
            .map(|m| MemberView {
                member: m.clone(),
                organization: summary.clone(),
            })
            .collect())
    }

    pub fn update_member(
        &self,
        organization_id: &str,
        member_id: &str,
        patch: MemberPatch,
    ) -> Result<MemberView, StoreError> {
        let mut inner = self.inner.write();
        let summary = inner
            .organizations
            .get(organization_id)
            .map(OrganizationSummary::from)
            .ok_or_else(|| StoreError::OrganizationNotFound(organization_id.to_string()))?;
        let member = inner
            .members
            .get_mut(member_id)
            .filter(|m| m.organization_id == organization_id)
            .ok_or_else(|| StoreError::MemberNotFound(member_id.to_string()))?;
        if let Some(role) = patch.role {
            member.role = role;
        }
        if let Some(active) = patch.active {
            member.active = active;
        }
        Ok(MemberView {
            member: member.clone(),
            organization: summary,
        })
    }
}

//! # Membership API
//!
//! Invitations, listing and updates of an organization's members. Every
//! route is scoped by `organizationId`; a member id from another
//! organization is reported as not found.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use oms_contracts::names;
use oms_contracts::types::{
    Envelope, InviteMember, MemberPatch, MemberPath, OrganizationPath, Page,
};
use serde_json::Value;

use crate::error::AppError;
use crate::extractors::{extract_path_as, extract_pruned_as, respond};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/organizations/{organizationId}/members",
            get(list_members).post(invite_member),
        )
        .route(
            "/v1/organizations/{organizationId}/members/{memberId}",
            patch(update_member),
        )
}

/// POST /v1/organizations/{organizationId}/members — Invite a member.
async fn invite_member(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let path: OrganizationPath =
        extract_path_as(state.contracts.get(names::ORGANIZATION_PATH)?, params)?;
    let req: InviteMember = extract_pruned_as(state.contracts.get(names::INVITE_MEMBER)?, &body)?;

    let view = state.store.invite_member(&path.organization_id, req)?;
    tracing::info!(
        organization_id = %path.organization_id,
        member_id = %view.member.id,
        role = ?view.member.role,
        "member invited"
    );

    let response = respond(
        state.contracts.get(names::ENVELOPE_MEMBER_VIEW)?,
        &Envelope::ok(view),
    )?;
    Ok((StatusCode::CREATED, response))
}

/// GET /v1/organizations/{organizationId}/members — List members.
async fn list_members(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
) -> Result<Json<Value>, AppError> {
    let path: OrganizationPath =
        extract_path_as(state.contracts.get(names::ORGANIZATION_PATH)?, params)?;
    let items = state.store.list_members(&path.organization_id)?;
    let page = Page {
        total: items.len(),
        items,
        cursor: None,
    };
    respond(state.contracts.get(names::PAGE_MEMBER_VIEW)?, &page)
}

/// PATCH /v1/organizations/{organizationId}/members/{memberId} — Update role
/// or activation. Fields outside the patch contract are dropped, so a patch
/// can never move a member to another organization or change its email.
async fn update_member(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let path: MemberPath = extract_path_as(state.contracts.get(names::MEMBER_PATH)?, params)?;
    let patch: MemberPatch = extract_pruned_as(state.contracts.get(names::MEMBER_PATCH)?, &body)?;
    if patch.is_empty() {
        tracing::debug!(member_id = %path.member_id, "empty member patch");
    }

    let view = state
        .store
        .update_member(&path.organization_id, &path.member_id, patch)?;
    tracing::info!(
        organization_id = %path.organization_id,
        member_id = %path.member_id,
        "member updated"
    );
    respond(
        state.contracts.get(names::ENVELOPE_MEMBER_VIEW)?,
        &Envelope::ok(view),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use oms_contracts::types::{CreateOrganization, Plan};
    use serde_json::json;
    use tower::ServiceExt;

    fn state_with_org() -> (AppState, String) {
        let state = AppState::new().unwrap();
        let org = state.store.create_organization(CreateOrganization {
            name: "Acme".into(),
            plan: Plan::Team,
            settings: Default::default(),
        });
        (state, org.id)
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn handler_invite_member_returns_view() {
        let (state, org_id) = state_with_org();
        let app = router().with_state(state);
        let resp = app
            .oneshot(request(
                "POST",
                &format!("/v1/organizations/{org_id}/members"),
                json!({"email": "a@acme.test", "role": "ADMIN", "temporary": false, "active": false}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["role"], "admin");
        assert_eq!(body["data"]["active"], json!(true));
        assert_eq!(body["data"]["organization"], json!({"id": org_id, "name": "Acme"}));
    }

    #[tokio::test]
    async fn handler_temporary_invite_without_expiry_returns_422() {
        let (state, org_id) = state_with_org();
        let app = router().with_state(state);
        let resp = app
            .oneshot(request(
                "POST",
                &format!("/v1/organizations/{org_id}/members"),
                json!({"email": "a@acme.test", "role": "member", "temporary": true}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert_eq!(
            body["error"]["details"],
            json!([{"property": "expiresAt", "message": "property is required"}])
        );
    }

    #[tokio::test]
    async fn handler_duplicate_invite_returns_409() {
        let (state, org_id) = state_with_org();
        let uri = format!("/v1/organizations/{org_id}/members");
        let invite = json!({"email": "a@acme.test", "role": "member", "temporary": false});
        let first = router()
            .with_state(state.clone())
            .oneshot(request("POST", &uri, invite.clone()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);
        let second = router()
            .with_state(state)
            .oneshot(request("POST", &uri, invite))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn handler_patch_ignores_immutable_fields() {
        let (state, org_id) = state_with_org();
        let view = state
            .store
            .invite_member(
                &org_id,
                InviteMember {
                    email: "a@acme.test".into(),
                    role: oms_contracts::types::Role::Member,
                    temporary: false,
                    expires_at: None,
                    invited_by: None,
                },
            )
            .unwrap();
        let app = router().with_state(state);
        let resp = app
            .oneshot(request(
                "PATCH",
                &format!("/v1/organizations/{org_id}/members/{}", view.member.id),
                json!({"active": false, "email": "evil@x.test", "organizationId": "org_other"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["active"], json!(false));
        assert_eq!(body["data"]["email"], "a@acme.test");
        assert_eq!(body["data"]["organizationId"], json!(org_id));
    }

    #[tokio::test]
    async fn handler_list_members_of_unknown_organization_returns_404() {
        let app = router().with_state(AppState::new().unwrap());
        let req = Request::builder()
            .uri("/v1/organizations/org_missing/members")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

//! # Organization API
//!
//! Tenant creation, listing and lookup.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use oms_contracts::names;
use oms_contracts::types::{CreateOrganization, Envelope, OrganizationPath, Page};
use serde_json::Value;

use crate::error::AppError;
use crate::extractors::{extract_path_as, extract_pruned_as, respond};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/organizations",
            get(list_organizations).post(create_organization),
        )
        .route("/v1/organizations/{organizationId}", get(get_organization))
}

/// POST /v1/organizations — Create an organization.
async fn create_organization(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let req: CreateOrganization =
        extract_pruned_as(state.contracts.get(names::CREATE_ORGANIZATION)?, &body)?;
    let org = state.store.create_organization(req);
    tracing::info!(organization_id = %org.id, plan = ?org.plan, "organization created");

    let response = respond(
        state.contracts.get(names::ENVELOPE_ORGANIZATION)?,
        &Envelope::ok(org),
    )?;
    Ok((StatusCode::CREATED, response))
}

/// GET /v1/organizations — List organizations.
async fn list_organizations(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let items = state.store.list_organizations();
    let page = Page {
        total: items.len(),
        items,
        cursor: None,
    };
    respond(state.contracts.get(names::PAGE_ORGANIZATION)?, &page)
}

/// GET /v1/organizations/{organizationId} — Get an organization.
async fn get_organization(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
) -> Result<Json<Value>, AppError> {
    let path: OrganizationPath =
        extract_path_as(state.contracts.get(names::ORGANIZATION_PATH)?, params)?;
    let org = state.store.get_organization(&path.organization_id)?;
    respond(
        state.contracts.get(names::ENVELOPE_ORGANIZATION)?,
        &Envelope::ok(org),
    )
}

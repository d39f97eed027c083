//! # Contract Dry-Run API
//!
//! Lets clients check a payload against any registered contract without
//! side effects. The contract is named by expression, so instantiations such
//! as `page<member_view>` (percent-encoded in the path) work too.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;
use crate::extractors::extract_pruned;
use crate::state::AppState;

/// Successful dry-run result. Failures are regular 422 responses.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub valid: bool,
    pub pruned: Value,
}

/// Registered contract names.
#[derive(Debug, Serialize)]
pub struct ContractListing {
    pub contracts: Vec<String>,
    pub generics: Vec<GenericListing>,
}

#[derive(Debug, Serialize)]
pub struct GenericListing {
    pub name: String,
    pub arity: usize,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/contracts", get(list_contracts))
        .route("/v1/contracts/{name}/check", post(check_contract))
}

/// GET /v1/contracts — List registered contracts and generics.
async fn list_contracts(State(state): State<AppState>) -> Json<ContractListing> {
    Json(ContractListing {
        contracts: state.contracts.contract_names().map(str::to_string).collect(),
        generics: state
            .contracts
            .generic_names()
            .map(|(name, arity)| GenericListing {
                name: name.to_string(),
                arity,
            })
            .collect(),
    })
}

/// POST /v1/contracts/{name}/check — Validate and prune a payload.
async fn check_contract(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<CheckResponse>, AppError> {
    let shape = state.contracts.resolve(&name)?;
    let pruned = extract_pruned(&shape, &body)?;
    tracing::debug!(contract = %name, "dry-run check passed");
    Ok(Json(CheckResponse {
        valid: true,
        pruned,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    fn test_app() -> Router<()> {
        router().with_state(AppState::new().unwrap())
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn check(name: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/v1/contracts/{name}/check"))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn handler_check_returns_pruned_value() {
        let resp = test_app()
            .oneshot(check("member_patch", r#"{"role":"Owner","email":"x@y.z"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            json!({"valid": true, "pruned": {"role": "owner"}})
        );
    }

    #[tokio::test]
    async fn handler_check_generic_expression() {
        let resp = test_app()
            .oneshot(check(
                "page%3Cstring%3E",
                r#"{"items":["a",1],"total":2}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["message"], "items.[1]: (must be a string)");
    }

    #[tokio::test]
    async fn handler_check_unknown_contract_returns_404() {
        let resp = test_app().oneshot(check("widget", "{}")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn handler_check_malformed_expression_returns_400() {
        let resp = test_app()
            .oneshot(check("page%3C", "{}"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn handler_list_contracts() {
        let req = Request::builder()
            .uri("/v1/contracts")
            .body(Body::empty())
            .unwrap();
        let resp = test_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert!(body["contracts"]
            .as_array()
            .unwrap()
            .contains(&json!("invite_member")));
        assert_eq!(body["generics"][1], json!({"name": "page", "arity": 1}));
    }
}

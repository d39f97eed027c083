//! # oms-api — HTTP Surface of the Organization Service
//!
//! Every request body and path is checked and pruned against its declared
//! contract before a handler sees it, and every response is pruned against
//! its response contract before it leaves.
//!
//! ## API Surface
//!
//! | Prefix                                  | Module                      |
//! |-----------------------------------------|-----------------------------|
//! | `/v1/organizations`                     | [`routes::organizations`]   |
//! | `/v1/organizations/{id}/members/*`      | [`routes::members`]         |
//! | `/v1/contracts/*`                       | [`routes::contracts`]       |
//! | `/health/*`                             | this module                 |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → DefaultBodyLimit → Handler
//! ```

pub mod config;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;
pub mod store;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use oms_contracts::{names, ContractRegistry};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::organizations::router())
        .merge(routes::members::router())
        .merge(routes::contracts::router())
        .layer(DefaultBodyLimit::max(state.config.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .with_state(state);

    Router::new().merge(health).merge(api)
}

/// Liveness check — the process is up.
async fn liveness() -> &'static str {
    "ok"
}

/// Contracts every route resolves on each request.
const ROUTE_CONTRACTS: [&str; 9] = [
    names::CREATE_ORGANIZATION,
    names::ORGANIZATION_PATH,
    names::INVITE_MEMBER,
    names::MEMBER_PATCH,
    names::MEMBER_PATH,
    names::ENVELOPE_ORGANIZATION,
    names::ENVELOPE_MEMBER_VIEW,
    names::PAGE_ORGANIZATION,
    names::PAGE_MEMBER_VIEW,
];

fn missing_route_contract(contracts: &ContractRegistry) -> Option<&'static str> {
    ROUTE_CONTRACTS
        .into_iter()
        .find(|name| contracts.get(name).is_err())
}

/// Readiness check — the contracts every route depends on are registered.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(missing) = missing_route_contract(&state.contracts) {
        tracing::warn!(contract = %missing, "readiness check failed");
        return (StatusCode::SERVICE_UNAVAILABLE, "contracts missing").into_response();
    }
    (StatusCode::OK, "ready").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_registry_is_ready() {
        let contracts = ContractRegistry::new().unwrap();
        assert_eq!(missing_route_contract(&contracts), None);
    }

    #[test]
    fn missing_path_contracts_are_reported() {
        let mut contracts = ContractRegistry::empty();
        for name in ROUTE_CONTRACTS {
            if name != names::ORGANIZATION_PATH && name != names::MEMBER_PATH {
                contracts.register(name, oms_shape::string());
            }
        }
        assert_eq!(
            missing_route_contract(&contracts),
            Some(names::ORGANIZATION_PATH)
        );
        contracts.register(names::ORGANIZATION_PATH, oms_shape::string());
        assert_eq!(missing_route_contract(&contracts), Some(names::MEMBER_PATH));
    }
}

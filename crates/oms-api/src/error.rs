//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Contract rejections become 422 responses whose `details` carry the
//! flattened property errors; internal errors are logged and never exposed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use oms_contracts::ContractError;
use oms_shape::FormattedError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Flattened property errors, present only for contract rejections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Payload did not satisfy its contract (422).
    #[error("validation error: {0}")]
    Validation(FormattedError),

    /// Body is not JSON at all (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict with current resource state (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match &self {
            Self::Validation(err) => {
                tracing::info!(error = %err, "request rejected by contract")
            }
            Self::BadRequest(_) => tracing::info!(error = %self, "malformed request body"),
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            _ => {}
        }

        let (message, details) = match self {
            Self::Internal(_) => ("An internal error occurred".to_string(), None),
            Self::Validation(err) => {
                let details = serde_json::to_value(&err.errors).ok();
                (err.message, details)
            }
            other => (other.to_string(), None),
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<FormattedError> for AppError {
    fn from(err: FormattedError) -> Self {
        Self::Validation(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::OrganizationNotFound(_) | StoreError::MemberNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            StoreError::DuplicateMember { .. } => Self::Conflict(err.to_string()),
        }
    }
}

/// Unknown contract names are a client error; defective declarations are ours.
impl From<ContractError> for AppError {
    fn from(err: ContractError) -> Self {
        match &err {
            ContractError::UnknownContract(_) | ContractError::UnknownGeneric(_) => {
                Self::NotFound(err.to_string())
            }
            ContractError::Parse { .. } => Self::BadRequest(err.to_string()),
            ContractError::Shape(_) => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use oms_shape::PropertyError;

    fn formatted() -> FormattedError {
        FormattedError::new(vec![PropertyError {
            property: "name".to_string(),
            message: "must be a string".to_string(),
        }])
    }

    #[test]
    fn validation_status_code() {
        let (status, code) = AppError::Validation(formatted()).status_and_code();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[test]
    fn store_errors_map_to_http() {
        let (status, _) =
            AppError::from(StoreError::OrganizationNotFound("org_x".into())).status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = AppError::from(StoreError::DuplicateMember {
            email: "a@b.c".into(),
        })
        .status_and_code();
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn contract_errors_map_to_http() {
        let (status, _) =
            AppError::from(ContractError::UnknownContract("x".into())).status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = AppError::from(ContractError::Parse {
            expr: "page<".into(),
            reason: "expected a contract name".into(),
        })
        .status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn into_response_validation_carries_details() {
        let (status, body) = response_parts(AppError::Validation(formatted())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error.message, "name: (must be a string)");
        let details = body.error.details.expect("details present");
        assert_eq!(details[0]["property"], "name");
    }

    #[tokio::test]
    async fn into_response_internal_hides_details() {
        let (status, body) =
            response_parts(AppError::Internal("contract mismatch on member".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.message, "An internal error occurred");
        assert!(body.error.details.is_none());
    }

    #[tokio::test]
    async fn into_response_not_found() {
        let (status, body) = response_parts(AppError::NotFound("organization org_1".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.code, "NOT_FOUND");
        assert!(body.error.message.contains("org_1"));
    }
}

//! # Contract Extractors
//!
//! The request boundary. Handlers receive raw bodies and path parameters,
//! hand them to these helpers together with the declared contract, and only
//! ever work with the pruned result.
//!
//! - [`extract_pruned`] / [`extract_pruned_as`] — request bodies.
//! - [`extract_path_as`] — path parameters.
//! - [`respond`] — response bodies pass through their contract too, so the
//!   server never emits an undeclared field.
//!
//! A typed deserialization failure *after* a successful prune means the
//! contract and its typed mirror disagree. That is a server defect and
//! surfaces as `AppError::Internal`.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::Json;
use oms_shape::{check_and_prune, Shape};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Parse a raw body. An empty (or whitespace-only) body is absent, not null.
pub fn parse_body(body: &Bytes) -> Result<Option<Value>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| AppError::BadRequest(format!("body is not valid JSON: {e}")))
}

/// Validate a body against `shape` and return the pruned value.
pub fn extract_pruned(shape: &Shape, body: &Bytes) -> Result<Value, AppError> {
    let raw = parse_body(body)?;
    Ok(check_and_prune(shape, raw.as_ref())?)
}

/// Validate a body against `shape` and deserialize the pruned value.
pub fn extract_pruned_as<T: DeserializeOwned>(shape: &Shape, body: &Bytes) -> Result<T, AppError> {
    into_typed(extract_pruned(shape, body)?)
}

/// Validate path parameters against `shape` and deserialize the pruned value.
pub fn extract_path_as<T: DeserializeOwned>(
    shape: &Shape,
    params: HashMap<String, String>,
) -> Result<T, AppError> {
    let raw: Map<String, Value> = params
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();
    let pruned = check_and_prune(shape, Some(&Value::Object(raw)))?;
    into_typed(pruned)
}

/// Serialize `value` and pass it through its response contract.
pub fn respond<T: Serialize>(shape: &Shape, value: &T) -> Result<Json<Value>, AppError> {
    let raw = serde_json::to_value(value)
        .map_err(|e| AppError::Internal(format!("response serialization failed: {e}")))?;
    check_and_prune(shape, Some(&raw))
        .map(Json)
        .map_err(|e| AppError::Internal(format!("response violates its contract: {e}")))
}

fn into_typed<T: DeserializeOwned>(pruned: Value) -> Result<T, AppError> {
    serde_json::from_value(pruned).map_err(|e| {
        AppError::Internal(format!(
            "pruned value does not match {}: {e}",
            std::any::type_name::<T>()
        ))
    })
}

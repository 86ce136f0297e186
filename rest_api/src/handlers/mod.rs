// rest_api/src/handlers/mod.rs

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

pub mod abha;
pub mod auth;
pub mod clinical;
pub mod dashboard;
pub mod patients;
pub mod vaccinations;
pub mod visits;

/// The `{"success": true, "data": …}` envelope every data endpoint wraps
/// its payload in.
pub(crate) fn ok<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

/// Message-only success responses (completions, link confirmations).
pub(crate) fn ok_message(message: &str) -> Json<Value> {
    Json(json!({ "success": true, "message": message }))
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "message": "Health portal API is healthy" })),
    )
}

// rest_api/src/handlers/clinical.rs
//
// Read-only lists of the flat clinical sub-records.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use storage::clinical;

use crate::error::ApiError;
use crate::handlers::ok;
use crate::AppState;

pub async fn labs(
    State(state): State<AppState>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let labs = clinical::labs_for(&state.pool, patient_id).await?;
    Ok(ok(json!({ "labs": labs })))
}

pub async fn prescriptions(
    State(state): State<AppState>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let prescriptions = clinical::prescriptions_for(&state.pool, patient_id).await?;
    Ok(ok(json!({ "prescriptions": prescriptions })))
}

pub async fn referrals(
    State(state): State<AppState>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let referrals = clinical::referrals_for(&state.pool, patient_id).await?;
    Ok(ok(json!({ "referrals": referrals })))
}

pub async fn consents(
    State(state): State<AppState>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let consents = clinical::consents_for(&state.pool, patient_id).await?;
    Ok(ok(json!({ "consents": consents })))
}

// rest_api/src/handlers/abha.rs
//
// Mocked external health-ID integration: a QR payload for offline
// verification and a link endpoint that stamps the id and fires the SMS
// stand-in. Nothing here talks to a real registry.

use axum::extract::{Path, State};
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use storage::patients;

use crate::error::ApiError;
use crate::handlers::ok;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QrPayload {
    abha_id: Option<String>,
    name: String,
    gender: Option<String>,
    mobile: Option<String>,
    patient_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRequest {
    pub abha_id: String,
}

/// The QR payload plus its base64 data-URL form; the client renders it.
pub async fn qr(
    State(state): State<AppState>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let patient = patients::get_patient(&state.pool, &patient_id.to_string()).await?;
    let payload = QrPayload {
        abha_id: patient.abha_id,
        name: patient.full_name,
        gender: patient.gender,
        mobile: patient.mobile,
        patient_id: patient.patient_id,
    };

    let encoded = BASE64.encode(serde_json::to_vec(&payload)?);
    Ok(ok(json!({
        "qrCode": format!("data:application/json;base64,{}", encoded),
        "qrData": payload,
    })))
}

pub async fn link(
    State(state): State<AppState>,
    Path(patient_id): Path<i64>,
    Json(request): Json<LinkRequest>,
) -> Result<Json<Value>, ApiError> {
    let patient = patients::link_abha(&state.pool, patient_id, &request.abha_id).await?;

    if let Some(mobile) = patient.mobile.as_deref() {
        security::send_sms(
            mobile,
            &format!("Your record is linked to ABHA ID: {}", request.abha_id),
        );
    }

    Ok(Json(json!({
        "success": true,
        "message": "ABHA Linked Successfully",
        // Mocked sync: the registry integration is a demo target.
        "data": { "recordsSynced": 12 },
    })))
}

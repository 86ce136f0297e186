// rest_api/src/handlers/patients.rs

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use models::NewPatient;
use security::roles::{location_scope, Role};
use storage::patients::{self, coerce_pagination, PatientFilter};

use crate::error::ApiError;
use crate::handlers::{ok, ok_message};
use crate::realtime::RealtimeEvent;
use crate::AppState;

/// Raw query parameters as the SPA sends them. Pagination stays stringly so
/// malformed values coerce to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub search: Option<String>,
    pub location: Option<String>,
    pub disease: Option<String>,
    pub role: Option<String>,
    pub user_location: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let (page, limit) = coerce_pagination(query.page.as_deref(), query.limit.as_deref());
    let scope = location_scope(
        query.role.as_deref().and_then(Role::parse),
        query.user_location.as_deref(),
    );

    let filter = PatientFilter {
        search: query.search,
        location: query.location,
        disease: query.disease,
        scope,
        page,
        limit,
    }
    .sanitize();

    let page = patients::list_patients(&state.pool, &filter).await?;
    Ok(ok(page))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let profile = patients::get_profile(&state.pool, &id).await?;
    Ok(ok(profile))
}

pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewPatient>,
) -> Result<Json<Value>, ApiError> {
    if new.full_name.trim().is_empty() {
        return Err(ApiError::InvalidInput("full_name is required".to_string()));
    }
    let patient = patients::insert_patient(&state.pool, &new).await?;
    state.broadcast(RealtimeEvent::HealthDataUpdate);
    Ok(ok(json!({ "patient": patient })))
}

pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    patients::deactivate_patient(&state.pool, &id).await?;
    state.broadcast(RealtimeEvent::HealthDataUpdate);
    Ok(ok_message("Patient deactivated"))
}

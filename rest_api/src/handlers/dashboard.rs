// rest_api/src/handlers/dashboard.rs

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::error::ApiError;
use crate::handlers::ok;
use crate::AppState;

pub async fn metrics(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let metrics = storage::dashboard::metrics(&state.pool).await?;
    Ok(ok(metrics))
}

pub async fn charts(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let charts = storage::dashboard::charts(&state.pool).await?;
    Ok(ok(charts))
}

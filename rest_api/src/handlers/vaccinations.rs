// rest_api/src/handlers/vaccinations.rs

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde_json::{json, Value};

use models::VaccinationCompletion;
use storage::vaccinations;

use crate::error::ApiError;
use crate::handlers::{ok, ok_message};
use crate::realtime::RealtimeEvent;
use crate::uploads::save_upload;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let vaccinations = vaccinations::list_for(&state.pool, patient_id).await?;
    Ok(ok(json!({ "vaccinations": vaccinations })))
}

/// Mark a dose administered. Multipart: completion fields plus an optional
/// `certificate` file.
pub async fn complete(
    State(state): State<AppState>,
    Path((patient_id, vaccine_id)): Path<(i64, i64)>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut completion = VaccinationCompletion::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "certificate" => {
                let original = field.file_name().unwrap_or("certificate").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                let upload = save_upload(&state.config, &original, content_type, &bytes).await?;
                completion.certificate_url = Some(upload.url);
            }
            "administeredDate" => completion.administered_date = Some(field.text().await?),
            "batchNumber" => completion.batch_number = Some(field.text().await?),
            "administratorName" => completion.administrator_name = Some(field.text().await?),
            "nextDueDate" => completion.next_due_date = Some(field.text().await?),
            // The form echoes the vaccine name back; the row already has it.
            _ => {}
        }
    }

    vaccinations::complete_vaccination(&state.pool, vaccine_id, &completion).await?;

    state.broadcast(RealtimeEvent::VaccinationUpdated {
        patient_id,
        vaccine_id,
    });
    state.broadcast(RealtimeEvent::HealthDataUpdate);

    Ok(ok_message("Vaccination completed"))
}

// rest_api/src/handlers/visits.rs
//
// Visit logging. The add-visit form arrives as multipart: text fields for
// the visit itself, any number of `attachments` files. The visit insert and
// each attachment insert are separate statements — a failure in between
// leaves the visit without attachments, and nothing compensates.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde_json::{json, Value};

use models::NewVisit;
use storage::visits::{self, NewAttachment};

use crate::error::ApiError;
use crate::handlers::ok;
use crate::realtime::RealtimeEvent;
use crate::uploads::save_upload;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let visits = visits::list_for(&state.pool, patient_id).await?;
    Ok(ok(json!({ "visits": visits })))
}

pub async fn add(
    State(state): State<AppState>,
    Path(patient_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut form = NewVisit::default();
    let mut saved = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "attachments" => {
                let original = field.file_name().unwrap_or("attachment").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                saved.push(save_upload(&state.config, &original, content_type, &bytes).await?);
            }
            "visitDate" => form.visit_date = Some(field.text().await?),
            "facility" => form.facility = Some(field.text().await?),
            "chiefComplaint" => form.chief_complaint = Some(field.text().await?),
            "vitals" => form.vitals = Some(field.text().await?),
            "diagnosis" => form.diagnosis = Some(field.text().await?),
            "treatmentNotes" => form.treatment_notes = Some(field.text().await?),
            "followUpRequired" => form.follow_up_required = field.text().await? == "true",
            "followUpDate" => form.follow_up_date = Some(field.text().await?),
            _ => {}
        }
    }

    let visit_id = visits::insert_visit(&state.pool, patient_id, &form).await?;
    for upload in &saved {
        visits::add_attachment(
            &state.pool,
            visit_id,
            &NewAttachment {
                filename: upload.original_name.clone(),
                file_type: upload.content_type.clone(),
                file_url: upload.url.clone(),
                file_size: Some(upload.size),
            },
        )
        .await?;
    }

    let visit = visits::get_visit(&state.pool, visit_id).await?;
    state.broadcast(RealtimeEvent::VisitAdded {
        patient_id,
        visit: visit.clone(),
    });
    state.broadcast(RealtimeEvent::HealthDataUpdate);

    Ok(ok(json!({ "visit": visit })))
}

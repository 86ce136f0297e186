// storage/src/visits.rs
//
// Visit rows plus their attachment children. Inserting a visit and its
// attachments is two separate statements with no transaction around them;
// if the second fails the visit stays behind without attachments.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use models::{NewVisit, Visit, VisitAttachment};

use crate::{Result, StorageError};

/// Attachment metadata recorded after the file has been written to disk.
#[derive(Debug, Clone)]
pub struct NewAttachment {
    pub filename: String,
    pub file_type: Option<String>,
    pub file_url: String,
    pub file_size: Option<i64>,
}

/// The stored vitals blob is client-supplied JSON text; parse it back, or
/// pass the raw string through when it does not parse.
fn parse_vitals(raw: Option<String>) -> Option<serde_json::Value> {
    raw.map(|s| serde_json::from_str(&s).unwrap_or(serde_json::Value::String(s)))
}

fn visit_from_row(row: &SqliteRow) -> std::result::Result<Visit, sqlx::Error> {
    Ok(Visit {
        id: row.try_get("id")?,
        patient_id: row.try_get("patient_id")?,
        visit_date: row.try_get("visit_date")?,
        facility: row.try_get("facility")?,
        chief_complaint: row.try_get("chief_complaint")?,
        vitals: parse_vitals(row.try_get("vitals")?),
        diagnosis: row.try_get("diagnosis")?,
        treatment_notes: row.try_get("treatment_notes")?,
        follow_up_required: row.try_get("follow_up_required")?,
        follow_up_date: row.try_get("follow_up_date")?,
        attachments: Vec::new(),
    })
}

pub async fn attachments_for(pool: &SqlitePool, visit_id: i64) -> Result<Vec<VisitAttachment>> {
    let rows = sqlx::query_as::<_, VisitAttachment>(
        "SELECT * FROM visit_attachments WHERE visit_id = ?",
    )
    .bind(visit_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// All visits for a patient, newest first, attachments filled in per visit.
pub async fn list_for(pool: &SqlitePool, patient_id: i64) -> Result<Vec<Visit>> {
    let rows = sqlx::query(
        "SELECT * FROM patient_visits WHERE patient_id = ? ORDER BY visit_date DESC",
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await?;

    let mut visits = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut visit = visit_from_row(row).map_err(StorageError::from)?;
        visit.attachments = attachments_for(pool, visit.id).await?;
        visits.push(visit);
    }
    Ok(visits)
}

pub async fn get_visit(pool: &SqlitePool, visit_id: i64) -> Result<Visit> {
    let row = sqlx::query("SELECT * FROM patient_visits WHERE id = ?")
        .bind(visit_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StorageError::NotFound(format!("Visit {} not found", visit_id)))?;
    let mut visit = visit_from_row(&row).map_err(StorageError::from)?;
    visit.attachments = attachments_for(pool, visit.id).await?;
    Ok(visit)
}

/// Insert the visit row alone; attachments follow as separate statements.
pub async fn insert_visit(pool: &SqlitePool, patient_id: i64, new: &NewVisit) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO patient_visits (
            patient_id, visit_date, facility, chief_complaint,
            vitals, diagnosis, treatment_notes,
            follow_up_required, follow_up_date
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(patient_id)
    .bind(&new.visit_date)
    .bind(&new.facility)
    .bind(&new.chief_complaint)
    .bind(&new.vitals)
    .bind(&new.diagnosis)
    .bind(&new.treatment_notes)
    .bind(new.follow_up_required)
    .bind(&new.follow_up_date)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn add_attachment(
    pool: &SqlitePool,
    visit_id: i64,
    attachment: &NewAttachment,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO visit_attachments (visit_id, filename, file_type, file_url, file_size) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(visit_id)
    .bind(&attachment.filename)
    .bind(&attachment.file_type)
    .bind(&attachment.file_url)
    .bind(attachment.file_size)
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patients::insert_patient;
    use crate::schema::init_schema;
    use crate::connect_memory;
    use models::NewPatient;

    async fn pool_with_patient() -> (SqlitePool, i64) {
        let pool = connect_memory().await.unwrap();
        init_schema(&pool).await.unwrap();
        let p = insert_patient(
            &pool,
            &NewPatient {
                full_name: "Visit Target".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        (pool, p.id)
    }

    fn visit(date: &str) -> NewVisit {
        NewVisit {
            visit_date: Some(date.to_string()),
            facility: Some("PHC Wayanad".to_string()),
            chief_complaint: Some("Breathing difficulty".to_string()),
            vitals: Some(r#"{"temp":98.6,"bp":"120/80","spo2":96}"#.to_string()),
            diagnosis: Some("Asthma Exacerbation".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn visits_list_newest_first_with_parsed_vitals() {
        let (pool, patient_id) = pool_with_patient().await;
        insert_visit(&pool, patient_id, &visit("2025-01-01T10:00:00Z")).await.unwrap();
        insert_visit(&pool, patient_id, &visit("2025-03-01T10:00:00Z")).await.unwrap();

        let visits = list_for(&pool, patient_id).await.unwrap();
        assert_eq!(visits.len(), 2);
        assert_eq!(visits[0].visit_date.as_deref(), Some("2025-03-01T10:00:00Z"));
        let vitals = visits[0].vitals.as_ref().unwrap();
        assert_eq!(vitals["spo2"], 96);
    }

    #[tokio::test]
    async fn malformed_vitals_pass_through_as_raw_text() {
        let (pool, patient_id) = pool_with_patient().await;
        let mut v = visit("2025-01-01");
        v.vitals = Some("not json".to_string());
        let id = insert_visit(&pool, patient_id, &v).await.unwrap();

        let loaded = get_visit(&pool, id).await.unwrap();
        assert_eq!(
            loaded.vitals,
            Some(serde_json::Value::String("not json".to_string()))
        );
    }

    #[tokio::test]
    async fn attachments_ride_with_their_visit() {
        let (pool, patient_id) = pool_with_patient().await;
        let id = insert_visit(&pool, patient_id, &visit("2025-02-02")).await.unwrap();
        add_attachment(
            &pool,
            id,
            &NewAttachment {
                filename: "xray.png".to_string(),
                file_type: Some("image/png".to_string()),
                file_url: "http://localhost:5000/uploads/1700-xray.png".to_string(),
                file_size: Some(2048),
            },
        )
        .await
        .unwrap();

        let loaded = get_visit(&pool, id).await.unwrap();
        assert_eq!(loaded.attachments.len(), 1);
        assert_eq!(loaded.attachments[0].filename, "xray.png");

        // A visit without attachments still loads with an empty list.
        let bare = insert_visit(&pool, patient_id, &visit("2025-02-03")).await.unwrap();
        assert!(get_visit(&pool, bare).await.unwrap().attachments.is_empty());
    }

    #[tokio::test]
    async fn missing_visit_is_not_found() {
        let (pool, _) = pool_with_patient().await;
        assert!(matches!(
            get_visit(&pool, 42).await,
            Err(StorageError::NotFound(_))
        ));
    }
}

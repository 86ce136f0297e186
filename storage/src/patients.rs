// storage/src/patients.rs
//
// Patient list/detail queries. The list query is assembled by string
// concatenation with positional bound parameters, the way every filter
// combination shares one code path; ordering is "most recently registered
// first" and nothing stronger.

use chrono::Utc;
use rand::Rng;
use sqlx::SqlitePool;

use models::{NewPatient, Patient, PatientPage, PatientProfile, PatientSummary};

use crate::{clinical, vaccinations, Result, StorageError};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 20;

/// Normalized list-endpoint filter. Build one with [`PatientFilter::sanitize`]
/// so sentinel values and malformed pagination collapse to defaults.
#[derive(Debug, Clone, Default)]
pub struct PatientFilter {
    pub search: Option<String>,
    pub location: Option<String>,
    pub disease: Option<String>,
    /// Role-pinned district, if the requesting role is location-scoped.
    pub scope: Option<String>,
    pub page: i64,
    pub limit: i64,
}

impl PatientFilter {
    /// Drops the SPA's "All …" sentinels and silently coerces malformed or
    /// non-positive pagination values to page 1 / limit 20.
    pub fn sanitize(mut self) -> Self {
        if matches!(
            self.location.as_deref(),
            Some("All Districts") | Some("All Locations")
        ) {
            self.location = None;
        }
        if self.disease.as_deref() == Some("All Diseases") {
            self.disease = None;
        }
        if self.page <= 0 {
            self.page = DEFAULT_PAGE;
        }
        if self.limit <= 0 {
            self.limit = DEFAULT_LIMIT;
        }
        self
    }
}

/// Parse raw query-string pagination values, coercing anything malformed.
pub fn coerce_pagination(page: Option<&str>, limit: Option<&str>) -> (i64, i64) {
    let page = page
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_PAGE);
    let limit = limit
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_LIMIT);
    (page, limit)
}

/// One page of active patients with the two correlated subquery counts the
/// records browser shows per row.
pub async fn list_patients(pool: &SqlitePool, filter: &PatientFilter) -> Result<PatientPage> {
    let mut sql = String::from(
        "SELECT p.*, \
         COALESCE((SELECT COUNT(*) FROM health_conditions hc \
           WHERE hc.patient_id = p.id AND hc.is_active = 1), 0) AS conditions_count, \
         COALESCE((SELECT COUNT(*) FROM vaccinations v \
           WHERE v.patient_id = p.id AND v.status = 'Completed'), 0) AS vaccines_completed \
         FROM patients p WHERE p.is_active = 1",
    );
    let mut params: Vec<String> = Vec::new();

    if let Some(term) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        sql.push_str(" AND (p.full_name LIKE ? OR p.patient_id LIKE ? OR p.mobile LIKE ?)");
        let pattern = format!("%{}%", term);
        params.push(pattern.clone());
        params.push(pattern.clone());
        params.push(pattern);
    }

    if let Some(location) = filter.location.as_deref().filter(|s| !s.is_empty()) {
        sql.push_str(" AND p.current_location = ?");
        params.push(location.to_string());
    }

    if let Some(disease) = filter.disease.as_deref().filter(|s| !s.is_empty()) {
        sql.push_str(
            " AND EXISTS (SELECT 1 FROM health_conditions hc \
             WHERE hc.patient_id = p.id AND hc.condition_name LIKE ?)",
        );
        params.push(format!("%{}%", disease));
    }

    if let Some(district) = filter.scope.as_deref() {
        sql.push_str(" AND p.current_location = ?");
        params.push(district.to_string());
    }

    sql.push_str(" ORDER BY p.registered_at DESC LIMIT ? OFFSET ?");

    let offset = (filter.page - 1) * filter.limit;
    let mut query = sqlx::query_as::<_, PatientSummary>(&sql);
    for p in &params {
        query = query.bind(p);
    }
    let patients = query.bind(filter.limit).bind(offset).fetch_all(pool).await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) AS total FROM patients WHERE is_active = 1")
        .fetch_one(pool)
        .await?;

    Ok(PatientPage {
        patients,
        total,
        page: filter.page,
        total_pages: (total + filter.limit - 1) / filter.limit,
    })
}

async fn fetch_by_rowid(pool: &SqlitePool, id: i64) -> Result<Option<Patient>> {
    let patient = sqlx::query_as::<_, Patient>("SELECT * FROM patients WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(patient)
}

/// Lookup by numeric rowid first, falling back to the external "KDH-…"
/// registry identifier.
pub async fn get_patient(pool: &SqlitePool, key: &str) -> Result<Patient> {
    if let Ok(id) = key.parse::<i64>() {
        if let Some(patient) = fetch_by_rowid(pool, id).await? {
            return Ok(patient);
        }
    }
    sqlx::query_as::<_, Patient>("SELECT * FROM patients WHERE patient_id = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StorageError::NotFound(format!("Patient {} not found", key)))
}

/// Detail view: the patient row plus conditions, schemes, a five-visit
/// summary and the full vaccination list.
pub async fn get_profile(pool: &SqlitePool, key: &str) -> Result<PatientProfile> {
    let patient = get_patient(pool, key).await?;
    let health_conditions = clinical::conditions_for(pool, patient.id).await?;
    let schemes = clinical::schemes_for(pool, patient.id).await?;
    let visits = sqlx::query_as::<_, models::VisitSummary>(
        "SELECT id, visit_date, diagnosis, facility FROM patient_visits \
         WHERE patient_id = ? ORDER BY visit_date DESC LIMIT 5",
    )
    .bind(patient.id)
    .fetch_all(pool)
    .await?;
    let vaccinations = vaccinations::list_for(pool, patient.id).await?;

    Ok(PatientProfile {
        patient,
        health_conditions,
        vaccinations,
        schemes,
        visits,
    })
}

fn generate_patient_id() -> String {
    let serial: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("KDH-{}-{:06}", Utc::now().format("%Y"), serial)
}

/// Register a patient. Used by the REST endpoint and the realtime
/// `new_patient` path; a missing external id gets a generated one.
pub async fn insert_patient(pool: &SqlitePool, new: &NewPatient) -> Result<Patient> {
    let patient_id = new
        .patient_id
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(generate_patient_id);

    let result = sqlx::query(
        "INSERT INTO patients (
            patient_id, full_name, age, gender, blood_group,
            origin_state, origin_district, current_location,
            accommodation_type, room_occupancy, has_clean_water,
            toilet_access, abha_id, mobile, registered_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&patient_id)
    .bind(&new.full_name)
    .bind(new.age)
    .bind(&new.gender)
    .bind(&new.blood_group)
    .bind(&new.origin_state)
    .bind(&new.origin_district)
    .bind(&new.current_location)
    .bind(&new.accommodation_type)
    .bind(new.room_occupancy)
    .bind(new.has_clean_water)
    .bind(&new.toilet_access)
    .bind(&new.abha_id)
    .bind(&new.mobile)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    fetch_by_rowid(pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| StorageError::NotFound("inserted patient vanished".to_string()))
}

/// Deactivation stands in for deletion; the row and its children stay.
pub async fn deactivate_patient(pool: &SqlitePool, key: &str) -> Result<()> {
    let patient = get_patient(pool, key).await?;
    sqlx::query("UPDATE patients SET is_active = 0 WHERE id = ?")
        .bind(patient.id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Link the external health id and stamp the link time.
pub async fn link_abha(pool: &SqlitePool, id: i64, abha_id: &str) -> Result<Patient> {
    let result = sqlx::query(
        "UPDATE patients SET abha_id = ?, abdm_linked = 1, abdm_linked_at = ? WHERE id = ?",
    )
    .bind(abha_id)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::NotFound(format!("Patient {} not found", id)));
    }
    fetch_by_rowid(pool, id)
        .await?
        .ok_or_else(|| StorageError::NotFound(format!("Patient {} not found", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::init_schema;
    use crate::{clinical, connect_memory};

    async fn pool_with_schema() -> SqlitePool {
        let pool = connect_memory().await.unwrap();
        init_schema(&pool).await.unwrap();
        pool
    }

    fn patient(name: &str, district: &str) -> NewPatient {
        NewPatient {
            full_name: name.to_string(),
            current_location: Some(district.to_string()),
            mobile: Some("+91-9876543210".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn registered_patient_is_retrievable_by_list_and_detail() {
        let pool = pool_with_schema().await;
        let created = insert_patient(&pool, &patient("Suman Devi", "Wayanad"))
            .await
            .unwrap();
        assert!(created.patient_id.starts_with("KDH-"));
        assert!(created.is_active);

        let page = list_patients(&pool, &PatientFilter::default().sanitize())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.patients[0].patient.patient_id, created.patient_id);

        // Detail lookup works by rowid and by the external id string.
        let by_rowid = get_patient(&pool, &created.id.to_string()).await.unwrap();
        assert_eq!(by_rowid.full_name, "Suman Devi");
        let by_external = get_patient(&pool, &created.patient_id).await.unwrap();
        assert_eq!(by_external.id, created.id);
    }

    #[tokio::test]
    async fn district_filter_matches_exactly() {
        let pool = pool_with_schema().await;
        insert_patient(&pool, &patient("A", "Wayanad")).await.unwrap();
        insert_patient(&pool, &patient("B", "Ernakulam")).await.unwrap();
        insert_patient(&pool, &patient("C", "Wayanad North")).await.unwrap();

        let filter = PatientFilter {
            location: Some("Wayanad".to_string()),
            ..Default::default()
        }
        .sanitize();
        let page = list_patients(&pool, &filter).await.unwrap();
        assert_eq!(page.patients.len(), 1);
        assert_eq!(
            page.patients[0].patient.current_location.as_deref(),
            Some("Wayanad")
        );
    }

    #[tokio::test]
    async fn all_districts_sentinel_disables_the_filter() {
        let pool = pool_with_schema().await;
        insert_patient(&pool, &patient("A", "Wayanad")).await.unwrap();
        insert_patient(&pool, &patient("B", "Ernakulam")).await.unwrap();

        let filter = PatientFilter {
            location: Some("All Districts".to_string()),
            ..Default::default()
        }
        .sanitize();
        let page = list_patients(&pool, &filter).await.unwrap();
        assert_eq!(page.patients.len(), 2);
    }

    #[tokio::test]
    async fn search_matches_name_external_id_and_mobile() {
        let pool = pool_with_schema().await;
        let mut new = patient("Ramesh Soren", "Idukki");
        new.patient_id = Some("KDH-2025-009999".to_string());
        new.mobile = Some("+91-9000000001".to_string());
        insert_patient(&pool, &new).await.unwrap();
        insert_patient(&pool, &patient("Gita Rani", "Idukki")).await.unwrap();

        for term in ["Soren", "009999", "9000000001"] {
            let filter = PatientFilter {
                search: Some(term.to_string()),
                ..Default::default()
            }
            .sanitize();
            let page = list_patients(&pool, &filter).await.unwrap();
            assert_eq!(page.patients.len(), 1, "term {:?}", term);
            assert_eq!(page.patients[0].patient.full_name, "Ramesh Soren");
        }
    }

    #[tokio::test]
    async fn disease_filter_uses_condition_subquery() {
        let pool = pool_with_schema().await;
        let sick = insert_patient(&pool, &patient("A", "Wayanad")).await.unwrap();
        insert_patient(&pool, &patient("B", "Wayanad")).await.unwrap();
        clinical::insert_condition(&pool, sick.id, "Asthma", Some("J45"), Some("Mild"), Some("2024-11-15"), true)
            .await
            .unwrap();

        let filter = PatientFilter {
            disease: Some("Asthma".to_string()),
            ..Default::default()
        }
        .sanitize();
        let page = list_patients(&pool, &filter).await.unwrap();
        assert_eq!(page.patients.len(), 1);
        assert_eq!(page.patients[0].patient.id, sick.id);
        assert_eq!(page.patients[0].conditions_count, 1);
    }

    #[tokio::test]
    async fn role_scope_pins_the_district() {
        let pool = pool_with_schema().await;
        insert_patient(&pool, &patient("A", "Wayanad")).await.unwrap();
        insert_patient(&pool, &patient("B", "Ernakulam")).await.unwrap();

        let filter = PatientFilter {
            scope: Some("Wayanad".to_string()),
            ..Default::default()
        }
        .sanitize();
        let page = list_patients(&pool, &filter).await.unwrap();
        assert_eq!(page.patients.len(), 1);
    }

    #[tokio::test]
    async fn pagination_is_consistent_with_total() {
        let pool = pool_with_schema().await;
        for i in 0..25 {
            insert_patient(&pool, &patient(&format!("P{}", i), "Kollam"))
                .await
                .unwrap();
        }

        let filter = PatientFilter {
            page: 2,
            limit: 10,
            ..Default::default()
        }
        .sanitize();
        let page = list_patients(&pool, &filter).await.unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.patients.len(), 10);

        let last = list_patients(
            &pool,
            &PatientFilter {
                page: 3,
                limit: 10,
                ..Default::default()
            }
            .sanitize(),
        )
        .await
        .unwrap();
        assert_eq!(last.patients.len(), 5);
    }

    #[test]
    fn malformed_pagination_coerces_to_defaults() {
        assert_eq!(coerce_pagination(None, None), (1, 20));
        assert_eq!(coerce_pagination(Some("abc"), Some("-5")), (1, 20));
        assert_eq!(coerce_pagination(Some("0"), Some("0")), (1, 20));
        assert_eq!(coerce_pagination(Some("3"), Some("50")), (3, 50));
    }

    #[tokio::test]
    async fn deactivated_patients_drop_out_of_the_list() {
        let pool = pool_with_schema().await;
        let p = insert_patient(&pool, &patient("Gone", "Kannur")).await.unwrap();
        deactivate_patient(&pool, &p.id.to_string()).await.unwrap();

        let page = list_patients(&pool, &PatientFilter::default().sanitize())
            .await
            .unwrap();
        assert_eq!(page.total, 0);
        // The row itself survives; only the flag flips.
        let row = get_patient(&pool, &p.id.to_string()).await.unwrap();
        assert!(!row.is_active);
    }

    #[tokio::test]
    async fn link_abha_sets_id_and_timestamp() {
        let pool = pool_with_schema().await;
        let p = insert_patient(&pool, &patient("Linked", "Thrissur")).await.unwrap();
        let updated = link_abha(&pool, p.id, "34-8821-4432-4221").await.unwrap();
        assert_eq!(updated.abha_id.as_deref(), Some("34-8821-4432-4221"));
        assert!(updated.abdm_linked);
        assert!(updated.abdm_linked_at.is_some());

        assert!(matches!(
            link_abha(&pool, 9999, "x").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn missing_patient_is_a_not_found_error() {
        let pool = pool_with_schema().await;
        assert!(matches!(
            get_patient(&pool, "KDH-0000-000000").await,
            Err(StorageError::NotFound(_))
        ));
    }
}

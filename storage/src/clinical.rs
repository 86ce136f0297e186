// storage/src/clinical.rs
//
// Flat clinical sub-records: conditions, schemes, labs, prescriptions,
// referrals, consents. List-mostly; inserts exist for the handlers that
// need them and for the demo seeder.

use chrono::Utc;
use sqlx::SqlitePool;

use models::{ConsentRequest, HealthCondition, LabReport, Prescription, Referral, Scheme};

use crate::Result;

pub async fn conditions_for(pool: &SqlitePool, patient_id: i64) -> Result<Vec<HealthCondition>> {
    let rows = sqlx::query_as::<_, HealthCondition>(
        "SELECT * FROM health_conditions WHERE patient_id = ?",
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn insert_condition(
    pool: &SqlitePool,
    patient_id: i64,
    condition_name: &str,
    icd_code: Option<&str>,
    severity: Option<&str>,
    diagnosed_date: Option<&str>,
    is_active: bool,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO health_conditions (patient_id, condition_name, icd_code, severity, diagnosed_date, is_active) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(patient_id)
    .bind(condition_name)
    .bind(icd_code)
    .bind(severity)
    .bind(diagnosed_date)
    .bind(is_active)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn schemes_for(pool: &SqlitePool, patient_id: i64) -> Result<Vec<Scheme>> {
    let rows = sqlx::query_as::<_, Scheme>("SELECT * FROM patient_schemes WHERE patient_id = ?")
        .bind(patient_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn insert_scheme(
    pool: &SqlitePool,
    patient_id: i64,
    scheme_name: &str,
    enrollment_status: &str,
    policy_id: &str,
    coverage_amount: i64,
    valid_until: Option<&str>,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO patient_schemes (patient_id, scheme_name, enrollment_status, policy_id, coverage_amount, valid_until) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(patient_id)
    .bind(scheme_name)
    .bind(enrollment_status)
    .bind(policy_id)
    .bind(coverage_amount)
    .bind(valid_until)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn labs_for(pool: &SqlitePool, patient_id: i64) -> Result<Vec<LabReport>> {
    let rows = sqlx::query_as::<_, LabReport>(
        "SELECT * FROM lab_reports WHERE patient_id = ? ORDER BY test_date DESC",
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_lab(
    pool: &SqlitePool,
    patient_id: i64,
    visit_id: Option<i64>,
    test_name: &str,
    result_value: Option<&str>,
    reference_range: Option<&str>,
    status: Option<&str>,
    test_date: Option<&str>,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO lab_reports (patient_id, visit_id, test_name, result, reference_range, status, test_date) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(patient_id)
    .bind(visit_id)
    .bind(test_name)
    .bind(result_value)
    .bind(reference_range)
    .bind(status)
    .bind(test_date)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn prescriptions_for(pool: &SqlitePool, patient_id: i64) -> Result<Vec<Prescription>> {
    let rows = sqlx::query_as::<_, Prescription>(
        "SELECT * FROM prescriptions WHERE patient_id = ? ORDER BY prescribed_date DESC",
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_prescription(
    pool: &SqlitePool,
    patient_id: i64,
    visit_id: Option<i64>,
    medicine_name: &str,
    dosage: Option<&str>,
    frequency: Option<&str>,
    duration: Option<&str>,
    instructions: Option<&str>,
    prescribed_date: Option<&str>,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO prescriptions (patient_id, visit_id, medicine_name, dosage, frequency, duration, instructions, prescribed_date) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(patient_id)
    .bind(visit_id)
    .bind(medicine_name)
    .bind(dosage)
    .bind(frequency)
    .bind(duration)
    .bind(instructions)
    .bind(prescribed_date)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn referrals_for(pool: &SqlitePool, patient_id: i64) -> Result<Vec<Referral>> {
    let rows = sqlx::query_as::<_, Referral>(
        "SELECT * FROM referrals WHERE patient_id = ? ORDER BY referral_date DESC",
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_referral(
    pool: &SqlitePool,
    patient_id: i64,
    visit_id: Option<i64>,
    to_facility: &str,
    reason: Option<&str>,
    priority: Option<&str>,
    status: Option<&str>,
    referral_date: Option<&str>,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO referrals (patient_id, visit_id, to_facility, reason, priority, status, referral_date) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(patient_id)
    .bind(visit_id)
    .bind(to_facility)
    .bind(reason)
    .bind(priority)
    .bind(status)
    .bind(referral_date)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn consents_for(pool: &SqlitePool, patient_id: i64) -> Result<Vec<ConsentRequest>> {
    let rows = sqlx::query_as::<_, ConsentRequest>(
        "SELECT * FROM abdm_consent_requests WHERE patient_id = ? ORDER BY created_at DESC",
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn insert_consent(
    pool: &SqlitePool,
    patient_id: i64,
    requester: &str,
    purpose: &str,
    status: &str,
    expiry: Option<&str>,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO abdm_consent_requests (patient_id, requester, purpose, status, expiry, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(patient_id)
    .bind(requester)
    .bind(purpose)
    .bind(status)
    .bind(expiry)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
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
                full_name: "Clinical Target".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        (pool, p.id)
    }

    #[tokio::test]
    async fn labs_order_newest_first() {
        let (pool, pid) = pool_with_patient().await;
        insert_lab(&pool, pid, None, "HbA1c", Some("6.2%"), Some("4.0-5.6%"), Some("ABNORMAL"), Some("2024-12-10"))
            .await
            .unwrap();
        insert_lab(&pool, pid, None, "Chest X-Ray", Some("Clear lungs"), None, Some("NORMAL"), Some("2024-12-11"))
            .await
            .unwrap();

        let labs = labs_for(&pool, pid).await.unwrap();
        assert_eq!(labs.len(), 2);
        assert_eq!(labs[0].test_name, "Chest X-Ray");
        assert_eq!(labs[1].reference_range.as_deref(), Some("4.0-5.6%"));
    }

    #[tokio::test]
    async fn sub_records_stay_scoped_to_their_patient() {
        let (pool, pid) = pool_with_patient().await;
        let other = insert_patient(
            &pool,
            &NewPatient {
                full_name: "Other".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        insert_prescription(&pool, pid, None, "Salbutamol Inhaler", Some("100mcg"), Some("PRN"), Some("30 days"), None, Some("2024-12-10"))
            .await
            .unwrap();
        insert_referral(&pool, other.id, None, "District Hospital Wayanad", Some("Specialist consultation"), Some("MEDIUM"), Some("PENDING"), Some("2024-12-12"))
            .await
            .unwrap();

        assert_eq!(prescriptions_for(&pool, pid).await.unwrap().len(), 1);
        assert!(prescriptions_for(&pool, other.id).await.unwrap().is_empty());
        assert_eq!(referrals_for(&pool, other.id).await.unwrap().len(), 1);
        assert!(referrals_for(&pool, pid).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn consents_carry_a_creation_timestamp() {
        let (pool, pid) = pool_with_patient().await;
        insert_consent(&pool, pid, "District Hospital", "Referral review", "REQUESTED", Some("2026-01-01"))
            .await
            .unwrap();

        let consents = consents_for(&pool, pid).await.unwrap();
        assert_eq!(consents.len(), 1);
        assert_eq!(consents[0].status.as_deref(), Some("REQUESTED"));
    }
}

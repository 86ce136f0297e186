// storage/src/schema.rs
//
// DDL for the ten portal tables. No foreign-key cascade rules and no
// uniqueness constraints beyond the rowid — children are only ever removed
// by the bulk wipe during reseeding.

use sqlx::SqlitePool;

use crate::Result;

/// Drop order matters only cosmetically; SQLite enforces no references here.
pub const TABLES: &[&str] = &[
    "visit_attachments",
    "patient_visits",
    "vaccinations",
    "health_conditions",
    "patient_schemes",
    "lab_reports",
    "prescriptions",
    "referrals",
    "abdm_consent_requests",
    "patients",
];

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS patients (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        patient_id TEXT NOT NULL,
        full_name TEXT NOT NULL,
        age INTEGER,
        gender TEXT,
        blood_group TEXT,
        origin_state TEXT,
        origin_district TEXT,
        current_location TEXT,
        accommodation_type TEXT,
        room_occupancy INTEGER,
        has_clean_water INTEGER,
        toilet_access TEXT,
        abha_id TEXT,
        abdm_linked INTEGER NOT NULL DEFAULT 0,
        abdm_linked_at TEXT,
        mobile TEXT,
        registered_at TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1
    )",
    "CREATE TABLE IF NOT EXISTS health_conditions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        patient_id INTEGER NOT NULL,
        condition_name TEXT NOT NULL,
        icd_code TEXT,
        severity TEXT,
        diagnosed_date TEXT,
        is_active INTEGER NOT NULL DEFAULT 1
    )",
    "CREATE TABLE IF NOT EXISTS vaccinations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        patient_id INTEGER NOT NULL,
        vaccine_name TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'Pending',
        administered_date TEXT,
        batch_number TEXT,
        administrator_name TEXT,
        next_due_date TEXT,
        certificate_url TEXT
    )",
    "CREATE TABLE IF NOT EXISTS patient_schemes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        patient_id INTEGER NOT NULL,
        scheme_name TEXT NOT NULL,
        enrollment_status TEXT,
        policy_id TEXT,
        coverage_amount INTEGER,
        valid_until TEXT
    )",
    "CREATE TABLE IF NOT EXISTS patient_visits (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        patient_id INTEGER NOT NULL,
        visit_date TEXT,
        facility TEXT,
        chief_complaint TEXT,
        vitals TEXT,
        diagnosis TEXT,
        treatment_notes TEXT,
        follow_up_required INTEGER NOT NULL DEFAULT 0,
        follow_up_date TEXT
    )",
    "CREATE TABLE IF NOT EXISTS visit_attachments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        visit_id INTEGER NOT NULL,
        filename TEXT NOT NULL,
        file_type TEXT,
        file_url TEXT NOT NULL,
        file_size INTEGER
    )",
    "CREATE TABLE IF NOT EXISTS lab_reports (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        patient_id INTEGER NOT NULL,
        visit_id INTEGER,
        test_name TEXT NOT NULL,
        result TEXT,
        reference_range TEXT,
        status TEXT,
        test_date TEXT
    )",
    "CREATE TABLE IF NOT EXISTS prescriptions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        patient_id INTEGER NOT NULL,
        visit_id INTEGER,
        medicine_name TEXT NOT NULL,
        dosage TEXT,
        frequency TEXT,
        duration TEXT,
        instructions TEXT,
        prescribed_date TEXT
    )",
    "CREATE TABLE IF NOT EXISTS referrals (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        patient_id INTEGER NOT NULL,
        visit_id INTEGER,
        to_facility TEXT NOT NULL,
        reason TEXT,
        priority TEXT,
        status TEXT,
        referral_date TEXT
    )",
    "CREATE TABLE IF NOT EXISTS abdm_consent_requests (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        patient_id INTEGER NOT NULL,
        requester TEXT,
        purpose TEXT,
        status TEXT,
        expiry TEXT,
        created_at TEXT NOT NULL
    )",
];

pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    for stmt in SCHEMA {
        sqlx::query(stmt).execute(pool).await?;
    }
    Ok(())
}

/// Bulk wipe + recreate. Only the seeder calls this.
pub async fn reset_schema(pool: &SqlitePool) -> Result<()> {
    for table in TABLES {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await?;
    }
    init_schema(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect_memory;

    #[tokio::test]
    async fn schema_creates_and_resets() {
        let pool = connect_memory().await.unwrap();
        init_schema(&pool).await.unwrap();
        // Idempotent.
        init_schema(&pool).await.unwrap();

        sqlx::query("INSERT INTO patients (patient_id, full_name, registered_at) VALUES ('X', 'Y', '2025-01-01')")
            .execute(&pool)
            .await
            .unwrap();

        reset_schema(&pool).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM patients")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}

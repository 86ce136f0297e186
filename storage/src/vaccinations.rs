// storage/src/vaccinations.rs
use sqlx::SqlitePool;

use models::{Vaccination, VaccinationCompletion, VaccinationStatus};

use crate::{Result, StorageError};

/// Pending doses sort ahead of everything else, then by vaccine name.
pub async fn list_for(pool: &SqlitePool, patient_id: i64) -> Result<Vec<Vaccination>> {
    let rows = sqlx::query_as::<_, Vaccination>(
        "SELECT * FROM vaccinations WHERE patient_id = ? \
         ORDER BY CASE status WHEN 'Pending' THEN 1 ELSE 2 END, vaccine_name",
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Schedule a dose. The seeder also uses this for pre-completed entries.
pub async fn insert_vaccination(
    pool: &SqlitePool,
    patient_id: i64,
    vaccine_name: &str,
    status: VaccinationStatus,
    administered_date: Option<&str>,
    batch_number: Option<&str>,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO vaccinations (patient_id, vaccine_name, status, administered_date, batch_number) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(patient_id)
    .bind(vaccine_name)
    .bind(status.as_str())
    .bind(administered_date)
    .bind(batch_number)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Mark a dose administered: status flips to Completed and the supplied
/// administration details overwrite whatever was there (last write wins).
pub async fn complete_vaccination(
    pool: &SqlitePool,
    vaccination_id: i64,
    completion: &VaccinationCompletion,
) -> Result<()> {
    let result = sqlx::query(
        "UPDATE vaccinations SET \
            status = 'Completed', \
            administered_date = ?, \
            batch_number = ?, \
            administrator_name = ?, \
            next_due_date = ?, \
            certificate_url = ? \
         WHERE id = ?",
    )
    .bind(&completion.administered_date)
    .bind(&completion.batch_number)
    .bind(&completion.administrator_name)
    .bind(&completion.next_due_date)
    .bind(&completion.certificate_url)
    .bind(vaccination_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::NotFound(format!(
            "Vaccination {} not found",
            vaccination_id
        )));
    }
    Ok(())
}

// vaccination.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Vaccination schedule entry. Seeded as Pending and flipped to Completed by
/// the completion endpoint; last write wins.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Vaccination {
    pub id: i64,
    pub patient_id: i64,
    pub vaccine_name: String,
    pub status: String,
    pub administered_date: Option<String>,
    pub batch_number: Option<String>,
    pub administrator_name: Option<String>,
    pub next_due_date: Option<String>,
    pub certificate_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaccinationStatus {
    Pending,
    Completed,
}

impl VaccinationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VaccinationStatus::Pending => "Pending",
            VaccinationStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for VaccinationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields supplied when a vaccine dose is administered.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationCompletion {
    pub administered_date: Option<String>,
    pub batch_number: Option<String>,
    pub administrator_name: Option<String>,
    pub next_due_date: Option<String>,
    pub certificate_url: Option<String>,
}

// prescription.rs
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Prescription {
    pub id: i64,
    pub patient_id: i64,
    pub visit_id: Option<i64>,
    pub medicine_name: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub instructions: Option<String>,
    pub prescribed_date: Option<String>,
}

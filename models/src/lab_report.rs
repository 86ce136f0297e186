// lab_report.rs
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct LabReport {
    pub id: i64,
    pub patient_id: i64,
    pub visit_id: Option<i64>,
    pub test_name: String,
    pub result: Option<String>,
    pub reference_range: Option<String>,
    pub status: Option<String>,
    pub test_date: Option<String>,
}

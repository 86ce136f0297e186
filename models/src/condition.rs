// condition.rs
use serde::Serialize;
use sqlx::FromRow;

/// Diagnosed health condition. `is_active` rows feed the dashboard alert
/// count and the per-patient condition counter.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct HealthCondition {
    pub id: i64,
    pub patient_id: i64,
    pub condition_name: String,
    pub icd_code: Option<String>,
    pub severity: Option<String>,
    pub diagnosed_date: Option<String>,
    pub is_active: bool,
}

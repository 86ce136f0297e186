// scheme.rs
use serde::Serialize;
use sqlx::FromRow;

/// Welfare scheme enrollment (patient_schemes table).
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Scheme {
    pub id: i64,
    pub patient_id: i64,
    pub scheme_name: String,
    pub enrollment_status: Option<String>,
    pub policy_id: Option<String>,
    pub coverage_amount: Option<i64>,
    pub valid_until: Option<String>,
}

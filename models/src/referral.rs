// referral.rs
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Referral {
    pub id: i64,
    pub patient_id: i64,
    pub visit_id: Option<i64>,
    pub to_facility: String,
    pub reason: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub referral_date: Option<String>,
}

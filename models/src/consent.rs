// consent.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// ABDM consent request (abdm_consent_requests table). Only ever listed;
/// rows come from the seeder or future integrations.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ConsentRequest {
    pub id: i64,
    pub patient_id: i64,
    pub requester: Option<String>,
    pub purpose: Option<String>,
    pub status: Option<String>,
    pub expiry: Option<String>,
    pub created_at: DateTime<Utc>,
}

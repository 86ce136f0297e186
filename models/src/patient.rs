// patient.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::condition::HealthCondition;
use crate::scheme::Scheme;
use crate::vaccination::Vaccination;
use crate::visit::VisitSummary;

/// A registered migrant worker. The root entity every clinical sub-record is
/// scoped to. Rows are never deleted; `is_active = false` stands in for
/// deactivation.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Patient {
    pub id: i64,
    /// External registry identifier, e.g. "KDH-2025-001234".
    pub patient_id: String,
    pub full_name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub origin_state: Option<String>,
    pub origin_district: Option<String>,
    pub current_location: Option<String>,
    pub accommodation_type: Option<String>,
    pub room_occupancy: Option<i64>,
    pub has_clean_water: Option<bool>,
    pub toilet_access: Option<String>,
    /// Optional external health-ID (ABHA) string.
    pub abha_id: Option<String>,
    pub abdm_linked: bool,
    pub abdm_linked_at: Option<DateTime<Utc>>,
    pub mobile: Option<String>,
    pub registered_at: DateTime<Utc>,
    pub is_active: bool,
}

/// List-view row: the patient plus the two correlated subquery counts the
/// records browser displays.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct PatientSummary {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub patient: Patient,
    pub conditions_count: i64,
    pub vaccines_completed: i64,
}

/// One page of the patient list endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientPage {
    pub patients: Vec<PatientSummary>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

/// Detail view: the patient row with its clinical sub-records attached.
#[derive(Debug, Clone, Serialize)]
pub struct PatientProfile {
    #[serde(flatten)]
    pub patient: Patient,
    pub health_conditions: Vec<HealthCondition>,
    pub vaccinations: Vec<Vaccination>,
    pub schemes: Vec<Scheme>,
    pub visits: Vec<VisitSummary>,
}

/// Registration payload, shared by the REST endpoint and the realtime
/// `new_patient` path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPatient {
    pub patient_id: Option<String>,
    pub full_name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub origin_state: Option<String>,
    pub origin_district: Option<String>,
    pub current_location: Option<String>,
    pub accommodation_type: Option<String>,
    pub room_occupancy: Option<i64>,
    pub has_clean_water: Option<bool>,
    pub toilet_access: Option<String>,
    pub abha_id: Option<String>,
    pub mobile: Option<String>,
}

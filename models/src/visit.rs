// visit.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A clinical encounter. Free-text complaint/diagnosis/notes plus a
/// JSON-serialized vitals blob; attachments are separate rows filled in by
/// the storage layer after the visit itself is loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visit {
    pub id: i64,
    pub patient_id: i64,
    pub visit_date: Option<String>,
    pub facility: Option<String>,
    pub chief_complaint: Option<String>,
    /// Parsed from the stored TEXT blob; a malformed blob is passed through
    /// as the raw string.
    pub vitals: Option<Value>,
    pub diagnosis: Option<String>,
    pub treatment_notes: Option<String>,
    pub follow_up_required: bool,
    pub follow_up_date: Option<String>,
    pub attachments: Vec<VisitAttachment>,
}

/// Summary row for the patient detail view (last five visits).
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct VisitSummary {
    pub id: i64,
    pub visit_date: Option<String>,
    pub diagnosis: Option<String>,
    pub facility: Option<String>,
}

/// Uploaded file stored alongside a visit. `file_url` points into the
/// statically served uploads directory.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct VisitAttachment {
    pub id: i64,
    pub visit_id: i64,
    pub filename: String,
    pub file_type: Option<String>,
    pub file_url: String,
    pub file_size: Option<i64>,
}

/// Fields of the add-visit form. The REST handler fills this from multipart
/// text fields; files ride separately.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVisit {
    pub visit_date: Option<String>,
    pub facility: Option<String>,
    pub chief_complaint: Option<String>,
    /// Stored verbatim as the JSON text the client sent.
    pub vitals: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment_notes: Option<String>,
    pub follow_up_required: bool,
    pub follow_up_date: Option<String>,
}

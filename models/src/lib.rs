// models/src/lib.rs
//
// Row-level types shared by the storage and REST layers. Every record is a
// flat relational row scoped to a patient; no invariants are enforced here
// beyond what the column types express.

pub mod consent;
pub mod condition;
pub mod lab_report;
pub mod patient;
pub mod prescription;
pub mod referral;
pub mod scheme;
pub mod user;
pub mod vaccination;
pub mod visit;

pub use consent::ConsentRequest;
pub use condition::HealthCondition;
pub use lab_report::LabReport;
pub use patient::{NewPatient, Patient, PatientPage, PatientProfile, PatientSummary};
pub use prescription::Prescription;
pub use referral::Referral;
pub use scheme::Scheme;
pub use user::{DemoUser, PublicUser};
pub use vaccination::{Vaccination, VaccinationCompletion, VaccinationStatus};
pub use visit::{NewVisit, Visit, VisitAttachment, VisitSummary};

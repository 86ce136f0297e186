// storage/src/seed.rs
//
// Demo data generator: wipes the schema and repopulates it with 25 patients
// plus conditions, vaccination schedules, schemes and visits. The first
// patient is fixed so the demo lab reports, prescriptions and referral are
// always present; the rest are randomized from the pools below.

use chrono::{Duration, Utc};
use rand::Rng;
use sqlx::SqlitePool;
use tracing::info;

use models::{NewVisit, VaccinationStatus};

use crate::{clinical, schema, vaccinations, visits, Result};

const ORIGINS: &[(&str, &[&str])] = &[
    ("Bihar", &["Patna", "Gaya", "Bhagalpur"]),
    ("Jharkhand", &["Ranchi", "Dhanbad", "Jamshedpur"]),
    ("West Bengal", &["Kolkata", "Howrah", "Siliguri"]),
    ("Odisha", &["Bhubaneswar", "Cuttack", "Rourkela"]),
    ("Assam", &["Guwahati", "Dibrugarh", "Silchar"]),
    ("Uttar Pradesh", &["Lucknow", "Kanpur", "Varanasi"]),
    ("Rajasthan", &["Jaipur", "Jodhpur", "Udaipur"]),
];

const KERALA_DISTRICTS: &[&str] = &[
    "Thiruvananthapuram",
    "Kollam",
    "Pathanamthitta",
    "Alappuzha",
    "Kottayam",
    "Idukki",
    "Ernakulam",
    "Thrissur",
    "Palakkad",
    "Malappuram",
    "Kozhikode",
    "Wayanad",
    "Kannur",
    "Kasaragod",
];

const ACCOMMODATION_TYPES: &[&str] = &[
    "Rented Shared Unit",
    "Employer Quarters",
    "Makeshift Shelter",
    "Labour Camps",
];

const TOILET_ACCESS: &[&str] = &["Personal", "Shared", "None"];

const BLOOD_GROUPS: &[&str] = &["A+", "A-", "B+", "B-", "O+", "O-", "AB+", "AB-"];

const WORKER_NAMES: &[&str] = &[
    "Rajesh Kumar", "Suman Devi", "Amit Singh", "Priya Das", "Manoj Yadav",
    "Anita Murmu", "Subhash Chandra", "Gita Rani", "Vikram Meena", "Pooja Sharma",
    "Ramesh Soren", "Laxmi Kumari", "Sanjay Mahato", "Deepika Roy", "Suresh Ali",
    "Rina Khatun", "Mohammad Azad", "Sunita Bouri", "Arun Tudu", "Kabita Barua",
    "Bikram Singh", "Mousumi Begum", "Suraj Pal", "Nilam Devi",
];

const VACCINES: &[&str] = &["COVID-19", "Hepatitis B", "Tetanus", "MMR", "Influenza"];

struct SeedPatient {
    patient_id: String,
    full_name: String,
    age: i64,
    gender: String,
    blood_group: String,
    origin_state: String,
    origin_district: String,
    current_location: String,
    accommodation_type: String,
    room_occupancy: i64,
    has_clean_water: bool,
    toilet_access: String,
    abha_id: Option<String>,
    mobile: String,
    registered_days_ago: i64,
}

fn canonical_first_patient() -> SeedPatient {
    SeedPatient {
        patient_id: "KDH-2025-001234".to_string(),
        full_name: "Imran Kumar".to_string(),
        age: 39,
        gender: "Female".to_string(),
        blood_group: "AB-".to_string(),
        origin_state: "Jharkhand".to_string(),
        origin_district: "Ranchi".to_string(),
        current_location: "Wayanad".to_string(),
        accommodation_type: "Rented Shared Unit".to_string(),
        room_occupancy: 8,
        has_clean_water: true,
        toilet_access: "Shared".to_string(),
        abha_id: Some("34-8821-4432-4221".to_string()),
        mobile: "+91-9876543210".to_string(),
        registered_days_ago: 20,
    }
}

fn random_patient(index: usize, rng: &mut impl Rng) -> SeedPatient {
    let (state, districts) = ORIGINS[rng.gen_range(0..ORIGINS.len())];
    let abha_id = if rng.gen_bool(0.7) {
        Some(format!(
            "{}-{}-{}-{}",
            rng.gen_range(10..100),
            rng.gen_range(1000..10000),
            rng.gen_range(1000..10000),
            rng.gen_range(1000..10000),
        ))
    } else {
        None
    };

    SeedPatient {
        patient_id: format!("KDH-2025-00{}", 1234 + index),
        full_name: WORKER_NAMES[index - 1].to_string(),
        age: rng.gen_range(18..=58),
        gender: if rng.gen_bool(0.6) { "Male" } else { "Female" }.to_string(),
        blood_group: BLOOD_GROUPS[rng.gen_range(0..BLOOD_GROUPS.len())].to_string(),
        origin_state: state.to_string(),
        origin_district: districts[rng.gen_range(0..districts.len())].to_string(),
        current_location: KERALA_DISTRICTS[index % KERALA_DISTRICTS.len()].to_string(),
        accommodation_type: ACCOMMODATION_TYPES[rng.gen_range(0..ACCOMMODATION_TYPES.len())]
            .to_string(),
        room_occupancy: rng.gen_range(2..=12),
        has_clean_water: rng.gen_bool(0.7),
        toilet_access: TOILET_ACCESS[rng.gen_range(0..TOILET_ACCESS.len())].to_string(),
        abha_id,
        mobile: format!("+91-{}", rng.gen_range(6_000_000_000u64..10_000_000_000)),
        registered_days_ago: rng.gen_range(0..60),
    }
}

async fn insert_seed_patient(pool: &SqlitePool, p: &SeedPatient) -> Result<i64> {
    let registered_at = Utc::now() - Duration::days(p.registered_days_ago);
    let result = sqlx::query(
        "INSERT INTO patients (
            patient_id, full_name, age, gender, blood_group,
            origin_state, origin_district, current_location,
            accommodation_type, room_occupancy, has_clean_water,
            toilet_access, abha_id, mobile, registered_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&p.patient_id)
    .bind(&p.full_name)
    .bind(p.age)
    .bind(&p.gender)
    .bind(&p.blood_group)
    .bind(&p.origin_state)
    .bind(&p.origin_district)
    .bind(&p.current_location)
    .bind(&p.accommodation_type)
    .bind(p.room_occupancy)
    .bind(p.has_clean_water)
    .bind(&p.toilet_access)
    .bind(&p.abha_id)
    .bind(&p.mobile)
    .bind(registered_at)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

async fn seed_clinical_records(
    pool: &SqlitePool,
    patient_rowid: i64,
    is_canonical: bool,
    rng: &mut impl Rng,
) -> Result<()> {
    // Conditions.
    if is_canonical {
        clinical::insert_condition(pool, patient_rowid, "Asthma", Some("J45"), Some("Moderate"), Some("2024-12-10"), true)
            .await?;
    } else {
        let r: f64 = rng.gen_range(0.0..1.0);
        if r < 0.3 {
            clinical::insert_condition(pool, patient_rowid, "Asthma", Some("J45"), Some("Mild"), Some("2024-11-15"), true)
                .await?;
        } else if r < 0.45 {
            clinical::insert_condition(pool, patient_rowid, "Diabetes Type 2", Some("E11"), Some("Moderate"), Some("2024-10-20"), true)
                .await?;
        }
    }

    // Vaccination schedule: every vaccine, roughly 60% already administered.
    for vaccine in VACCINES {
        let completed = rng.gen_bool(0.6);
        let (status, date, batch) = if completed {
            (VaccinationStatus::Completed, Some("2024-06-01"), Some("VAC-123"))
        } else {
            (VaccinationStatus::Pending, None, None)
        };
        vaccinations::insert_vaccination(pool, patient_rowid, vaccine, status, date, batch).await?;
    }

    // Schemes.
    clinical::insert_scheme(pool, patient_rowid, "Kerala Awaz Protection", "ACTIVE", "KA-44221", 500_000, Some("2025-12-31"))
        .await?;
    if is_canonical {
        clinical::insert_scheme(pool, patient_rowid, "AB-PMJAY", "PENDING_ASSESSMENT", "PMJAY-999", 500_000, None)
            .await?;
    }

    // Visits, with the demo lab/prescription/referral set on the canonical
    // patient's visit.
    if is_canonical || rng.gen_bool(0.4) {
        let visit_id = visits::insert_visit(
            pool,
            patient_rowid,
            &NewVisit {
                visit_date: Some(Utc::now().to_rfc3339()),
                facility: Some("PHC Wayanad".to_string()),
                chief_complaint: Some("Breathing difficulty".to_string()),
                vitals: Some(r#"{"temp":98.6,"bp":"120/80","spo2":96}"#.to_string()),
                diagnosis: Some("Asthma Exacerbation".to_string()),
                ..Default::default()
            },
        )
        .await?;

        if is_canonical {
            clinical::insert_lab(pool, patient_rowid, Some(visit_id), "HbA1c", Some("6.2%"), Some("4.0-5.6%"), Some("ABNORMAL"), Some("2024-12-10"))
                .await?;
            clinical::insert_lab(pool, patient_rowid, Some(visit_id), "Chest X-Ray", Some("Clear lungs"), None, Some("NORMAL"), Some("2024-12-11"))
                .await?;
            clinical::insert_prescription(pool, patient_rowid, Some(visit_id), "Salbutamol Inhaler", Some("100mcg"), Some("PRN"), Some("30 days"), Some("Inhale during breathlessness"), Some("2024-12-10"))
                .await?;
            clinical::insert_prescription(pool, patient_rowid, Some(visit_id), "Cetirizine", Some("10mg"), Some("Once Daily"), Some("10 days"), None, Some("2024-12-10"))
                .await?;
            clinical::insert_referral(pool, patient_rowid, Some(visit_id), "District Hospital Wayanad", Some("Specialist consultation for Asthma"), Some("MEDIUM"), Some("PENDING"), Some("2024-12-12"))
                .await?;
            clinical::insert_consent(pool, patient_rowid, "District Hospital Wayanad", "Specialist referral review", "REQUESTED", Some("2026-06-30"))
                .await?;
        }
    }

    Ok(())
}

/// Wipe everything and repopulate the demo dataset.
pub async fn seed_demo(pool: &SqlitePool) -> Result<usize> {
    info!("resetting schema and seeding demo data");
    schema::reset_schema(pool).await?;

    let mut rng = rand::thread_rng();
    let mut seeded = 0usize;

    for index in 0..25 {
        let seed = if index == 0 {
            canonical_first_patient()
        } else {
            random_patient(index, &mut rng)
        };
        let rowid = insert_seed_patient(pool, &seed).await?;
        seed_clinical_records(pool, rowid, index == 0, &mut rng).await?;
        seeded += 1;
    }

    info!(patients = seeded, "demo seed complete");
    Ok(seeded)
}

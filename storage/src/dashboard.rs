// storage/src/dashboard.rs
//
// On-demand aggregates for the dashboard. The coverage figure assumes a
// three-dose expected schedule per active patient; the vaccination
// distribution and disease trend series are fixed demo curves.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_migrants: i64,
    /// Percent of the expected dose count (active patients × 3).
    pub vaccination_coverage: i64,
    pub unique_locations: i64,
    pub active_alerts: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct LocationStat {
    pub name: Option<String>,
    pub count: i64,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSlice {
    pub name: &'static str,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub name: &'static str,
    pub month: &'static str,
    pub cases: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub location_data: Vec<LocationStat>,
    pub vaccination_data: Vec<DistributionSlice>,
    pub disease_trends: Vec<TrendPoint>,
}

pub async fn metrics(pool: &SqlitePool) -> Result<DashboardMetrics> {
    let total_migrants: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM patients WHERE is_active = 1")
            .fetch_one(pool)
            .await?;
    let completed: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM vaccinations WHERE status = 'Completed'")
            .fetch_one(pool)
            .await?;
    let unique_locations: i64 =
        sqlx::query_scalar("SELECT COUNT(DISTINCT current_location) FROM patients")
            .fetch_one(pool)
            .await?;
    let active_alerts: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM health_conditions WHERE is_active = 1")
            .fetch_one(pool)
            .await?;

    let expected = total_migrants * 3;
    let vaccination_coverage = if expected > 0 {
        ((completed as f64 / expected as f64) * 100.0).round() as i64
    } else {
        0
    };

    Ok(DashboardMetrics {
        total_migrants,
        vaccination_coverage,
        unique_locations,
        active_alerts,
    })
}

pub async fn charts(pool: &SqlitePool) -> Result<ChartData> {
    let location_data = sqlx::query_as::<_, LocationStat>(
        "SELECT current_location AS name, COUNT(*) AS count, 85 AS score \
         FROM patients GROUP BY current_location LIMIT 5",
    )
    .fetch_all(pool)
    .await?;

    let vaccination_data = vec![
        DistributionSlice { name: "Fully Vaccinated", value: 65 },
        DistributionSlice { name: "Partial", value: 25 },
        DistributionSlice { name: "Pending", value: 10 },
    ];

    let disease_trends = [
        ("Jun", 12),
        ("Jul", 19),
        ("Aug", 15),
        ("Sep", 22),
        ("Oct", 30),
        ("Nov", 25),
        ("Dec", 28),
    ]
    .into_iter()
    .map(|(month, cases)| TrendPoint { name: month, month, cases })
    .collect();

    Ok(ChartData {
        location_data,
        vaccination_data,
        disease_trends,
    })
}

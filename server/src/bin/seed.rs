// server/src/bin/seed.rs
//
// Wipe the database and load the demo dataset. Run before demos:
//
//     cargo run --bin seed

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rest_api::load_api_config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_api_config();
    let pool = storage::connect(&config.database_path).await?;
    let patients = storage::seed::seed_demo(&pool).await?;
    info!(patients, database = %config.database_path, "demo data seeded");
    Ok(())
}

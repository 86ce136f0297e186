// server/src/main.rs

use anyhow::Result;
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
    rest_api::start_server(config).await
}

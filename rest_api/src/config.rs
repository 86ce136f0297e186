// rest_api/src/config.rs

use std::env;
use std::path::PathBuf;

use security::oauth::GoogleOAuth;

/// Server configuration, environment-driven with demo-friendly defaults.
/// `.env` is loaded by the binary before this runs.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub uploads_dir: PathBuf,
    /// Absolute URL prefix baked into stored attachment links.
    pub public_base_url: String,
    /// Where the OAuth callback redirects the browser back to.
    pub frontend_url: String,
    pub oauth: GoogleOAuth,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn load_api_config() -> ApiConfig {
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let public_base_url = env_or("PUBLIC_BASE_URL", "http://localhost:5000");

    ApiConfig {
        host: env_or("HOST", "0.0.0.0"),
        port,
        database_path: env_or("DATABASE_PATH", "database.sqlite"),
        uploads_dir: PathBuf::from(env_or("UPLOADS_DIR", "uploads")),
        oauth: GoogleOAuth::from_env(&public_base_url),
        public_base_url,
        frontend_url: env_or("FRONTEND_URL", "http://localhost:5173"),
    }
}

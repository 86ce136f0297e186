// rest_api/src/lib.rs

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod error;
pub mod handlers;
pub mod realtime;
pub mod uploads;

pub use config::{load_api_config, ApiConfig};
pub use error::ApiError;
pub use realtime::RealtimeEvent;

/// Broadcast buffer: a client further behind than this skips ahead.
const EVENT_BUFFER: usize = 64;

/// Shared state for the axum application.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<ApiConfig>,
    pub events: broadcast::Sender<RealtimeEvent>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: ApiConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        AppState {
            pool,
            config: Arc::new(config),
            events,
            http: reqwest::Client::new(),
        }
    }

    /// Fire-and-forget: with no connected clients the event is dropped.
    pub fn broadcast(&self, event: RealtimeEvent) {
        let _ = self.events.send(event);
    }
}

/// The complete portal router: REST endpoints, the uploads directory served
/// statically, and the realtime WebSocket.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/verify", post(handlers::auth::verify))
        .route("/api/auth/google", get(handlers::auth::google))
        .route("/api/auth/callback/google", get(handlers::auth::google_callback))
        .route(
            "/api/patients",
            get(handlers::patients::list).post(handlers::patients::create),
        )
        .route(
            "/api/patients/:id",
            get(handlers::patients::detail).delete(handlers::patients::deactivate),
        )
        .route(
            "/api/patients/:id/visits",
            get(handlers::visits::list).post(handlers::visits::add),
        )
        .route(
            "/api/patients/:id/vaccinations",
            get(handlers::vaccinations::list),
        )
        .route(
            "/api/patients/:id/vaccinations/:vid/complete",
            post(handlers::vaccinations::complete),
        )
        .route("/api/patients/:id/abha/qr", get(handlers::abha::qr))
        .route("/api/patients/:id/abha/link", post(handlers::abha::link))
        .route("/api/patients/:id/labs", get(handlers::clinical::labs))
        .route(
            "/api/patients/:id/prescriptions",
            get(handlers::clinical::prescriptions),
        )
        .route(
            "/api/patients/:id/referrals",
            get(handlers::clinical::referrals),
        )
        .route(
            "/api/patients/:id/consents",
            get(handlers::clinical::consents),
        )
        .route("/api/dashboard/metrics", get(handlers::dashboard::metrics))
        .route("/api/dashboard/charts", get(handlers::dashboard::charts))
        .route("/ws", get(realtime::ws_handler))
        .nest_service("/uploads", ServeDir::new(&state.config.uploads_dir))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn start_server(config: ApiConfig) -> anyhow::Result<()> {
    let pool = storage::connect(&config.database_path).await?;
    storage::schema::init_schema(&pool).await?;
    tokio::fs::create_dir_all(&config.uploads_dir).await?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let state = AppState::new(pool, config);
    let router = app(state);

    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "health portal API listening");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("health portal API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received shutdown signal");
    }
}

//! Signal Preview API Server
//!
//! HTTP boundary for the gated signal-enhancement demo. Holds the session
//! store and the configured limits/access code; every processing request is
//! gated here before the pipeline runs.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use uuid::Uuid;

use access_gate::{AccessGate, Session};

mod routes;
mod settings;

pub use settings::Settings;

/// Application state shared across handlers.
///
/// Settings and the gate are read-only after startup; only the session map
/// mutates, under the lock. Independent sessions hold no shared table state,
/// so concurrent uploads never contend beyond this map.
pub struct AppState {
    /// Server configuration, fixed at startup
    pub settings: Settings,
    /// Access-code gate built from the configured secret
    pub gate: AccessGate,
    /// Live sessions by token
    pub sessions: HashMap<Uuid, Session>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state from settings
    pub fn new(settings: Settings) -> Self {
        let gate = AccessGate::new(settings.access_code.clone());
        Self {
            settings,
            gate,
            sessions: HashMap::new(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Shared handle to the application state.
pub type SharedState = Arc<RwLock<AppState>>;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub active_sessions: usize,
}

/// Create the application router.
pub fn create_router(state: SharedState) -> Router {
    // uploads are size-checked against the configured ceiling inside the
    // pipeline; the body cap here only stops unbounded bodies early
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/limits", get(routes::limits::get_limits))
        .route("/api/v1/session", post(routes::session::create))
        .route("/api/v1/session/access", post(routes::session::access))
        .route("/api/v1/process", post(routes::process::process_upload))
        .layer(DefaultBodyLimit::max(8 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        active_sessions: state.sessions.len(),
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server
pub async fn run_server(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let bind_addr = settings.bind_addr.clone();
    let state = Arc::new(RwLock::new(AppState::new(settings)));
    let app = create_router(state);

    info!("Starting demo API server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

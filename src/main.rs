//! Exercise Tracker Backend
//!
//! A REST API for tracking users and their exercises.
//! Provides endpoints for creating users, logging exercises, and retrieving
//! filtered exercise logs.

mod api;
mod clock;
mod config;
mod error;
mod services;
mod state;
mod store;

use axum::{
    extract::Request,
    middleware::Next,
    response::{Html, Response},
    routing::{get, post},
    Json, Router,
};
use clock::SystemClock;
use config::Config;
use serde::Serialize;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use store::SqliteStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Landing page served at the root path
const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Exercise Tracker</title></head>
  <body>
    <h1>Exercise Tracker</h1>
    <p>POST /api/users with <code>{"username"}</code> to create a user.</p>
    <p>POST /api/users/{id}/exercises with <code>{"description", "duration", "date?"}</code> to log an exercise.</p>
    <p>GET /api/users/{id}/logs?from=&amp;to=&amp;limit= to retrieve a log.</p>
  </body>
</html>
"#;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Request ID middleware - adds unique ID to each request for tracing
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    let response = next.run(request).instrument(span).await;

    let duration = start.elapsed();
    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // Connect to storage and build the services
    let store = SqliteStore::new(&config.database.url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize storage: {}", e))?;
    let app_state = AppState::new(Arc::new(store), Arc::new(SystemClock));

    // Build our application with routes
    let app = Router::new()
        // Landing page and health check
        .route("/", get(landing_page))
        .route("/api/health", get(health_check))
        // User API
        .route(
            "/api/users",
            get(api::users::list_users).post(api::users::create_user),
        )
        // Exercise API
        .route("/api/users/:id/exercises", post(api::exercises::log_exercise))
        .route("/api/users/:id/logs", get(api::exercises::get_log))
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!("🚀 Server running on http://{}", addr);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

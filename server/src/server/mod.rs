//! HTTP/WebSocket server exposing the startup pipeline
//!
//! - `POST /api/agent/startup` runs a pipeline for a goal
//! - `GET /ws/events` streams progress events
//! - `GET /health`, `GET /api/version`

mod events;
pub mod routes;
pub mod state;

pub use events::{EventBroadcaster, ServerEvent};
pub use state::{ServerAppState, DEFAULT_MAX_CONCURRENT_RUNS};

use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderValue,
    },
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Version information for the server
#[derive(serde::Serialize)]
struct VersionInfo {
    version: String,
}

/// Build the CORS layer. Permissive unless explicit origins are given.
fn cors_layer(cors_origins: Option<&[String]>) -> CorsLayer {
    match cors_origins {
        Some(origins) if !origins.is_empty() => {
            let allowed_origins: Vec<HeaderValue> =
                origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods(Any)
                .allow_headers([CONTENT_TYPE, ACCEPT])
        }
        _ => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([CONTENT_TYPE, ACCEPT]),
    }
}

/// Build the application router
pub fn build_router(state: ServerAppState, cors_origins: Option<&[String]>) -> Router {
    Router::new()
        .route("/api/agent/startup", post(routes::agent_routes::startup_handler))
        .route("/ws/events", get(events::ws_handler))
        .route("/health", get(health_handler))
        .route("/api/version", get(version_handler))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

/// Run the HTTP/WebSocket server until shutdown is requested
pub async fn run_server(
    port: u16,
    bind: &str,
    state: ServerAppState,
    cors_origins: Option<Vec<String>>,
) -> Result<(), String> {
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    let cors_display = match &cors_origins {
        Some(origins) if !origins.is_empty() => origins.join(", "),
        _ => "*".to_string(),
    };

    let shutdown_state = state.shutdown_state.clone();
    let max_runs = state.max_concurrent_runs;
    let app = build_router(state, cors_origins.as_deref());

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Startup Agent Server                       ║");
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║  Server URL: http://{}:{:<24}  ║", bind, port);
    println!("║  CORS Origins: {:<45}║", cors_display);
    println!("║  Max concurrent runs: {:<38}║", max_runs);
    println!("║                                                               ║");
    println!("║  Endpoints:                                                   ║");
    println!("║    POST /api/agent/startup - Run startup pipeline            ║");
    println!("║    GET  /ws/events         - WebSocket progress events       ║");
    println!("║    GET  /api/version       - Server version info             ║");
    println!("║    GET  /health            - Health check                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_state.wait_for_shutdown())
        .await
        .map_err(|e| format!("Server error: {}", e))
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

/// Version endpoint
async fn version_handler() -> Json<VersionInfo> {
    Json(VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

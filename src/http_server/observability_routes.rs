//! Observability HTTP Routes
//!
//! Health check, database ping, and counters.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::DbPool;
use crate::observability::{Logger, MetricsRegistry};

use super::errors::MessageResponse;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Store ping response
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
}

/// Create observability routes
pub fn observability_routes(metrics: Arc<MetricsRegistry>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
}

/// Health and ping routes at root level
pub fn health_routes(pool: DbPool) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ping", get(ping_handler))
        .with_state(pool)
}

/// Liveness only; never touches the store
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Round-trips `SELECT 1` through the pool
async fn ping_handler(State(pool): State<DbPool>) -> Response {
    match pool.ping().await {
        Ok(()) => (StatusCode::OK, Json(PingResponse { status: "ok" })).into_response(),
        Err(e) => {
            let error = e.to_string();
            Logger::warn("PING_FAILED", &[("error", error.as_str())]);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(MessageResponse::new("Database unavailable")),
            )
                .into_response()
        }
    }
}

async fn metrics_handler(State(metrics): State<Arc<MetricsRegistry>>) -> impl IntoResponse {
    (StatusCode::OK, Json(metrics.snapshot()))
}

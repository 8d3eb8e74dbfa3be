//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::StatusCode, middleware, response::IntoResponse, Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::HttpServerConfig;
use super::employee_routes::{employee_routes, EmployeeState};
use super::errors::MessageResponse;
use super::observability_routes::{health_routes, observability_routes};
use super::request_log::request_log;
use crate::db::DbPool;
use crate::observability::{log_event, log_event_with_fields, Event, MetricsRegistry};

/// HTTP server for the employee API
pub struct HttpServer {
    config: HttpServerConfig,
    pool: DbPool,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new(pool: DbPool) -> Self {
        Self::with_config(HttpServerConfig::default(), pool)
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig, pool: DbPool) -> Self {
        let router = Self::build_router(&config, pool.clone());
        Self {
            config,
            pool,
            router,
        }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, pool: DbPool) -> Router {
        let metrics = Arc::new(MetricsRegistry::new());
        let employee_state = Arc::new(EmployeeState::new(pool.clone(), metrics.clone()));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes(pool))
            .nest("/api", employee_routes(employee_state))
            .nest("/observability", observability_routes(metrics.clone()))
            .fallback(fallback_handler)
            .layer(middleware::from_fn_with_state(metrics, request_log))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C, then drain in-flight requests and close the pool
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let addr_str = addr.to_string();
        log_event_with_fields(Event::ServerStart, &[("addr", addr_str.as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        self.pool.close().await;
        log_event(Event::ShutdownComplete);

        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        log_event(Event::ShutdownStart);
    }
}

async fn fallback_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse::new("Endpoint not found")),
    )
}

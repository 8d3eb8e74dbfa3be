//! # HTTP Server Module
//!
//! Combines the employee, health, and observability routers into one Axum
//! server.
//!
//! # Endpoints
//!
//! - `/health` - Liveness check
//! - `/ping` - Database round trip
//! - `/api/employees` - Employee CRUD
//! - `/observability/metrics` - Counters

pub mod config;
pub mod employee_routes;
pub mod errors;
pub mod observability_routes;
pub mod request_log;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, MessageResponse};
pub use server::HttpServer;

//! Shared harness for HTTP-level tests
//!
//! Each test gets its own in-memory SQLite database behind a one-connection
//! pool, and drives the real router with `oneshot`.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use employee_api::db::{DatabaseConfig, DbPool};
use employee_api::http_server::HttpServer;

pub const SCHEMA: &str =
    "CREATE TABLE employee (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT, salary REAL)";

pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
}

pub async fn spawn_app() -> TestApp {
    let config = DatabaseConfig {
        max_connections: 1,
        ..DatabaseConfig::with_url("sqlite::memory:")
    };
    let pool = DbPool::connect(&config).await.expect("memory database");
    pool.execute(SCHEMA, &[]).await.expect("schema");

    let router = HttpServer::new(pool.clone()).router();
    TestApp { router, pool }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.expect("infallible router")
    }

    /// Send a request with an optional raw body and decode the JSON reply.
    ///
    /// An empty reply decodes as `Value::Null`.
    pub async fn call(&self, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self.send(request).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.call("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call("POST", uri, Some(&body.to_string())).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call("PATCH", uri, Some(&body.to_string())).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call("PUT", uri, Some(&body.to_string())).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.call("DELETE", uri, None).await
    }

    /// Create an employee and return its id
    pub async fn create(&self, name: &str, salary: f64) -> i64 {
        let (status, body) = self
            .post(
                "/api/employees",
                serde_json::json!({ "name": name, "salary": salary }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body["id"].as_i64().expect("generated id")
    }
}

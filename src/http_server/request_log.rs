//! Request logging middleware
//!
//! Tags every response with an `x-request-id` and writes one
//! `HTTP_REQUEST` log line per request.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::observability::{Logger, MetricsRegistry};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn request_log(
    State(metrics): State<Arc<MetricsRegistry>>,
    request: Request,
    next: Next,
) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(request).await;

    let status = response.status();
    metrics.record_response(status);

    let elapsed_ms = started.elapsed().as_millis().to_string();
    let status_code = status.as_u16().to_string();
    let fields = [
        ("duration_ms", elapsed_ms.as_str()),
        ("method", method.as_str()),
        ("path", path.as_str()),
        ("request_id", request_id.as_str()),
        ("status", status_code.as_str()),
    ];
    if status.is_server_error() {
        Logger::warn("HTTP_REQUEST", &fields);
    } else {
        Logger::info("HTTP_REQUEST", &fields);
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}

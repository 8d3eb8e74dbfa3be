//! Request and store counters
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Relaxed atomics, no locks

use std::sync::atomic::{AtomicU64, Ordering};

use axum::http::StatusCode;
use serde::Serialize;

/// Registry of operational counters shared by all handlers
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Requests seen by the router
    requests_total: AtomicU64,
    /// Responses with a 2xx status
    responses_2xx: AtomicU64,
    /// Responses with a 4xx status
    responses_4xx: AtomicU64,
    /// Responses with a 5xx status
    responses_5xx: AtomicU64,
    /// Store failures caught at the handler boundary
    store_errors: AtomicU64,
    employees_created: AtomicU64,
    employees_updated: AtomicU64,
    employees_deleted: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished request by its response status
    pub fn record_response(&self, status: StatusCode) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);

        let counter = if status.is_success() {
            &self.responses_2xx
        } else if status.is_client_error() {
            &self.responses_4xx
        } else if status.is_server_error() {
            &self.responses_5xx
        } else {
            return;
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_store_errors(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_created(&self) {
        self.employees_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_updated(&self) {
        self.employees_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_deleted(&self) {
        self.employees_deleted.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            responses_2xx: self.responses_2xx.load(Ordering::Relaxed),
            responses_4xx: self.responses_4xx.load(Ordering::Relaxed),
            responses_5xx: self.responses_5xx.load(Ordering::Relaxed),
            store_errors: self.store_errors.load(Ordering::Relaxed),
            employees_created: self.employees_created.load(Ordering::Relaxed),
            employees_updated: self.employees_updated.load(Ordering::Relaxed),
            employees_deleted: self.employees_deleted.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub responses_2xx: u64,
    pub responses_4xx: u64,
    pub responses_5xx: u64,
    pub store_errors: u64,
    pub employees_created: u64,
    pub employees_updated: u64,
    pub employees_deleted: u64,
}

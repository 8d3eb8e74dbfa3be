//! Employee HTTP Routes
//!
//! One handler per operation, each a direct mapping from an HTTP verb to a
//! statement on the `employee` table.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::db::{DbError, DbPool};
use crate::employees::{Employee, EmployeeChanges, EmployeeRepository, NewEmployee};
use crate::observability::{Logger, MetricsRegistry};

use super::errors::{ApiError, ApiResult};

// ==================
// Shared State
// ==================

/// State shared across employee handlers
pub struct EmployeeState {
    pub repository: EmployeeRepository,
    pub metrics: Arc<MetricsRegistry>,
}

impl EmployeeState {
    pub fn new(pool: DbPool, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            repository: EmployeeRepository::new(pool),
            metrics,
        }
    }

    /// Log a store failure for `operation` and turn it into a 500
    fn store_failure(&self, operation: &str, err: DbError) -> ApiError {
        self.metrics.increment_store_errors();
        let error = err.to_string();
        Logger::error(
            "STORE_ERROR",
            &[("operation", operation), ("error", error.as_str())],
        );
        ApiError::Store(err)
    }
}

// ==================
// Employee Routes
// ==================

/// Create employee routes
pub fn employee_routes(state: Arc<EmployeeState>) -> Router {
    Router::new()
        .route(
            "/employees",
            get(list_employees_handler).post(create_employee_handler),
        )
        .route(
            "/employees/:id",
            get(get_employee_handler)
                .put(update_employee_handler)
                .patch(update_employee_handler)
                .delete(delete_employee_handler),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_employees_handler(
    State(state): State<Arc<EmployeeState>>,
) -> ApiResult<Json<Vec<Employee>>> {
    let employees = state
        .repository
        .list()
        .await
        .map_err(|e| state.store_failure("list", e))?;

    Ok(Json(employees))
}

async fn get_employee_handler(
    State(state): State<Arc<EmployeeState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Employee>> {
    let Path(id) = id?;

    let employee = state
        .repository
        .find(id)
        .await
        .map_err(|e| state.store_failure("get", e))?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(employee))
}

async fn create_employee_handler(
    State(state): State<Arc<EmployeeState>>,
    body: Result<Json<NewEmployee>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let Json(new_employee) = body?;

    let employee = state
        .repository
        .create(&new_employee)
        .await
        .map_err(|e| state.store_failure("create", e))?;

    state.metrics.increment_created();
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn update_employee_handler(
    State(state): State<Arc<EmployeeState>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<EmployeeChanges>, JsonRejection>,
) -> ApiResult<Json<Employee>> {
    let Path(id) = id?;
    let Json(changes) = body?;

    let employee = state
        .repository
        .update(id, &changes)
        .await
        .map_err(|e| state.store_failure("update", e))?
        .ok_or(ApiError::NotFound)?;

    state.metrics.increment_updated();
    Ok(Json(employee))
}

async fn delete_employee_handler(
    State(state): State<Arc<EmployeeState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;

    let deleted = state
        .repository
        .delete(id)
        .await
        .map_err(|e| state.store_failure("delete", e))?;

    if !deleted {
        return Err(ApiError::NotFound);
    }

    state.metrics.increment_deleted();
    Ok(StatusCode::NO_CONTENT)
}

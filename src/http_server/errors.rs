//! # API Errors
//!
//! Every handler failure becomes one of three kinds, each rendered as a
//! `{"message": ...}` body.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DbError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

pub const NOT_FOUND_MESSAGE: &str = "Employee not found";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Handler errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No employee has the requested id
    #[error("Employee not found")]
    NotFound,

    /// Request body or path could not be decoded
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The store failed the statement
    #[error("{0}")]
    Store(#[from] DbError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client. Store details stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::NotFound => NOT_FOUND_MESSAGE.to_string(),
            ApiError::Validation(detail) => detail.clone(),
            ApiError::Store(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// `{"message": ...}` body used by every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(MessageResponse::new(self.public_message()));
        (status, body).into_response()
    }
}

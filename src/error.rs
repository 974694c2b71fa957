//! Application error enum; centralizes mapping onto HTTP responses.
//!
//! Error bodies are JSON with a `message` field; validation failures add an
//! `errors` object with per-field details.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    Internal(String),

    // 400 Bad Request
    BadRequest(String),

    // 400 Bad Request with per-field details
    Validation(ValidationErrors),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (e.g., message sent to an ended interview)
    Conflict(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Internal(msg) => {
                tracing::error!(target: "prepwise_backend", %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal Server Error" }),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "message": msg })),
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Invalid request data", "errors": errors }),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "message": msg })),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "message": msg })),
        };
        (status, Json(body)).into_response()
    }
}

/// Lets handlers use `?` directly on `payload.validate()`.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<crate::interview::InterviewSetupError> for AppError {
    fn from(err: crate::interview::InterviewSetupError) -> Self {
        use crate::interview::InterviewSetupError::*;
        match err {
            UnknownInterviewer => AppError::BadRequest("Unknown interviewer".to_string()),
            UnknownLevel => AppError::BadRequest("Unknown interview level".to_string()),
        }
    }
}

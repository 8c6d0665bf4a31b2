use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::store::ScheduleError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Conflict(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({ "error": msg }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        ApiError::BadRequest(value.body_text())
    }
}

impl From<ScheduleError> for ApiError {
    fn from(value: ScheduleError) -> Self {
        match value {
            ScheduleError::Validation(_) => ApiError::BadRequest(value.to_string()),
            ScheduleError::Conflict(_) => ApiError::Conflict(value.to_string()),
            ScheduleError::NotFound(_) => ApiError::NotFound(value.to_string()),
            ScheduleError::Time(_)
            | ScheduleError::InvalidRow { .. }
            | ScheduleError::Database(_)
            | ScheduleError::Poisoned => {
                error!("Schedule store error: {value}");
                ApiError::Internal("Failed to access course schedule".into())
            }
        }
    }
}

//! HTTP error responses

use crate::services::ServiceError;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sighting_types::ValidationError;

/// Error returned by API handlers.
///
/// Client errors carry a message describing what was wrong with the request.
/// Internal errors are logged and answered with a generic message.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    InvalidBody { status: StatusCode, message: String },
    InvalidQuery(String),
    Internal(anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidQuery(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::InvalidBody { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::InvalidBody { .. } => "invalid_body",
            ApiError::InvalidQuery(_) => "invalid_query",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(e) => ApiError::Validation(e),
            ServiceError::Storage(e) => ApiError::Internal(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        ApiError::InvalidBody {
            status,
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, field) = match self {
            ApiError::Validation(e) => (e.to_string(), Some(e.field())),
            ApiError::InvalidBody { message, .. } | ApiError::InvalidQuery(message) => {
                (message, None)
            }
            ApiError::Internal(e) => {
                tracing::error!("Request failed: {:#}", e);
                ("internal server error".to_string(), None)
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code,
            "field": field,
        }));
        (status, body).into_response()
    }
}

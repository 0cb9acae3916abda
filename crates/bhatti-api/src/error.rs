//! API errors rendered as `{"error": "..."}` bodies

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use bhatti_core::error::DomainError;
use bhatti_security::JwtError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid items: {message}")]
    InvalidItems { message: String, invalid_items: Vec<String> },

    #[error("Too many requests")]
    TooManyRequests,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    invalid_items: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, invalid_items) = match self {
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string(), None)
            }
            ApiError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, msg, None)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg, None)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg, None)
            }
            ApiError::InvalidItems { message, invalid_items } => {
                tracing::warn!("Rejected order, invalid items: {:?}", invalid_items);
                (StatusCode::BAD_REQUEST, message, Some(invalid_items))
            }
            ApiError::TooManyRequests => {
                tracing::warn!("Rate limit exceeded");
                (StatusCode::TOO_MANY_REQUESTS, "Too many requests".to_string(), None)
            }
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string(), None)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string(), None)
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            invalid_items,
        });

        (status, body).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(msg) => ApiError::NotFound(msg),
            DomainError::ValidationError(msg) => ApiError::BadRequest(msg),
            DomainError::NoValidMenuItems(invalid_items) => ApiError::InvalidItems {
                message: DomainError::NoValidMenuItems(Vec::new()).to_string(),
                invalid_items,
            },
            DomainError::Forbidden(msg) => ApiError::Forbidden(msg),
            DomainError::DatabaseError(msg) => ApiError::DatabaseError(msg),
            DomainError::InternalError(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

//! Error handling for the REST API server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use friday_core::error::FridayError;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, "RELAY_ERROR", message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                suggestion: self.suggestion,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

// Convert from friday-core errors
impl From<FridayError> for ApiError {
    fn from(err: FridayError) -> Self {
        let suggestion = err.suggestion().map(str::to_string);
        let api = match err {
            FridayError::Configuration(msg) => ApiError::bad_request(msg),
            FridayError::Authentication { message, .. } => ApiError::unauthorized(message),
            FridayError::NotFound { message, .. } => ApiError::not_found(message),
            FridayError::Validation { message, .. } => ApiError::validation(message),
            FridayError::Relay { message, .. } => {
                ApiError::bad_gateway(format!("Relay error: {}", message))
            }
            FridayError::Network { message, .. } => {
                ApiError::bad_gateway(format!("Network error: {}", message))
            }
            FridayError::Storage { message, .. } => {
                ApiError::internal(format!("Storage error: {}", message))
            }
            FridayError::Parse { message, .. } => {
                ApiError::internal(format!("Parse error: {}", message))
            }
            FridayError::Serialization(e) => {
                ApiError::internal(format!("Serialization error: {}", e))
            }
            FridayError::Io(e) => ApiError::internal(format!("IO error: {}", e)),
            FridayError::Internal(msg) => ApiError::internal(msg),
        };
        match suggestion {
            Some(s) => api.with_suggestion(s),
            None => api,
        }
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_422() {
        let err: ApiError =
            FridayError::validation_with_suggestion("Message is empty", "Type something").into();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.suggestion.as_deref(), Some("Type something"));
    }

    #[test]
    fn test_relay_maps_to_502() {
        let err: ApiError = FridayError::relay("timeout").into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert!(err.message.contains("timeout"));
    }
}

//! Response types for the HR engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response for the given error body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::DestinationNotFound { code } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "DESTINATION_NOT_FOUND",
                    format!("Destination not found: {}", code),
                    format!("The destination code '{}' has no configured per-night rate", code),
                ),
            ),
            EngineError::TemplateNotFound { code } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "TEMPLATE_NOT_FOUND",
                    format!("Pay component template not found: {}", code),
                    format!("The template code '{}' is not configured", code),
                ),
            ),
            EngineError::InvalidTrip { field, message } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid trip field '{}': {}", field, message),
                    "The trip data contains invalid information",
                ),
            ),
            EngineError::InvalidCompensation { field, message } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid compensation field '{}': {}", field, message),
                    "The compensation data contains invalid information",
                ))
            }
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "CALCULATION_ERROR",
                    "Amounts are too large to calculate",
                    message,
                ),
            },
        }
    }
}

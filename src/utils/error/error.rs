//! Error handling for the CRM core
//!
//! This module defines all error types used throughout the crate.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the CRM core
pub type Result<T> = std::result::Result<T, CrmError>;

/// Main error type for the CRM core
#[derive(Error, Debug)]
pub enum CrmError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Session credential errors
    #[error("Session error: {0}")]
    Session(String),

    /// Bearer credential decode errors
    #[error("Credential decode error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A stage regression was requested without explicit confirmation
    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    /// Another transition for the same lead is still awaiting reconciliation
    #[error("Transition in flight: {0}")]
    TransitionInFlight(String),

    /// Backend rejected or failed an operation
    #[error("Backend error: {0}")]
    Backend(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for CrmError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            CrmError::Config(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                self.to_string(),
            ),
            CrmError::Session(_) | CrmError::Jwt(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "SESSION_ERROR",
                self.to_string(),
            ),
            CrmError::Validation(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
            ),
            CrmError::NotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                self.to_string(),
            ),
            CrmError::BadRequest(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                self.to_string(),
            ),
            CrmError::ConfirmationRequired(_) => (
                actix_web::http::StatusCode::CONFLICT,
                "CONFIRMATION_REQUIRED",
                self.to_string(),
            ),
            CrmError::TransitionInFlight(_) => (
                actix_web::http::StatusCode::CONFLICT,
                "TRANSITION_IN_FLIGHT",
                self.to_string(),
            ),
            CrmError::Backend(_) | CrmError::HttpClient(_) => (
                actix_web::http::StatusCode::BAD_GATEWAY,
                "BACKEND_ERROR",
                self.to_string(),
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}

/// Helper functions for creating specific errors
impl CrmError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn session<S: Into<String>>(message: S) -> Self {
        Self::Session(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn backend<S: Into<String>>(message: S) -> Self {
        Self::Backend(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_constructors() {
        assert!(matches!(
            CrmError::validation("reason is required"),
            CrmError::Validation(_)
        ));
        assert!(matches!(CrmError::backend("503"), CrmError::Backend(_)));
    }

    #[test]
    fn test_error_display() {
        let err = CrmError::ConfirmationRequired("regression to contacted".to_string());
        assert_eq!(
            err.to_string(),
            "Confirmation required: regression to contacted"
        );
    }
}

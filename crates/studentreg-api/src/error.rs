//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps validation rejections and storage failures to HTTP status codes and
//! the `{success, message}` envelope that registration form clients read.
//! Never exposes internal or database error details in responses.

use axum::http::header::ALLOW;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use studentreg_core::{RegistrationError, ValidationErrors, WRITE_METHOD};
use thiserror::Error;
use utoipa::ToSchema;

use crate::store::PersistenceError;

/// Structured JSON error response body.
///
/// `message` is a single display string. For validation failures it is every
/// error joined with the configured delimiter, and `errors` carries the same
/// messages as a list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error code (e.g., "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Individual validation messages, present only for validation errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// The registration endpoint was called with a method other than POST (405).
    #[error("Invalid request method.")]
    MethodNotAllowed {
        /// The method that was used.
        method: String,
    },

    /// One or more fields failed validation (422).
    #[error("{message}")]
    Validation {
        /// Joined display string.
        message: String,
        /// Individual messages in evaluation order.
        errors: Vec<String>,
    },

    /// Request body could not be parsed (400).
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Storage failed; the write was rolled back (500).
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build a validation error, joining messages with `delimiter`.
    pub fn validation(errors: &ValidationErrors, delimiter: &str) -> Self {
        Self::Validation {
            message: errors.join(delimiter),
            errors: errors.messages(),
        }
    }

    /// Map a validator rejection, joining field messages with `delimiter`.
    pub fn from_rejection(err: RegistrationError, delimiter: &str) -> Self {
        match err {
            RegistrationError::InvalidMethod { method } => Self::MethodNotAllowed { method },
            RegistrationError::Invalid(errors) => Self::validation(&errors, delimiter),
        }
    }

    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::MethodNotAllowed { .. } => (StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED"),
            Self::Validation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Persistence(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// The message shown to clients.
    fn client_message(&self) -> String {
        match self {
            Self::Persistence(err) => format!("Database error: {}.", err.summary()),
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.client_message();
        let method_not_allowed = matches!(self, Self::MethodNotAllowed { .. });

        // Log server-side failures with full detail for operator visibility.
        match &self {
            Self::Persistence(err) => {
                tracing::error!(error = %err, "registration storage failed");
            }
            Self::Internal(_) => {
                tracing::error!(error = %self, "internal server error");
            }
            _ => {}
        }

        let errors = match self {
            Self::Validation { errors, .. } => Some(errors),
            _ => None,
        };

        let body = ErrorBody {
            success: false,
            code: code.to_string(),
            message,
            errors,
        };

        let mut response = (status, Json(body)).into_response();
        if method_not_allowed {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static(WRITE_METHOD));
        }
        response
    }
}

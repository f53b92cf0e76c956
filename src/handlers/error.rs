use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::{Operation, ServiceError};
use crate::validation::ValidationError;

/// Errors returned by the HTTP handlers, rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub enum ApiError {
    /// Body is not a JSON medicine (400).
    InvalidPayload,
    /// Body broke a validation rule (400).
    Validation(ValidationError),
    /// No medicine with the requested id (404).
    NotFound,
    /// Handling took longer than the configured limit (408).
    Timeout,
    /// Store or encoding failure (500). `detail` is logged, never returned.
    Internal {
        message: &'static str,
        detail: String,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPayload | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::InvalidPayload => "Invalid request payload".to_string(),
            Self::Validation(e) => e.to_string(),
            Self::NotFound => "Medicine not found".to_string(),
            Self::Timeout => "Request timed out".to_string(),
            Self::Internal { message, .. } => message.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal { message, detail } = &self {
            log::error!("{}: {}", message, detail);
        }
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(rule) => Self::Validation(rule),
            ServiceError::NotFound(_) => Self::NotFound,
            ServiceError::Encoding(_) => Self::Internal {
                message: "Error processing time of day",
                detail: e.to_string(),
            },
            ServiceError::Corrupt { operation, .. } | ServiceError::Store { operation, .. } => {
                Self::Internal {
                    message: internal_message(operation),
                    detail: e.to_string(),
                }
            }
        }
    }
}

fn internal_message(operation: Operation) -> &'static str {
    match operation {
        Operation::List => "Database error",
        Operation::Get => "Error fetching medicine",
        Operation::Create => "Error creating medicine",
        Operation::Update => "Error updating medicine",
        Operation::Delete => "Error deleting medicine",
    }
}

//! Error types for the quote relay
//!
//! Every failure is terminal for its request. All of them except
//! `MethodNotAllowed` render as the same `worker_error` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Envelope `type` tag for relay failures
pub const WORKER_ERROR: &str = "worker_error";

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    #[error("Request must contain at least one message")]
    EmptyConversation,

    #[error("Failed to fetch skill or catalog: {0}")]
    FetchFailure(String),

    #[error("{provider} API error: {status} - {body}")]
    UpstreamFailure {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("No content in {provider} response")]
    EmptyResponse { provider: &'static str },

    #[error("Failed to parse quote JSON: {0}")]
    ParseFailure(#[source] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed => "method_not_allowed",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::EmptyConversation => "empty_conversation",
            AppError::FetchFailure(_) => "fetch_failure",
            AppError::UpstreamFailure { .. } => "upstream_failure",
            AppError::EmptyResponse { .. } => "empty_response",
            AppError::ParseFailure(_) => "parse_failure",
            AppError::Http(_) => "http_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<&'static str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_type = match self {
            AppError::MethodNotAllowed => None,
            _ => Some(WORKER_ERROR),
        };
        let body = ErrorResponse {
            error: self.to_string(),
            error_type,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

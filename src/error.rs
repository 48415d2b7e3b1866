//! Error types for the readiness analyzer.
//!
//! This module provides structured error handling with:
//! - `FetchError`: the only failure that aborts an analysis
//! - `ProbeError`, `InsightError`, `PersistenceError`: recovered locally
//! - `AppError`: application-level errors (config, startup, fetch)
//! - `ApiError`: serializable error body for the HTTP surface

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// FETCH ERROR
// ============================================================================

/// Failure while retrieving the page under analysis.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The target could not be parsed as an absolute URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No response within the configured timeout
    #[error("timeout of {0}s exceeded")]
    Timeout(u64),

    /// Connection, TLS, redirect-limit or other transport failure
    #[error("Network error: {0}")]
    Request(String),

    /// Final response status was 400 or above
    #[error("Request failed with status code {0}")]
    Status(u16),

    /// The body could not be read as text
    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl FetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_secs)
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Request(err.to_string())
        }
    }
}

// ============================================================================
// RECOVERABLE ERRORS
// ============================================================================

/// ads.txt reachability failure. Always degraded to "absent".
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Invalid probe URL: {0}")]
    InvalidUrl(String),

    #[error("Probe request failed: {0}")]
    Request(String),
}

/// External insight generation failure. Always degraded to placeholder text.
#[derive(Debug, Error)]
pub enum InsightError {
    /// No API key configured for the provider
    #[error("{0} API key not configured")]
    NotConfigured(&'static str),

    #[error("Insight request failed: {0}")]
    Request(String),

    #[error("Insight service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed insight response: {0}")]
    MalformedResponse(String),
}

impl InsightError {
    /// Fixed text substituted into the result in place of insights.
    pub fn placeholder(&self, provider: &str) -> String {
        match self {
            Self::NotConfigured(service) => format!("{} API key not configured", service),
            _ => format!("Failed to get {} insights", provider),
        }
    }
}

/// Durable store failure. Logged and ignored by callers.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ============================================================================
// APPLICATION ERROR
// ============================================================================

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// The page under analysis could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store could not be opened
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

// ============================================================================
// API ERROR (FOR THE HTTP SURFACE)
// ============================================================================

/// Error body returned from HTTP handlers: `{ "error": "..." }`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: msg.into(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        let message = error.to_string();
        if message.is_empty() {
            Self::internal("Analysis failed")
        } else {
            Self::internal(message)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insight_placeholders_distinguish_missing_key_from_failure() {
        let missing = InsightError::NotConfigured("OpenAI");
        assert_eq!(missing.placeholder("ChatGPT"), "OpenAI API key not configured");

        let failed = InsightError::Status {
            status: 503,
            body: "unavailable".into(),
        };
        assert_eq!(failed.placeholder("ChatGPT"), "Failed to get ChatGPT insights");
    }

    #[test]
    fn fetch_error_message_surfaces_through_api_error() {
        let api: ApiError = AppError::from(FetchError::Status(404)).into();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.error, "Request failed with status code 404");
    }
}

//! Custom error types for Crowdin API operations

use serde::Deserialize;
use thiserror::Error;

/// One entry of a validation error response (HTTP 400).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorResource {
    /// Remote error code.
    pub code: i64,
    /// Human-readable description of the failure.
    pub message: String,
    /// Field-level context, present on some validation failures.
    #[serde(default)]
    pub context: Option<serde_json::Value>,
}

/// Errors raised by the request/response pipeline
#[derive(Error, Debug)]
pub enum CrowdinError {
    /// The API rejected the request parameters (HTTP 400)
    #[error("invalid request parameters: {0:?}")]
    Validation(Vec<ErrorResource>),

    /// The API reported a failure (any other non-2xx status)
    #[error("API error {code}: {message}")]
    Api {
        /// Remote error code from the response body.
        code: i64,
        /// Remote error message, or a fixed placeholder when absent.
        message: String,
    },

    /// A success response carried a non-JSON content type
    #[error("response Content-Type is not application/json (got {content_type:?})")]
    ProtocolViolation {
        /// The Content-Type header the server actually sent, if any.
        content_type: Option<String>,
    },

    /// Invalid or incomplete credentials
    #[error("configuration error: {message}")]
    Config {
        /// What is wrong with the configuration.
        message: String,
    },

    /// Reqwest error (connection, timeout, malformed URL)
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for Crowdin API operations
pub type Result<T> = std::result::Result<T, CrowdinError>;

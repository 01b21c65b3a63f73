//! Unified error handling for the API client.
//!
//! Every backend call funnels failures into [`ApiError`], so views can use the
//! `?` operator and render a single message string at the component boundary.

use serde_json::Value;
use thiserror::Error;

use crate::envelope;

/// Unified error type for API calls
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, aborted fetch)
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        body: Value,
    },

    /// Input rejected locally before any request was made
    #[error("{0}")]
    InvalidInput(String),

    /// A 2xx response whose body did not carry what the operation needs
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Request body could not be encoded
    #[error("Failed to serialize request: {0}")]
    Serialize(String),

    /// Browser storage refused a read or write
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        ApiError::Transport(err.to_string())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        ApiError::UnexpectedResponse(message.into())
    }

    /// Build the failure for a non-2xx response.
    ///
    /// The message is taken from the body's `message`, then `error`, then the
    /// HTTP status text, then `fallback`.
    pub fn from_response(status: u16, status_text: &str, body: Value, fallback: &str) -> Self {
        let message = envelope::error_message(&body, status_text, fallback);
        ApiError::Http {
            status,
            message,
            body,
        }
    }

    /// HTTP status associated with the failure. Local input rejections report 400.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::InvalidInput(_) => Some(400),
            _ => None,
        }
    }

    /// Parsed response body for HTTP failures.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Message suitable for inline display.
    pub fn message(&self) -> String {
        match self {
            ApiError::Http { message, .. } | ApiError::InvalidInput(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serialize(err.to_string())
    }
}

/// Result type alias for API calls
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_response_prefers_message_field() {
        let err = ApiError::from_response(
            409,
            "Conflict",
            json!({"message": "already joined", "error": "CONFLICT"}),
            "Failed to join class",
        );
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.message(), "already joined");
        assert_eq!(err.to_string(), "already joined");
    }

    #[test]
    fn test_from_response_falls_back_in_order() {
        let err = ApiError::from_response(500, "", json!({"error": "boom"}), "fallback");
        assert_eq!(err.message(), "boom");

        let err = ApiError::from_response(502, "Bad Gateway", json!({}), "fallback");
        assert_eq!(err.message(), "Bad Gateway");

        let err = ApiError::from_response(502, "", json!({"raw": "<html>"}), "fallback");
        assert_eq!(err.message(), "fallback");
    }

    #[test]
    fn test_invalid_input_reports_bad_request() {
        let err = ApiError::invalid_input("Username and password are required");
        assert_eq!(err.status(), Some(400));
        assert!(err.body().is_none());
    }
}

//! Error types and handling for the rollmatch search service

use serde::Serialize;
use std::fmt;

/// Application error types
///
/// `Transport` covers everything that goes wrong between us and the registry
/// store: unreachable, timed out, or a protocol-level failure. Callers get it
/// unmodified and decide whether to retry; this layer never does.
#[derive(Debug, Serialize)]
pub enum AppError {
    InvalidQuery(String),
    Transport(String),
    ParseError(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidQuery(msg) => write!(f, "Invalid query: {}", msg),
            AppError::Transport(msg) => write!(f, "Registry transport failed: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Get the error code for tool responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidQuery(_) => "invalid_query",
            AppError::Transport(_) => "search_transport_error",
            AppError::ParseError(_) => "parse_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Convert anyhow::Error to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert reqwest::Error to AppError
///
/// Timeouts, connection failures and bad responses are all one transport
/// error: the caller treats "store call failed" and "store call timed out"
/// identically.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() || err.is_status() {
            AppError::Transport(err.to_string())
        } else if err.is_decode() {
            AppError::Transport(format!("malformed registry response: {}", err))
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

/// Convert serde_json::Error to AppError
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::InvalidQuery("x".into()).error_code(),
            "invalid_query"
        );
        assert_eq!(
            AppError::Transport("down".into()).error_code(),
            "search_transport_error"
        );
        assert_eq!(AppError::ParseError("x".into()).error_code(), "parse_error");
        assert_eq!(AppError::Internal("x".into()).error_code(), "internal_error");
    }

    #[test]
    fn test_display_includes_message() {
        let err = AppError::Transport("connection refused".into());
        assert!(err.message().contains("connection refused"));
        assert!(err.message().contains("transport"));
    }

    #[test]
    fn test_serde_json_error_maps_to_parse_error() {
        let bad: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: AppError = bad.unwrap_err().into();
        assert_eq!(err.error_code(), "parse_error");
    }
}

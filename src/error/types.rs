//! Error type definitions
//!
//! Defines the main error types used throughout the PAPI client.

use crate::types::{ApiErrorEntry, ErrorEnvelope};
use thiserror::Error;

/// Main error type for the PAPI client
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (bad endpoint, header, or query values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Endpoint URL could not be parsed
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// Network/HTTP client errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Transport state errors, such as dispatching without an HTTP client
    #[error("Transport error: {0}")]
    Transport(String),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The session resource refused the login request
    #[error("Unable to create a session ({status}): {body}")]
    LoginRejected { status: u16, body: String },

    /// Non-2xx response from the API
    #[error("Non 2xx response received ({status}): {body}")]
    Api { status: u16, body: String },

    /// The merged payload carried an `errors` field
    #[error("Response returned errors: {}", format_entries(.0))]
    ApiErrors(Vec<ApiErrorEntry>),

    /// Response body could not be interpreted
    #[error("Decode error: {0}")]
    Decode(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

fn format_entries(entries: &[ApiErrorEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("[{}] {}", e.code, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create an API error from a status code and raw body
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a new decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::LoginRejected { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the cluster answered 401
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Structured PAPI error codes (`AEC_*`) carried by the error.
    ///
    /// For [`Error::Api`] the raw body is parsed as an `{"errors": [...]}`
    /// envelope; a body that is not such an envelope yields no codes.
    pub fn api_error_codes(&self) -> Vec<String> {
        match self {
            Self::ApiErrors(entries) => entries.iter().map(|e| e.code.clone()).collect(),
            Self::Api { body, .. } => serde_json::from_str::<ErrorEnvelope>(body)
                .map(|env| env.errors.into_iter().map(|e| e.code).collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::config("test config error");
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.to_string(), "Configuration error: test config error");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_error_from_url() {
        let url_err = url::Url::parse("/no/scheme/here");
        assert!(url_err.is_err());

        let err: Error = url_err.unwrap_err().into();
        assert!(matches!(err, Error::Url(_)));
    }

    #[test]
    fn test_api_error_status() {
        let err = Error::api(404, "not found");
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_unauthorized());
        assert!(err.to_string().contains("(404)"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_unauthorized_detection() {
        let err = Error::api(401, r#"{"errors":[{"code":"AEC_UNAUTHORIZED"}]}"#);
        assert!(err.is_unauthorized());
        assert!(!Error::auth("no token").is_unauthorized());
    }

    #[test]
    fn test_api_error_codes_from_body() {
        let err = Error::api(
            409,
            r#"{"errors":[{"code":"AEC_CONFLICT","message":"already a member"}]}"#,
        );
        assert_eq!(err.api_error_codes(), vec!["AEC_CONFLICT".to_string()]);
    }

    #[test]
    fn test_api_error_codes_from_unstructured_body() {
        let err = Error::api(500, "<html>Internal Server Error</html>");
        assert!(err.api_error_codes().is_empty());
        assert!(Error::decode("oops").api_error_codes().is_empty());
    }

    #[test]
    fn test_api_errors_display() {
        let err = Error::ApiErrors(vec![
            ApiErrorEntry::new("AEC_NOT_FOUND", "no such user"),
            ApiErrorEntry::new("AEC_BAD_REQUEST", "bad field"),
        ]);
        assert_eq!(
            err.to_string(),
            "Response returned errors: [AEC_NOT_FOUND] no such user; [AEC_BAD_REQUEST] bad field"
        );
        assert_eq!(err.api_error_codes().len(), 2);
    }

    #[test]
    fn test_login_rejected_error() {
        let err = Error::LoginRejected {
            status: 401,
            body: "bad credentials".to_string(),
        };
        assert!(err.is_unauthorized());
        assert!(err.to_string().contains("Unable to create a session"));
    }
}

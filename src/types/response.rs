//! Response type definitions
//!
//! Defines the raw response returned by the session layer and the
//! PAPI error envelope.

use reqwest::{StatusCode, header::HeaderMap};
use serde::{Deserialize, Serialize};

/// A decoded JSON object as returned by [`crate::PapiSession::send`]
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Unprocessed HTTP response with the body fully read
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Create a new raw response
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Whether the status is in 200..=299
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body as text, lossily decoded
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// One entry of the PAPI `errors` array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorEntry {
    /// Error code, e.g. `AEC_CONFLICT`
    #[serde(default)]
    pub code: String,
    /// Human readable message
    #[serde(default)]
    pub message: String,
}

impl ApiErrorEntry {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// `{"errors": [...]}` body returned on failed calls
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<ApiErrorEntry>,
}

//! Request type definitions
//!
//! Defines the path, body and request structures passed to the session layer.

use reqwest::Method;
use serde::Serialize;
use std::collections::BTreeMap;

/// Query arguments, encoded in key order
pub type Query = BTreeMap<String, String>;

/// Caller supplied headers. Names keep the casing given by the caller.
pub type Headers = BTreeMap<String, String>;

/// Resource path relative to the endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiPath {
    /// A single path string, e.g. `platform/10/auth/users`
    Segment(String),
    /// Ordered segments joined with `/`
    Segments(Vec<String>),
}

impl ApiPath {
    /// The path with segments joined by `/`
    pub fn joined(&self) -> String {
        match self {
            Self::Segment(s) => s.clone(),
            Self::Segments(parts) => parts.join("/"),
        }
    }

    /// Individual non-empty path components
    pub fn components(&self) -> Vec<String> {
        self.joined()
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl From<&str> for ApiPath {
    fn from(s: &str) -> Self {
        Self::Segment(s.to_string())
    }
}

impl From<String> for ApiPath {
    fn from(s: String) -> Self {
        Self::Segment(s)
    }
}

impl From<Vec<String>> for ApiPath {
    fn from(parts: Vec<String>) -> Self {
        Self::Segments(parts)
    }
}

impl From<&[&str]> for ApiPath {
    fn from(parts: &[&str]) -> Self {
        Self::Segments(parts.iter().map(|s| s.to_string()).collect())
    }
}

/// Request payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    /// No request body
    #[default]
    Empty,
    /// Raw bytes sent as-is
    Raw(Vec<u8>),
}

impl Body {
    /// Serialize a value as a JSON body
    pub fn json<T: Serialize + ?Sized>(value: &T) -> crate::Result<Self> {
        Ok(Self::Raw(serde_json::to_vec(value)?))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Raw(bytes) => bytes.is_empty(),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Raw(bytes)
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Self::Raw(s.into_bytes())
    }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self {
        Self::Raw(s.as_bytes().to_vec())
    }
}

/// A single API call: method, path, query, body and extra headers
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Resource path relative to the endpoint
    pub path: ApiPath,
    /// Query arguments
    pub query: Query,
    /// Request payload
    pub body: Body,
    /// Extra headers, taking precedence over the session defaults
    pub headers: Headers,
}

impl ApiRequest {
    /// Create a new request with an empty query, body and header set
    pub fn new(method: Method, path: impl Into<ApiPath>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Query::new(),
            body: Body::Empty,
            headers: Headers::new(),
        }
    }

    pub fn get(path: impl Into<ApiPath>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<ApiPath>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<ApiPath>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<ApiPath>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a query argument
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Replace the whole query
    pub fn with_query_map(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Set the request body
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    /// Serialize `value` as the JSON request body
    pub fn with_json<T: Serialize + ?Sized>(mut self, value: &T) -> crate::Result<Self> {
        self.body = Body::json(value)?;
        Ok(self)
    }

    /// Add an extra header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Copy of this request for a continuation page.
    ///
    /// The query is replaced by exactly `{"resume": token}`; everything else is kept.
    pub fn resumed(&self, token: &str) -> Self {
        let mut query = Query::new();
        query.insert("resume".to_string(), token.to_string());
        Self {
            query,
            ..self.clone()
        }
    }
}

/// Body of the session create call
#[derive(Debug, Clone, Serialize)]
pub struct SessionRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub services: &'a [&'a str],
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_path_segment_joined() {
        let path = ApiPath::from("platform/10/auth/users");
        assert_eq!(path.joined(), "platform/10/auth/users");
        assert_eq!(path.components(), vec!["platform", "10", "auth", "users"]);
    }

    #[test]
    fn test_path_segments_joined() {
        let path = ApiPath::from(&["platform", "10", "zones"][..]);
        assert_eq!(path.joined(), "platform/10/zones");
    }

    #[test]
    fn test_path_components_skip_empty() {
        let path = ApiPath::from(vec!["/platform/".to_string(), "latest".to_string()]);
        assert_eq!(path.components(), vec!["platform", "latest"]);
    }

    #[test]
    fn test_body_variants() {
        assert!(Body::Empty.is_empty());
        assert!(Body::from("").is_empty());
        assert_eq!(Body::from("abc"), Body::Raw(b"abc".to_vec()));
        assert_eq!(
            Body::json(&serde_json::json!({"name": "bob"})).unwrap(),
            Body::Raw(br#"{"name":"bob"}"#.to_vec())
        );
    }

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::get("platform/10/auth/users")
            .with_query("zone", "System")
            .with_header("Accept", "text/plain");

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.query.get("zone").map(String::as_str), Some("System"));
        assert_eq!(
            request.headers.get("Accept").map(String::as_str),
            Some("text/plain")
        );
        assert_eq!(request.body, Body::Empty);
    }

    #[test]
    fn test_resumed_replaces_query() {
        let request = ApiRequest::get("items")
            .with_query("zone", "System")
            .with_query("limit", "100")
            .with_header("X-Trace", "1");

        let resumed = request.resumed("tok1");

        let mut expected = Query::new();
        expected.insert("resume".to_string(), "tok1".to_string());
        assert_eq!(resumed.query, expected);
        assert_eq!(resumed.path, request.path);
        assert_eq!(resumed.headers, request.headers);
        // original untouched
        assert_eq!(request.query.len(), 2);
    }

    #[test]
    fn test_session_request_serialization() {
        let body = SessionRequest {
            username: "admin",
            password: "secret",
            services: &["platform", "namespace"],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "username": "admin",
                "password": "secret",
                "services": ["platform", "namespace"]
            })
        );
    }
}

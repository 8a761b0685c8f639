//! Outgoing header assembly
//!
//! Caller headers are applied first, verbatim. Session defaults are only
//! added for names the caller did not already set (compared as stored,
//! case-sensitively).

use crate::{Error, Result, types::Headers};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Header carrying the anti-forgery token
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Build the ordered header list for a request.
///
/// Caller names keep their casing in the returned list only. On the wire the
/// HTTP client normalizes every name to title case (`x-custom-HEADER` is sent
/// as `X-Custom-Header`); header names are case-insensitive in HTTP.
pub fn assemble_headers(
    caller: &Headers,
    session_token: &str,
    csrf_token: &str,
    endpoint: &str,
) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = caller
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let defaults = [
        ("Accept", "application/json".to_string()),
        ("Cookie", format!("isisessid={}", session_token)),
        ("Content-Type", "application/json".to_string()),
        ("Referer", endpoint.to_string()),
        (CSRF_HEADER, csrf_token.to_string()),
    ];

    for (name, value) in defaults {
        if !headers.iter().any(|(k, _)| k == name) {
            headers.push((name.to_string(), value));
        }
    }

    headers
}

/// Convert an assembled header list into a `HeaderMap`
pub fn to_header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::config(format!("Invalid header name {:?}: {}", name, e)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| Error::config(format!("Invalid value for header {}: {}", name, e)))?;
        map.append(header_name, header_value);
    }
    Ok(map)
}

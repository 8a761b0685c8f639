//! Session token extraction from `Set-Cookie` headers

use regex::Regex;
use std::sync::LazyLock;

/// Cookie carrying the session id
pub const SESSION_COOKIE: &str = "isisessid";

/// Cookie carrying the anti-forgery token
pub const CSRF_COOKIE: &str = "isicsrf";

static SESSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"isisessid=(?P<token>[^;]+)").expect("Failed to compile session cookie regex")
});

static CSRF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"isicsrf=(?P<token>[^;]+)").expect("Failed to compile csrf cookie regex")
});

fn capture_token(pattern: &Regex, header: &str) -> Option<String> {
    pattern
        .captures(header)
        .and_then(|c| c.name("token"))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Session id carried by one `Set-Cookie` header value
pub fn extract_session_token(header: &str) -> Option<String> {
    capture_token(&SESSION_PATTERN, header)
}

/// Anti-forgery token carried by one `Set-Cookie` header value
pub fn extract_csrf_token(header: &str) -> Option<String> {
    capture_token(&CSRF_PATTERN, header)
}

/// Tokens found across all `Set-Cookie` values of a login response
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub session: Option<String>,
    pub csrf: Option<String>,
}

impl SessionTokens {
    /// Scan each header value independently; the first match for each token wins.
    pub fn scan<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut tokens = Self::default();
        for header in headers {
            if tokens.session.is_none() {
                tokens.session = extract_session_token(header);
            }
            if tokens.csrf.is_none() {
                tokens.csrf = extract_csrf_token(header);
            }
        }
        tokens
    }
}

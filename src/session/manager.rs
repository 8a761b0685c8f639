//! # Session Manager
//!
//! Owns the authentication lifecycle of a PAPI session and the low-level
//! request dispatch used by the pagination layer.
//!
//! ## Lifecycle
//!
//! A [`PapiSession`] is either disconnected (no tokens) or connected (both
//! the session id and the anti-forgery token are held). [`PapiSession::connect`]
//! always tears down any existing session before logging in again, and
//! [`PapiSession::disconnect`] always clears local state, even when the
//! session delete call fails.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use papi_lite::PapiSession;
//!
//! # async fn example() -> papi_lite::Result<()> {
//! let mut session = PapiSession::new("https://cluster.example.com:8080");
//! session.set_user("api_user");
//! session.set_password("secret");
//! session.set_ignore_cert(true);
//! session.connect().await?;
//! session.disconnect().await?;
//! # Ok(())
//! # }
//! ```

use crate::{
    Error, Result,
    session::{
        client::build_http_client,
        config::TransportConfig,
        cookies::SessionTokens,
        headers::{assemble_headers, to_header_map},
    },
    types::{ApiPath, ApiRequest, Body, Query, RawResponse, SessionRequest},
};
use reqwest::{
    Client, Method,
    header::{ACCEPT, CONTENT_TYPE, HeaderValue, SET_COOKIE},
};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Resource used for login (POST) and logout (DELETE)
pub const SESSION_PATH: &str = "session/1/session";

/// Services requested at login
pub const SESSION_SERVICES: [&str; 2] = ["platform", "namespace"];

/// Stateful PAPI session
///
/// Not safe for unsynchronized concurrent use; every operation takes `&mut self`.
/// Wrap the session in a `tokio::sync::Mutex` to share it between tasks.
pub struct PapiSession {
    /// Endpoint, credentials and client options
    pub(crate) config: TransportConfig,
    /// Session id (`isisessid`), empty when disconnected
    pub(crate) session_token: String,
    /// Anti-forgery token (`isicsrf`), empty when disconnected
    pub(crate) csrf_token: String,
    /// HTTP client, present while connected or initializing
    pub(crate) client: Option<Client>,
    /// Automatic re-authentications since the last explicit connect
    pub(crate) reauth_count: u32,
}

impl PapiSession {
    /// Creates a disconnected session for the given endpoint.
    ///
    /// The endpoint must include the scheme and port, e.g.
    /// `https://cluster.example.com:8080`. An empty string is allowed and can
    /// be filled in later with [`PapiSession::set_endpoint`].
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_config(TransportConfig::new(endpoint))
    }

    /// Creates a disconnected session from a full transport configuration
    pub fn with_config(config: TransportConfig) -> Self {
        Self {
            config,
            session_token: String::new(),
            csrf_token: String::new(),
            client: None,
            reauth_count: 0,
        }
    }

    /// Current transport configuration
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Sets the endpoint, returning the previous value.
    ///
    /// Takes effect on the next [`PapiSession::connect`].
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) -> String {
        std::mem::replace(&mut self.config.endpoint, endpoint.into())
    }

    /// Sets the user name, returning the previous value
    pub fn set_user(&mut self, user: impl Into<String>) -> String {
        std::mem::replace(&mut self.config.user, user.into())
    }

    /// Sets the password, returning the previous value
    pub fn set_password(&mut self, password: impl Into<String>) -> String {
        std::mem::replace(&mut self.config.password, password.into())
    }

    /// Sets the certificate verification bypass flag, returning the previous value
    pub fn set_ignore_cert(&mut self, ignore_cert: bool) -> bool {
        std::mem::replace(&mut self.config.ignore_cert, ignore_cert)
    }

    /// Sets the HTTP timeout, returning the previous value
    pub fn set_timeout(&mut self, timeout: Duration) -> Duration {
        std::mem::replace(&mut self.config.timeout, timeout)
    }

    /// Sets the re-authentication limit per `send`, returning the previous value
    pub fn set_max_reauth_attempts(&mut self, attempts: u32) -> u32 {
        std::mem::replace(&mut self.config.max_reauth_attempts, attempts)
    }

    /// Whether both session tokens are held
    pub fn is_connected(&self) -> bool {
        !self.session_token.is_empty() && !self.csrf_token.is_empty()
    }

    /// Current session id, empty when disconnected
    pub fn session_token(&self) -> &str {
        &self.session_token
    }

    /// Current anti-forgery token, empty when disconnected
    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    /// Automatic re-authentications since the last explicit connect
    pub fn reauth_count(&self) -> u32 {
        self.reauth_count
    }

    /// Build the full URL for a path and query relative to the endpoint
    pub fn url_for(&self, path: &ApiPath, query: &Query) -> Result<Url> {
        let mut url = Url::parse(&self.config.endpoint)?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                Error::config(format!(
                    "Endpoint cannot carry a path: {}",
                    self.config.endpoint
                ))
            })?;
            segments.pop_if_empty();
            segments.extend(path.components());
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }

    fn init_client(&mut self) -> Result<()> {
        self.client = Some(build_http_client(
            self.config.ignore_cert,
            self.config.timeout,
        )?);
        Ok(())
    }

    /// Logs in and stores the session tokens.
    ///
    /// Any existing session is disconnected first, so calling this repeatedly
    /// always yields a fresh session. The HTTP client is created on demand.
    ///
    /// # Errors
    ///
    /// - [`Error::Url`] / [`Error::Config`] when the endpoint is malformed
    /// - [`Error::Network`] when the login request cannot be sent
    /// - [`Error::LoginRejected`] when the cluster answers outside 2xx
    /// - [`Error::Auth`] when either token cookie is missing from the response
    pub async fn connect(&mut self) -> Result<()> {
        if let Err(e) = self.disconnect().await {
            tracing::debug!("Ignoring error while closing previous session: {}", e);
        }
        if self.client.is_none() {
            self.init_client()?;
        }

        let url = self.url_for(&ApiPath::from(SESSION_PATH), &Query::new())?;
        let body = SessionRequest {
            username: &self.config.user,
            password: &self.config.password,
            services: &SESSION_SERVICES,
        };
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::transport("HTTP client was not initialized"))?;

        tracing::debug!("Creating session at {} as {}", url, self.config.user);
        let response = client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .body(serde_json::to_vec(&body)?)
            .send()
            .await?;

        let status = response.status();
        let tokens = SessionTokens::scan(
            response
                .headers()
                .get_all(SET_COOKIE)
                .iter()
                .filter_map(|v| v.to_str().ok()),
        );
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(Error::LoginRejected {
                status: status.as_u16(),
                body: text,
            });
        }

        let session = tokens
            .session
            .ok_or_else(|| Error::auth("No session token found in API connect call"))?;
        let csrf = tokens
            .csrf
            .ok_or_else(|| Error::auth("No CSRF token found in API connect call"))?;

        self.session_token = session;
        self.csrf_token = csrf;
        self.reauth_count = 0;

        tracing::info!("Connected to {}", self.config.endpoint);
        Ok(())
    }

    /// Closes the session.
    ///
    /// A no-op when no HTTP client is held. Otherwise the session resource is
    /// deleted and the client and both tokens are released whether or not the
    /// delete succeeded; a transport failure of the delete is still returned.
    ///
    /// ```rust
    /// # use papi_lite::PapiSession;
    /// # tokio_test::block_on(async {
    /// let mut session = PapiSession::new("https://cluster.example.com:8080");
    /// assert!(session.disconnect().await.is_ok());
    /// assert!(!session.is_connected());
    /// # });
    /// ```
    pub async fn disconnect(&mut self) -> Result<()> {
        if self.client.is_none() {
            return Ok(());
        }

        let result = self
            .send_raw(&ApiRequest::new(Method::DELETE, SESSION_PATH))
            .await
            .map(|raw| {
                tracing::debug!("Session delete returned {}", raw.status);
            });

        self.client = None;
        self.session_token.clear();
        self.csrf_token.clear();

        match result {
            Ok(()) => {
                tracing::info!("Disconnected from {}", self.config.endpoint);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Session delete failed: {}", e);
                Err(e)
            }
        }
    }

    /// Disconnects, ignoring any error, then connects again
    pub async fn reconnect(&mut self) -> Result<()> {
        if let Err(e) = self.disconnect().await {
            tracing::debug!("Ignoring disconnect error during reconnect: {}", e);
        }
        self.connect().await
    }

    /// Sends one request and returns the unprocessed response.
    ///
    /// Session headers are added for any name the request does not already
    /// carry. The body is read fully; status handling is left to the caller.
    pub async fn send_raw(&self, request: &ApiRequest) -> Result<RawResponse> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::transport("No HTTP client configured; call connect first"))?;

        let url = self.url_for(&request.path, &request.query)?;
        let headers = assemble_headers(
            &request.headers,
            &self.session_token,
            &self.csrf_token,
            &self.config.endpoint,
        );

        tracing::debug!("{} {}", request.method, url);
        let mut builder = client
            .request(request.method.clone(), url)
            .headers(to_header_map(&headers)?);
        if let Body::Raw(bytes) = &request.body {
            builder = builder.body(bytes.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let response_headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse::new(status, response_headers, body))
    }
}

impl Default for PapiSession {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for PapiSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PapiSession")
            .field("config", &self.config)
            .field("connected", &self.is_connected())
            .field("has_client", &self.client.is_some())
            .field("reauth_count", &self.reauth_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn query(pairs: &[(&str, &str)]) -> Query {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_new_session_is_disconnected() {
        let session = PapiSession::new("https://cluster:8080");
        assert!(!session.is_connected());
        assert!(session.client.is_none());
        assert_eq!(session.session_token(), "");
        assert_eq!(session.csrf_token(), "");
        assert_eq!(session.reauth_count(), 0);
        assert_eq!(session.config().timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_setters_return_previous_value() {
        let mut session = PapiSession::default();

        assert_eq!(session.set_endpoint("https://a:8080"), "");
        assert_eq!(session.set_endpoint("https://b:8080"), "https://a:8080");
        assert_eq!(session.set_user("root"), "");
        assert_eq!(session.set_password("pw"), "");
        assert_eq!(session.set_password("pw2"), "pw");
        assert!(!session.set_ignore_cert(true));
        assert!(session.set_ignore_cert(false));
        assert_eq!(
            session.set_timeout(Duration::from_secs(10)),
            Duration::from_secs(120)
        );
        assert_eq!(session.set_max_reauth_attempts(3), 1);
        assert_eq!(session.config().endpoint, "https://b:8080");
    }

    #[test]
    fn test_url_for_single_segment() {
        let session = PapiSession::new("https://cluster:8080");
        let url = session
            .url_for(&ApiPath::from("platform/latest"), &Query::new())
            .unwrap();
        assert_eq!(url.as_str(), "https://cluster:8080/platform/latest");
    }

    #[test]
    fn test_url_for_segments_and_query() {
        let session = PapiSession::new("https://cluster:8080/");
        let path = ApiPath::from(&["platform/10", "auth", "users"][..]);
        let url = session
            .url_for(&path, &query(&[("zone", "System"), ("query_member_of", "True")]))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://cluster:8080/platform/10/auth/users?query_member_of=True&zone=System"
        );
    }

    #[test]
    fn test_url_for_encodes_query_values() {
        let session = PapiSession::new("https://cluster:8080");
        let url = session
            .url_for(&ApiPath::from("items"), &query(&[("resume", "a b&c=")]))
            .unwrap();
        assert_eq!(url.query(), Some("resume=a+b%26c%3D"));
    }

    #[test]
    fn test_url_for_invalid_endpoint() {
        let session = PapiSession::new("cluster-without-scheme");
        let err = session
            .url_for(&ApiPath::from("platform/latest"), &Query::new())
            .unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[tokio::test]
    async fn test_disconnect_without_client_is_noop() {
        let mut session = PapiSession::new("https://cluster:8080");
        assert!(session.disconnect().await.is_ok());
        assert!(session.disconnect().await.is_ok());
        assert!(!session.is_connected());
    }

    #[tokio::test]
    async fn test_send_raw_without_client() {
        let session = PapiSession::new("https://cluster:8080");
        let err = session
            .send_raw(&ApiRequest::get("platform/latest"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn test_debug_hides_tokens() {
        let mut session = PapiSession::new("https://cluster:8080");
        session.session_token = "secret-session".to_string();
        session.csrf_token = "secret-csrf".to_string();

        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret-session"));
        assert!(!debug.contains("secret-csrf"));
        assert!(debug.contains("connected: true"));
    }
}

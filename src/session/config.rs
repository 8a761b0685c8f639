//! Transport configuration
//!
//! Endpoint, credentials and HTTP client options held by a session.

use std::fmt;
use std::time::Duration;

/// Default HTTP timeout applied to connect and read
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default number of automatic re-authentications per `send` call
pub const DEFAULT_MAX_REAUTH_ATTEMPTS: u32 = 1;

/// Connection parameters for a PAPI session
#[derive(Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Endpoint including scheme and port, e.g. `https://cluster.example.com:8080`
    pub endpoint: String,
    /// User name
    pub user: String,
    /// Password
    pub password: String,
    /// Skip TLS certificate verification
    pub ignore_cert: bool,
    /// HTTP connect/read timeout
    pub timeout: Duration,
    /// Automatic re-authentications allowed per `send` call
    pub max_reauth_attempts: u32,
}

impl TransportConfig {
    /// Create a configuration for the given endpoint with default options
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            user: String::new(),
            password: String::new(),
            ignore_cert: false,
            timeout: DEFAULT_TIMEOUT,
            max_reauth_attempts: DEFAULT_MAX_REAUTH_ATTEMPTS,
        }
    }
}

impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportConfig")
            .field("endpoint", &self.endpoint)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("ignore_cert", &self.ignore_cert)
            .field("timeout", &self.timeout)
            .field("max_reauth_attempts", &self.max_reauth_attempts)
            .finish()
    }
}

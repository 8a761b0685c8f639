//! Configuration settings structure
//!
//! Defines the settings used to open a cluster connection and how they are
//! read from files and environment variables.

use crate::session::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the endpoint
pub const ENV_ENDPOINT: &str = "PAPI_ENDPOINT";
/// Environment variable holding the user name
pub const ENV_USER: &str = "PAPI_USER";
/// Environment variable holding the password
pub const ENV_PASSWORD: &str = "PAPI_PASSWORD";
/// Environment variable holding the certificate bypass flag
pub const ENV_IGNORE_CERT: &str = "PAPI_IGNORE_CERT";
/// Environment variable holding the timeout in seconds
pub const ENV_TIMEOUT: &str = "PAPI_TIMEOUT";

/// Main configuration settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cluster connection configuration
    pub cluster: ClusterSettings,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Cluster endpoint and credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterSettings {
    /// Endpoint including scheme and port
    pub endpoint: String,
    /// User name
    pub user: String,
    /// Password
    pub password: String,
    /// Skip TLS certificate verification
    pub ignore_cert: bool,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level
    pub level: String,
    /// Enable verbose logging
    pub verbose: bool,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            user: String::new(),
            password: String::new(),
            ignore_cert: false,
            timeout_secs: crate::session::config::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            verbose: false,
        }
    }
}

impl std::fmt::Debug for ClusterSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterSettings")
            .field("endpoint", &self.endpoint)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("ignore_cert", &self.ignore_cert)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClusterSettings {
    /// HTTP timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl From<&ClusterSettings> for TransportConfig {
    fn from(settings: &ClusterSettings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            user: settings.user.clone(),
            password: settings.password.clone(),
            ignore_cert: settings.ignore_cert,
            timeout: settings.timeout(),
            ..Self::default()
        }
    }
}

fn parse_bool(name: &str, value: &str) -> crate::Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(crate::Error::config(format!(
            "Invalid boolean for {}: {}",
            name, other
        ))),
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            crate::Error::config(format!("Invalid configuration file {:?}: {}", path, e))
        })
    }

    /// Load settings from environment variables
    pub fn from_env() -> crate::Result<Self> {
        Self::default().merge_with_env()
    }

    /// Override values with any `PAPI_*` environment variables that are set
    pub fn merge_with_env(self) -> crate::Result<Self> {
        self.merge_with_lookup(|name| std::env::var(name).ok())
    }

    /// Override values using an arbitrary variable lookup
    pub fn merge_with_lookup<F>(mut self, lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.cluster.endpoint = endpoint;
        }
        if let Some(user) = lookup(ENV_USER) {
            self.cluster.user = user;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.cluster.password = password;
        }
        if let Some(flag) = lookup(ENV_IGNORE_CERT) {
            self.cluster.ignore_cert = parse_bool(ENV_IGNORE_CERT, &flag)?;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            self.cluster.timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|e| crate::Error::config(format!("Invalid timeout: {}", e)))?;
        }
        Ok(self)
    }

    /// Check that the settings can be used to open a connection
    pub fn validate(&self) -> crate::Result<()> {
        let endpoint = &self.cluster.endpoint;
        if endpoint.is_empty() {
            return Err(crate::Error::config(format!(
                "Endpoint is empty; set it in the config file or {}",
                ENV_ENDPOINT
            )));
        }

        let url = url::Url::parse(endpoint)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(crate::Error::config(format!(
                "Endpoint must use http or https: {}",
                endpoint
            )));
        }
        if url.host_str().is_none() {
            return Err(crate::Error::config(format!(
                "Endpoint has no host: {}",
                endpoint
            )));
        }
        if url.port().is_none() {
            tracing::warn!(
                "Endpoint {} has no explicit port; PAPI usually listens on 8080",
                endpoint
            );
        }

        if self.cluster.timeout_secs == 0 {
            return Err(crate::Error::config("Timeout must be greater than zero"));
        }
        Ok(())
    }
}

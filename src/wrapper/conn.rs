//! Cluster connection
//!
//! Couples a transport with the platform API version discovered at connect
//! time. All typed calls are built on [`PapiTransport::send`].

use crate::{
    Error, Result,
    config::ClusterSettings,
    session::{PapiSession, PapiTransport},
    types::{ApiRequest, JsonObject},
};
use serde::de::DeserializeOwned;

/// Path reporting the newest platform API version
pub const PLATFORM_LATEST_PATH: &str = "platform/latest";

/// Platform path used until the cluster reports its latest version
pub const DEFAULT_PLATFORM_PATH: &str = "platform/10";

/// Zone used when a call is given an empty zone name
pub const DEFAULT_ZONE: &str = "System";

/// Connection to a cluster's typed API calls
#[derive(Debug)]
pub struct ClusterConnection<T: PapiTransport = PapiSession> {
    /// Underlying transport
    pub(crate) papi: T,
    /// Versioned platform prefix, e.g. `platform/16`
    pub(crate) platform_path: String,
}

impl ClusterConnection<PapiSession> {
    /// Creates a connection with a disconnected session
    pub fn new() -> Self {
        Self::with_transport(PapiSession::default())
    }

    /// Connects using the given cluster settings.
    ///
    /// Any previous session is closed first. After login the latest platform
    /// API version is queried; if that fails the default platform path stays
    /// in place and the connection is still usable.
    pub async fn connect(&mut self, settings: &ClusterSettings) -> Result<()> {
        if let Err(e) = self.papi.disconnect().await {
            tracing::debug!("Ignoring error while closing previous session: {}", e);
        }
        self.papi.set_endpoint(settings.endpoint.clone());
        self.papi.set_user(settings.user.clone());
        self.papi.set_password(settings.password.clone());
        self.papi.set_ignore_cert(settings.ignore_cert);
        self.papi.set_timeout(settings.timeout());

        if let Err(e) = self.papi.connect().await {
            tracing::error!("Unable to connect to API endpoint: {}", e);
            return Err(e);
        }

        match self.get_platform_latest().await {
            Ok(version) => self.platform_path = format!("platform/{}", version),
            Err(e) => tracing::warn!(
                "Unable to get latest platform API version automatically: {}",
                e
            ),
        }
        Ok(())
    }

    /// Closes the session. Safe to call repeatedly or before any connect.
    pub async fn disconnect(&mut self) -> Result<()> {
        self.papi.disconnect().await
    }

    /// Underlying session
    pub fn session(&self) -> &PapiSession {
        &self.papi
    }

    /// Mutable access to the underlying session for calls without a typed wrapper
    pub fn session_mut(&mut self) -> &mut PapiSession {
        &mut self.papi
    }
}

impl Default for ClusterConnection<PapiSession> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PapiTransport> ClusterConnection<T> {
    /// Creates a connection over an existing transport
    pub fn with_transport(papi: T) -> Self {
        Self {
            papi,
            platform_path: DEFAULT_PLATFORM_PATH.to_string(),
        }
    }

    /// Versioned platform prefix used by typed calls
    pub fn platform_path(&self) -> &str {
        &self.platform_path
    }

    /// Overrides the versioned platform prefix
    pub fn set_platform_path(&mut self, path: impl Into<String>) -> String {
        std::mem::replace(&mut self.platform_path, path.into())
    }

    /// Returns the latest platform API version of the cluster, e.g. `"16"`
    pub async fn get_platform_latest(&mut self) -> Result<String> {
        let body = self.send_expecting(&ApiRequest::get(PLATFORM_LATEST_PATH)).await?;
        body.get("latest")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::decode("platform/latest response has no \"latest\" string"))
    }

    /// Builds `<platform path>/<suffix>`
    pub(crate) fn platform(&self, suffix: &str) -> String {
        format!("{}/{}", self.platform_path, suffix)
    }

    /// Sends a request that must return a body
    pub(crate) async fn send_expecting(&mut self, request: &ApiRequest) -> Result<JsonObject> {
        self.papi.send(request).await?.ok_or_else(|| {
            Error::decode(format!("Empty response body from {}", request.path.joined()))
        })
    }

    /// Sends a request and decodes one field of the merged result
    pub(crate) async fn send_field<D: DeserializeOwned + Default>(
        &mut self,
        request: &ApiRequest,
        field: &str,
    ) -> Result<D> {
        let mut body = self.send_expecting(request).await?;
        match body.remove(field) {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(D::default()),
        }
    }
}

/// Zone name, falling back to [`DEFAULT_ZONE`] when empty
pub(crate) fn zone_or_default(zone: &str) -> &str {
    if zone.is_empty() { DEFAULT_ZONE } else { zone }
}

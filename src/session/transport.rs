//! Transport abstraction consumed by the wrapper layer

use crate::{
    Result,
    session::PapiSession,
    types::{ApiRequest, JsonObject},
};

/// Anything that can perform a merged PAPI call.
///
/// Implemented by [`PapiSession`]; tests substitute a scripted transport.
#[async_trait::async_trait]
pub trait PapiTransport: Send {
    /// Perform the call and return the merged JSON object, or `None` for an empty body
    async fn send(&mut self, request: &ApiRequest) -> Result<Option<JsonObject>>;
}

#[async_trait::async_trait]
impl PapiTransport for PapiSession {
    async fn send(&mut self, request: &ApiRequest) -> Result<Option<JsonObject>> {
        PapiSession::send(self, request).await
    }
}

//! S3 protocol key calls

use crate::{
    Result,
    session::PapiTransport,
    types::{ApiRequest, S3Key},
    wrapper::conn::{ClusterConnection, zone_or_default},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct KeyExpiry {
    existing_key_expiry_time: u32,
}

impl<T: PapiTransport> ClusterConnection<T> {
    /// Creates a new S3 secret for a user.
    ///
    /// A new key is always forced. The previous key expires after
    /// `ttl_minutes`, or immediately when `ttl_minutes` is 0. An empty `zone`
    /// means the `System` zone.
    pub async fn get_s3_token(&mut self, name: &str, zone: &str, ttl_minutes: u32) -> Result<S3Key> {
        let mut request = ApiRequest::post(self.platform(&format!("protocols/s3/keys/{}", name)))
            .with_query("force", "true")
            .with_query("zone", zone_or_default(zone));
        if ttl_minutes > 0 {
            request = request.with_json(&KeyExpiry {
                existing_key_expiry_time: ttl_minutes,
            })?;
        }
        self.send_field(&request, "keys").await
    }
}

//! HTTP client construction
//!
//! Builds the reusable `reqwest` client held by a connected session.

use crate::{Result, utils::version};
use reqwest::Client;
use std::time::Duration;

/// Build an HTTP client honoring the certificate flag and timeout.
///
/// Header names are written title-cased on HTTP/1 so the cluster sees
/// `X-CSRF-Token` rather than `x-csrf-token`.
pub fn build_http_client(ignore_cert: bool, timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .user_agent(format!("papi-lite/{}", version::get_version()))
        .danger_accept_invalid_certs(ignore_cert)
        .connect_timeout(timeout)
        .timeout(timeout)
        .http1_title_case_headers()
        .build()?;

    tracing::debug!(
        "Built HTTP client (ignore_cert={}, timeout={:?})",
        ignore_cert,
        timeout
    );
    Ok(client)
}
